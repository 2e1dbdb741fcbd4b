//! Repository for the `builder_offers` table.

use sqlx::PgPool;
use buildboard_core::marketplace::{
    OFFER_STATUS_ACCEPTED, OFFER_STATUS_PENDING, OFFER_STATUS_REJECTED, REQUEST_STATUS_CLAIMED,
    REQUEST_STATUS_OPEN,
};
use buildboard_core::types::DbId;

use crate::models::offer::{BuilderOffer, CreateOffer, OfferFilter, OfferWithBuilder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, request_id, builder_id, fee, message, suggested_build_id, \
    contact_info, status, created_at";

/// Provides offer reads, inserts and acceptance.
pub struct OfferRepo;

impl OfferRepo {
    /// List offers, newest first, with builder names.
    pub async fn list(
        pool: &PgPool,
        filter: &OfferFilter,
    ) -> Result<Vec<OfferWithBuilder>, sqlx::Error> {
        sqlx::query_as::<_, OfferWithBuilder>(
            "SELECT o.id, o.request_id, o.builder_id, o.fee, o.message, o.suggested_build_id,
                    o.contact_info, o.status, o.created_at, u.display_name AS builder_name
             FROM builder_offers o
             JOIN users u ON u.id = o.builder_id
             WHERE ($1::BIGINT IS NULL OR o.request_id = $1)
               AND ($2::BIGINT IS NULL OR o.builder_id = $2)
             ORDER BY o.created_at DESC, o.id DESC",
        )
        .bind(filter.request_id)
        .bind(filter.builder_id)
        .fetch_all(pool)
        .await
    }

    /// Find an offer by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BuilderOffer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM builder_offers WHERE id = $1");
        sqlx::query_as::<_, BuilderOffer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Submit an offer. A second offer by the same builder on the same
    /// request violates `uq_builder_offers_request_builder`.
    pub async fn create(
        pool: &PgPool,
        builder_id: DbId,
        input: &CreateOffer,
    ) -> Result<BuilderOffer, sqlx::Error> {
        let query = format!(
            "INSERT INTO builder_offers
                (request_id, builder_id, fee, message, suggested_build_id, contact_info)
             VALUES ($1, $2, COALESCE($3, 0), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuilderOffer>(&query)
            .bind(input.request_id)
            .bind(builder_id)
            .bind(input.fee)
            .bind(&input.message)
            .bind(input.suggested_build_id)
            .bind(&input.contact_info)
            .fetch_one(pool)
            .await
    }

    /// Accept an offer: in one transaction the offer becomes `accepted`,
    /// every other offer on the same request `rejected`, and the request
    /// `claimed`.
    ///
    /// Only a `pending` offer on an `open` request can be accepted; returns
    /// `None` (and changes nothing) otherwise, including when the offer
    /// does not exist.
    pub async fn accept(pool: &PgPool, id: DbId) -> Result<Option<BuilderOffer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE builder_offers SET status = $2
             WHERE id = $1
               AND status = $3
               AND EXISTS (
                   SELECT 1 FROM build_requests r
                   WHERE r.id = builder_offers.request_id AND r.status = $4
               )
             RETURNING {COLUMNS}"
        );
        let accepted = sqlx::query_as::<_, BuilderOffer>(&query)
            .bind(id)
            .bind(OFFER_STATUS_ACCEPTED)
            .bind(OFFER_STATUS_PENDING)
            .bind(REQUEST_STATUS_OPEN)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(offer) = accepted else {
            return Ok(None);
        };

        // Claiming takes the request row lock; a concurrent accept that
        // loses the race finds it no longer open and rolls back.
        let claimed = sqlx::query("UPDATE build_requests SET status = $2 WHERE id = $1 AND status = $3")
            .bind(offer.request_id)
            .bind(REQUEST_STATUS_CLAIMED)
            .bind(REQUEST_STATUS_OPEN)
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("UPDATE builder_offers SET status = $3 WHERE request_id = $1 AND id <> $2")
            .bind(offer.request_id)
            .bind(offer.id)
            .bind(OFFER_STATUS_REJECTED)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(offer))
    }
}
