//! Repository for the `builder_applications` table.

use sqlx::PgPool;
use buildboard_core::marketplace::{APPLICATION_STATUS_APPROVED, APPLICATION_STATUS_PENDING};
use buildboard_core::types::DbId;

use super::{BuilderProfileRepo, UserRepo};
use crate::models::application::{
    ApplicationFilter, ApplicationWithUser, BuilderApplication, CreateApplication,
    ReviewApplication,
};

const COLUMNS: &str = "id, user_id, business_name, registration_number, address, website, \
    portfolio_url, years_of_experience, specialization, application_type, status, \
    admin_notes, reviewed_by, reviewed_at, created_at, updated_at";

const JOINED_SELECT: &str = "SELECT ba.id, ba.user_id, ba.business_name, ba.registration_number,
        ba.address, ba.website, ba.portfolio_url, ba.years_of_experience, ba.specialization,
        ba.application_type, ba.status, ba.admin_notes, ba.reviewed_by, ba.reviewed_at,
        ba.created_at, ba.updated_at,
        u.display_name AS user_display_name, u.email AS user_email
     FROM builder_applications ba
     JOIN users u ON u.id = ba.user_id";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Admin listing, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationWithUser>, sqlx::Error> {
        let query = format!(
            "{JOINED_SELECT}
             WHERE ($1::TEXT IS NULL OR ba.status = $1)
               AND ($2::BIGINT IS NULL OR ba.user_id = $2)
             ORDER BY ba.created_at DESC, ba.id DESC"
        );
        sqlx::query_as::<_, ApplicationWithUser>(&query)
            .bind(&filter.status)
            .bind(filter.user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BuilderApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM builder_applications WHERE id = $1");
        sqlx::query_as::<_, BuilderApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Submit an application for `user_id`. A second pending application
    /// violates `uq_builder_applications_pending`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        application_type: &str,
        input: &CreateApplication,
    ) -> Result<BuilderApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO builder_applications
                (user_id, business_name, registration_number, address, website,
                 portfolio_url, years_of_experience, specialization, application_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuilderApplication>(&query)
            .bind(user_id)
            .bind(&input.business_name)
            .bind(&input.registration_number)
            .bind(&input.address)
            .bind(&input.website)
            .bind(&input.portfolio_url)
            .bind(input.years_of_experience)
            .bind(&input.specialization)
            .bind(application_type)
            .fetch_one(pool)
            .await
    }

    /// Record an admin's decision on a pending application.
    ///
    /// Approval also promotes the applicant to `builder` and seeds their
    /// builder profile, all in one transaction. Returns `None` (and
    /// changes nothing) when the application is missing or already
    /// reviewed.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        input: &ReviewApplication,
    ) -> Result<Option<BuilderApplication>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE builder_applications
             SET status = $2, admin_notes = $3, reviewed_by = $4, reviewed_at = NOW()
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        let reviewed = sqlx::query_as::<_, BuilderApplication>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.admin_notes)
            .bind(reviewer_id)
            .bind(APPLICATION_STATUS_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(application) = reviewed else {
            return Ok(None);
        };

        if application.status == APPLICATION_STATUS_APPROVED {
            UserRepo::promote_to_builder(&mut *tx, application.user_id).await?;
            BuilderProfileRepo::create_from_application(&mut *tx, &application).await?;
        }

        tx.commit().await?;
        Ok(Some(application))
    }
}
