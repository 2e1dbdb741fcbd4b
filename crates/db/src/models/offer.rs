//! Builder offer model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `builder_offers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuilderOffer {
    pub id: DbId,
    pub request_id: DbId,
    pub builder_id: DbId,
    pub fee: f64,
    pub message: Option<String>,
    pub suggested_build_id: Option<DbId>,
    pub contact_info: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

/// An offer with the builder's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferWithBuilder {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub offer: BuilderOffer,
    pub builder_name: String,
}

/// Filters accepted by the offer listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferFilter {
    pub request_id: Option<DbId>,
    pub builder_id: Option<DbId>,
}

/// DTO for submitting an offer on a request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOffer {
    pub request_id: DbId,
    pub fee: Option<f64>,
    pub message: Option<String>,
    pub suggested_build_id: Option<DbId>,
    pub contact_info: Option<String>,
}
