//! Build request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `build_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuildRequest {
    pub id: DbId,
    pub build_id: DbId,
    pub user_id: DbId,
    pub budget: Option<f64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub preferred_builder_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters accepted by the request listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildRequestFilter {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
    pub build_id: Option<DbId>,
}

/// DTO for opening a build request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBuildRequest {
    pub build_id: DbId,
    pub budget: Option<f64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub preferred_builder_id: Option<DbId>,
}

/// DTO for updating a build request. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBuildRequest {
    pub budget: Option<f64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub preferred_builder_id: Option<DbId>,
}
