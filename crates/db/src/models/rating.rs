//! Build rating model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub build_id: DbId,
    pub score: i32,
    pub review_text: Option<String>,
    pub created_at: Timestamp,
}

/// A rating with the reviewer's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub rating: Rating,
    pub user_name: String,
}

/// DTO for rating a build.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRating {
    pub score: i32,
    pub review_text: Option<String>,
}
