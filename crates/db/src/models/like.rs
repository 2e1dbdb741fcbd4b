//! Build like model.

use serde::Serialize;
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `likes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: DbId,
    pub user_id: DbId,
    pub build_id: DbId,
    pub created_at: Timestamp,
}

/// Outcome of toggling a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: i32,
}
