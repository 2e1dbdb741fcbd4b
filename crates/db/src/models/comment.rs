//! Build comment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub build_id: DbId,
    pub content: String,
    pub parent_comment_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A comment with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    pub user_name: String,
}

/// DTO for posting a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
    pub parent_comment_id: Option<DbId>,
}
