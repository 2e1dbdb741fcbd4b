//! Repository for the `comments` table.

use sqlx::PgPool;
use buildboard_core::types::DbId;

use crate::models::comment::{Comment, CommentWithUser, CreateComment};

/// Provides comment reads and inserts.
pub struct CommentRepo;

impl CommentRepo {
    /// List a build's comments in posting order, with author names.
    pub async fn list_for_build(
        pool: &PgPool,
        build_id: DbId,
    ) -> Result<Vec<CommentWithUser>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithUser>(
            "SELECT cm.id, cm.user_id, cm.build_id, cm.content, cm.parent_comment_id,
                    cm.created_at, u.display_name AS user_name
             FROM comments cm
             JOIN users u ON u.id = cm.user_id
             WHERE cm.build_id = $1
             ORDER BY cm.created_at, cm.id",
        )
        .bind(build_id)
        .fetch_all(pool)
        .await
    }

    /// Insert a comment.
    pub async fn create(
        pool: &PgPool,
        build_id: DbId,
        user_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (user_id, build_id, content, parent_comment_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, build_id, content, parent_comment_id, created_at",
        )
        .bind(user_id)
        .bind(build_id)
        .bind(&input.content)
        .bind(input.parent_comment_id)
        .fetch_one(pool)
        .await
    }
}
