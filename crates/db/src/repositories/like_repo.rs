//! Repository for the `likes` table.

use sqlx::PgPool;
use buildboard_core::types::DbId;

use crate::models::like::{Like, LikeToggle};

/// Provides like reads and the toggle.
pub struct LikeRepo;

impl LikeRepo {
    /// List a build's likes, newest first.
    pub async fn list_for_build(pool: &PgPool, build_id: DbId) -> Result<Vec<Like>, sqlx::Error> {
        sqlx::query_as::<_, Like>(
            "SELECT id, user_id, build_id, created_at FROM likes
             WHERE build_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(build_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `user_id` currently likes the build.
    pub async fn exists(pool: &PgPool, build_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE build_id = $1 AND user_id = $2)",
        )
        .bind(build_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Remove the user's like if present, otherwise add one, and adjust the
    /// build's `like_count` to match. Runs in one transaction; the count
    /// never drops below zero.
    pub async fn toggle(
        pool: &PgPool,
        build_id: DbId,
        user_id: DbId,
    ) -> Result<LikeToggle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM likes WHERE build_id = $1 AND user_id = $2")
            .bind(build_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        let like_count = if removed {
            sqlx::query_scalar::<_, i32>(
                "UPDATE builds SET like_count = GREATEST(like_count - 1, 0)
                 WHERE id = $1 RETURNING like_count",
            )
            .bind(build_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query("INSERT INTO likes (user_id, build_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(build_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query_scalar::<_, i32>(
                "UPDATE builds SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count",
            )
            .bind(build_id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        Ok(LikeToggle {
            liked: !removed,
            like_count,
        })
    }
}
