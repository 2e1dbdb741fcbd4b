//! Repository for the `ratings` table.

use sqlx::PgPool;
use buildboard_core::types::DbId;

use crate::models::rating::{CreateRating, Rating, RatingWithUser};

const COLUMNS: &str = "id, user_id, build_id, score, review_text, created_at";

/// Provides rating reads and the insert-and-recompute write.
pub struct RatingRepo;

impl RatingRepo {
    /// List a build's ratings, newest first, with reviewer names.
    pub async fn list_for_build(
        pool: &PgPool,
        build_id: DbId,
    ) -> Result<Vec<RatingWithUser>, sqlx::Error> {
        sqlx::query_as::<_, RatingWithUser>(
            "SELECT r.id, r.user_id, r.build_id, r.score, r.review_text, r.created_at,
                    u.display_name AS user_name
             FROM ratings r
             JOIN users u ON u.id = r.user_id
             WHERE r.build_id = $1
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(build_id)
        .fetch_all(pool)
        .await
    }

    /// The rating `user_id` left on a build, if any.
    pub async fn find_for_user(
        pool: &PgPool,
        build_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE build_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Rating>(&query)
            .bind(build_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a rating and refresh the build's average and count in one
    /// transaction. A second rating by the same user violates
    /// `uq_ratings_user_build`.
    pub async fn create(
        pool: &PgPool,
        build_id: DbId,
        user_id: DbId,
        input: &CreateRating,
    ) -> Result<Rating, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO ratings (user_id, build_id, score, review_text)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let rating = sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(build_id)
            .bind(input.score)
            .bind(&input.review_text)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE builds SET
                rating_avg = (SELECT AVG(score)::DOUBLE PRECISION FROM ratings WHERE build_id = $1),
                rating_count = (SELECT COUNT(*)::INTEGER FROM ratings WHERE build_id = $1)
             WHERE id = $1",
        )
        .bind(build_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(rating)
    }
}
