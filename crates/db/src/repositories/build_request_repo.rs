//! Repository for the `build_requests` table.

use sqlx::PgPool;
use buildboard_core::types::DbId;

use crate::models::request::{
    BuildRequest, BuildRequestFilter, CreateBuildRequest, UpdateBuildRequest,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, build_id, user_id, budget, purpose, notes, status, \
    preferred_builder_id, created_at, updated_at";

/// Provides CRUD operations for build requests.
pub struct BuildRequestRepo;

impl BuildRequestRepo {
    /// List requests, newest first, applying any filters that are set.
    pub async fn list(
        pool: &PgPool,
        filter: &BuildRequestFilter,
    ) -> Result<Vec<BuildRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM build_requests
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::BIGINT IS NULL OR user_id = $2)
               AND ($3::BIGINT IS NULL OR build_id = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, BuildRequest>(&query)
            .bind(&filter.status)
            .bind(filter.user_id)
            .bind(filter.build_id)
            .fetch_all(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BuildRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM build_requests WHERE id = $1");
        sqlx::query_as::<_, BuildRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Open a new request on behalf of `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateBuildRequest,
    ) -> Result<BuildRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO build_requests (build_id, user_id, budget, purpose, notes, preferred_builder_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuildRequest>(&query)
            .bind(input.build_id)
            .bind(user_id)
            .bind(input.budget)
            .bind(&input.purpose)
            .bind(&input.notes)
            .bind(input.preferred_builder_id)
            .fetch_one(pool)
            .await
    }

    /// Update a request. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBuildRequest,
    ) -> Result<Option<BuildRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE build_requests SET
                budget = COALESCE($2, budget),
                purpose = COALESCE($3, purpose),
                notes = COALESCE($4, notes),
                status = COALESCE($5, status),
                preferred_builder_id = COALESCE($6, preferred_builder_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuildRequest>(&query)
            .bind(id)
            .bind(input.budget)
            .bind(&input.purpose)
            .bind(&input.notes)
            .bind(&input.status)
            .bind(input.preferred_builder_id)
            .fetch_optional(pool)
            .await
    }
}
