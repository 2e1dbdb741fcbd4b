//! Repository for the `parts` table.

use sqlx::{PgConnection, PgPool};
use buildboard_core::types::DbId;

use crate::models::part::{CreatePart, Part, PartSpecRow, PartWithCategory, UpdatePart};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, brand, model, specifications, price, \
    image_url, is_active, created_by, created_at, updated_at";

/// Prefixed column list for queries joining `part_categories c`.
const JOINED_COLUMNS: &str = "p.id, p.category_id, p.name, p.brand, p.model, \
    p.specifications, p.price, p.image_url, p.is_active, p.created_by, p.created_at, \
    p.updated_at, c.name AS category_name, c.slug AS category_slug";

/// Provides CRUD operations for catalog parts.
pub struct PartRepo;

impl PartRepo {
    /// List active parts, optionally restricted to one category.
    pub async fn list_active(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<PartWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM parts p
             JOIN part_categories c ON c.id = p.category_id
             WHERE p.is_active = true
               AND ($1::BIGINT IS NULL OR p.category_id = $1)
             ORDER BY c.sort_order, p.name"
        );
        sqlx::query_as::<_, PartWithCategory>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// List every part including inactive ones.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PartWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM parts p
             JOIN part_categories c ON c.id = p.category_id
             ORDER BY c.sort_order, p.name"
        );
        sqlx::query_as::<_, PartWithCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a part by ID, with its category.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PartWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM parts p
             JOIN part_categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, PartWithCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve specification rows for a set of part ids in one query.
    ///
    /// Unknown ids are simply absent from the result.
    pub async fn find_spec_rows(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<PartSpecRow>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, PartSpecRow>(
            "SELECT p.id, c.slug AS category_slug, p.specifications
             FROM parts p
             JOIN part_categories c ON c.id = p.category_id
             WHERE p.id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(conn)
        .await
    }

    /// Insert a new part.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreatePart,
    ) -> Result<Part, sqlx::Error> {
        let query = format!(
            "INSERT INTO parts
                (category_id, name, brand, model, specifications, price, image_url, is_active, created_by)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::jsonb), COALESCE($6, 0), $7,
                     COALESCE($8, true), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.specifications)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(input.is_active)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Update a part. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePart,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET
                category_id = COALESCE($2, category_id),
                name = COALESCE($3, name),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                specifications = COALESCE($6, specifications),
                price = COALESCE($7, price),
                image_url = COALESCE($8, image_url),
                is_active = COALESCE($9, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.specifications)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a part. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
