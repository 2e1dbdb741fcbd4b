//! Repository for the `builds` and `build_parts` tables.

use sqlx::{FromRow, PgPool};
use buildboard_core::compatibility::PartSlots;
use buildboard_core::marketplace::{BUILD_STATUS_DRAFT, BUILD_TYPE_PERSONAL};
use buildboard_core::types::{DbId, Timestamp};

use crate::models::build::{
    Build, BuildFilter, BuildPartDetail, BuildWithCreator, CreateBuild, UpdateBuild,
};
use crate::models::category::PartCategory;
use crate::models::part::Part;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_id, title, description, purpose, total_price, status, \
    build_type, availability_status, image_urls, specs_summary, rating_avg, rating_count, \
    like_count, created_at, updated_at";

/// Prefixed column list for queries joining `users u` as the creator.
const JOINED_COLUMNS: &str = "b.id, b.creator_id, b.title, b.description, b.purpose, \
    b.total_price, b.status, b.build_type, b.availability_status, b.image_urls, \
    b.specs_summary, b.rating_avg, b.rating_count, b.like_count, b.created_at, b.updated_at, \
    u.display_name AS creator_name";

/// Flat join row for [`BuildRepo::list_parts`].
#[derive(FromRow)]
struct BuildPartRow {
    build_part_id: DbId,
    build_id: DbId,
    quantity: i32,
    #[sqlx(flatten)]
    part: Part,
    category_name: String,
    category_slug: String,
    category_sort_order: i32,
    category_created_at: Timestamp,
}

impl From<BuildPartRow> for BuildPartDetail {
    fn from(row: BuildPartRow) -> Self {
        let category = PartCategory {
            id: row.part.category_id,
            name: row.category_name,
            slug: row.category_slug,
            sort_order: row.category_sort_order,
            created_at: row.category_created_at,
        };
        Self {
            id: row.build_part_id,
            build_id: row.build_id,
            quantity: row.quantity,
            part: row.part,
            category,
        }
    }
}

/// Provides CRUD operations for builds and their part lists.
pub struct BuildRepo;

impl BuildRepo {
    /// List builds, newest first, applying any filters that are set.
    pub async fn list(
        pool: &PgPool,
        filter: &BuildFilter,
    ) -> Result<Vec<BuildWithCreator>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM builds b
             JOIN users u ON u.id = b.creator_id
             WHERE ($1::TEXT IS NULL OR b.status = $1)
               AND ($2::TEXT IS NULL OR b.build_type = $2)
               AND ($3::BIGINT IS NULL OR b.creator_id = $3)
             ORDER BY b.created_at DESC, b.id DESC"
        );
        sqlx::query_as::<_, BuildWithCreator>(&query)
            .bind(&filter.status)
            .bind(&filter.build_type)
            .bind(filter.creator_id)
            .fetch_all(pool)
            .await
    }

    /// Find a build by ID, with its creator's name.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BuildWithCreator>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM builds b
             JOIN users u ON u.id = b.creator_id
             WHERE b.id = $1"
        );
        sqlx::query_as::<_, BuildWithCreator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a build's parts with their part and category rows resolved.
    pub async fn list_parts(
        pool: &PgPool,
        build_id: DbId,
    ) -> Result<Vec<BuildPartDetail>, sqlx::Error> {
        let rows = sqlx::query_as::<_, BuildPartRow>(
            "SELECT bp.id AS build_part_id, bp.build_id, bp.quantity,
                    p.id, p.category_id, p.name, p.brand, p.model, p.specifications, p.price,
                    p.image_url, p.is_active, p.created_by, p.created_at, p.updated_at,
                    c.name AS category_name, c.slug AS category_slug,
                    c.sort_order AS category_sort_order, c.created_at AS category_created_at
             FROM build_parts bp
             JOIN parts p ON p.id = bp.part_id
             JOIN part_categories c ON c.id = p.category_id
             WHERE bp.build_id = $1
             ORDER BY c.sort_order, bp.id",
        )
        .bind(build_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(BuildPartDetail::from).collect())
    }

    /// Insert a build and its part rows within an existing transaction.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        creator_id: DbId,
        input: &CreateBuild,
    ) -> Result<Build, sqlx::Error> {
        let query = format!(
            "INSERT INTO builds
                (creator_id, title, description, purpose, total_price, status, build_type,
                 availability_status, image_urls, specs_summary)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, $11), COALESCE($7, $12),
                     $8, COALESCE($9, '{{}}'::TEXT[]), $10)
             RETURNING {COLUMNS}"
        );
        let build = sqlx::query_as::<_, Build>(&query)
            .bind(creator_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.purpose)
            .bind(input.total_price)
            .bind(&input.status)
            .bind(&input.build_type)
            .bind(&input.availability_status)
            .bind(&input.image_urls)
            .bind(&input.specs_summary)
            .bind(BUILD_STATUS_DRAFT)
            .bind(BUILD_TYPE_PERSONAL)
            .fetch_one(&mut **tx)
            .await?;

        Self::replace_parts(tx, build.id, &input.parts).await?;
        Ok(build)
    }

    /// Update a build and replace its part rows within an existing
    /// transaction. Returns `None` if the build does not exist.
    pub async fn update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        input: &UpdateBuild,
    ) -> Result<Option<Build>, sqlx::Error> {
        let query = format!(
            "UPDATE builds SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                purpose = COALESCE($4, purpose),
                total_price = COALESCE($5, total_price),
                status = COALESCE($6, status),
                build_type = COALESCE($7, build_type),
                availability_status = COALESCE($8, availability_status),
                image_urls = COALESCE($9, image_urls),
                specs_summary = COALESCE($10, specs_summary)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let build = sqlx::query_as::<_, Build>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.purpose)
            .bind(input.total_price)
            .bind(&input.status)
            .bind(&input.build_type)
            .bind(&input.availability_status)
            .bind(&input.image_urls)
            .bind(&input.specs_summary)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(build) = build else {
            return Ok(None);
        };
        Self::replace_parts(tx, build.id, &input.parts).await?;
        Ok(Some(build))
    }

    /// Delete a build. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM builds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch only the creator of a build, for ownership checks.
    pub async fn find_creator_id(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT creator_id FROM builds WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Rewrite the `build_parts` rows: one row, quantity 1, per filled slot.
    async fn replace_parts(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        build_id: DbId,
        parts: &PartSlots,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM build_parts WHERE build_id = $1")
            .bind(build_id)
            .execute(&mut **tx)
            .await?;

        for part_id in parts.values().flatten() {
            sqlx::query("INSERT INTO build_parts (build_id, part_id, quantity) VALUES ($1, $2, 1)")
                .bind(build_id)
                .bind(part_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
