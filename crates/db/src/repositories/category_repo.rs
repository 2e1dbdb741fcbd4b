//! Repository for the `part_categories` table.

use sqlx::PgPool;

use crate::models::category::PartCategory;

const COLUMNS: &str = "id, name, slug, sort_order, created_at";

/// Read access to part categories. Categories are seeded by migrations.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<PartCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM part_categories ORDER BY sort_order, name");
        sqlx::query_as::<_, PartCategory>(&query)
            .fetch_all(pool)
            .await
    }
}
