//! Part category model.

use serde::Serialize;
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `part_categories` table. The slug doubles as the
/// build slot name (`cpu`, `motherboard`, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartCategory {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}
