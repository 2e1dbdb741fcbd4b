//! Catalog part model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::compatibility::SelectedPart;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `parts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Part {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: serde_json::Value,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A part joined with its category, as returned by catalog listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub part: Part,
    pub category_name: String,
    pub category_slug: String,
}

/// Minimal projection the compatibility check needs.
#[derive(Debug, Clone, FromRow)]
pub struct PartSpecRow {
    pub id: DbId,
    pub category_slug: String,
    pub specifications: serde_json::Value,
}

impl From<PartSpecRow> for SelectedPart {
    fn from(row: PartSpecRow) -> Self {
        Self {
            id: row.id,
            category_slug: row.category_slug,
            specifications: row.specifications,
        }
    }
}

/// DTO for creating a part.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePart {
    pub category_id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for updating a part. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePart {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
