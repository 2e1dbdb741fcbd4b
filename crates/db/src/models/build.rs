//! Build entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::compatibility::PartSlots;
use buildboard_core::types::{DbId, Timestamp};

use super::category::PartCategory;
use super::part::Part;

/// A row from the `builds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Build {
    pub id: DbId,
    pub creator_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub total_price: f64,
    pub status: String,
    pub build_type: String,
    pub availability_status: Option<String>,
    pub image_urls: Vec<String>,
    pub specs_summary: Option<String>,
    pub rating_avg: Option<f64>,
    pub rating_count: i32,
    pub like_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A build joined with its creator's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuildWithCreator {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub build: Build,
    pub creator_name: String,
}

/// A `build_parts` row with its part and category resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPartDetail {
    pub id: DbId,
    pub build_id: DbId,
    pub quantity: i32,
    pub part: Part,
    pub category: PartCategory,
}

/// Filters accepted by the build listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildFilter {
    pub status: Option<String>,
    pub build_type: Option<String>,
    pub creator_id: Option<DbId>,
}

/// Body for creating a build. `parts` maps slot name to part id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBuild {
    pub title: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
    pub build_type: Option<String>,
    pub availability_status: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub specs_summary: Option<String>,
    #[serde(default)]
    pub parts: PartSlots,
}

/// Body for updating a build. The part selection is replaced wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBuild {
    pub title: Option<String>,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
    pub build_type: Option<String>,
    pub availability_status: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub specs_summary: Option<String>,
    #[serde(default)]
    pub parts: PartSlots,
}
