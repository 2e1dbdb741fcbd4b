//! Shared query parameter types for API handlers.

use buildboard_core::types::DbId;
use serde::Deserialize;

/// `?category_id=` filter for the parts catalog.
#[derive(Debug, Deserialize)]
pub struct CategoryFilterParams {
    pub category_id: Option<DbId>,
}
