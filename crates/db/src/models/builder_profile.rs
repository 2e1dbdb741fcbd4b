//! Business details shown on a builder's public page.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `builder_profiles` table, keyed by user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuilderProfile {
    pub user_id: DbId,
    pub business_name: String,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub portfolio_url: Option<String>,
    pub years_of_experience: Option<i32>,
    pub specialization: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for editing a profile. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBuilderProfile {
    pub business_name: Option<String>,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub portfolio_url: Option<String>,
    pub years_of_experience: Option<i32>,
    pub specialization: Option<String>,
}
