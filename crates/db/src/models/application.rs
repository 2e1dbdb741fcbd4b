//! Builder applications: consumers asking to be promoted to `builder`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `builder_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuilderApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub business_name: String,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub portfolio_url: Option<String>,
    pub years_of_experience: Option<i32>,
    pub specialization: Option<String>,
    pub application_type: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application joined with its applicant's name and email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: BuilderApplication,
    pub user_display_name: String,
    pub user_email: String,
}

/// Filters accepted by the admin listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
}

/// DTO for submitting an application.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplication {
    pub business_name: String,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub portfolio_url: Option<String>,
    pub years_of_experience: Option<i32>,
    pub specialization: Option<String>,
    pub application_type: Option<String>,
}

/// An admin's decision on a pending application.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewApplication {
    /// `approved` or `rejected`.
    pub status: String,
    pub admin_notes: Option<String>,
}
