//! Build, request, offer and builder-application status names plus review
//! input checks.
//!
//! Status strings must match the check constraints in the migrations.

use crate::error::CoreError;

pub const BUILD_STATUS_DRAFT: &str = "draft";
pub const BUILD_STATUS_PUBLISHED: &str = "published";
pub const BUILD_STATUSES: [&str; 3] = [BUILD_STATUS_DRAFT, BUILD_STATUS_PUBLISHED, "archived"];

pub const BUILD_TYPE_PERSONAL: &str = "personal";
pub const BUILD_TYPES: [&str; 3] = [BUILD_TYPE_PERSONAL, "showcase", "for_sale"];

pub const REQUEST_STATUS_OPEN: &str = "open";
pub const REQUEST_STATUS_CLAIMED: &str = "claimed";
pub const REQUEST_STATUSES: [&str; 4] = [
    REQUEST_STATUS_OPEN,
    REQUEST_STATUS_CLAIMED,
    "completed",
    "cancelled",
];

pub const OFFER_STATUS_PENDING: &str = "pending";
pub const OFFER_STATUS_ACCEPTED: &str = "accepted";
pub const OFFER_STATUS_REJECTED: &str = "rejected";

pub const APPLICATION_STATUS_PENDING: &str = "pending";
pub const APPLICATION_STATUS_APPROVED: &str = "approved";
/// Outcomes an admin may record when reviewing an application.
pub const APPLICATION_DECISIONS: [&str; 2] = [APPLICATION_STATUS_APPROVED, "rejected"];
pub const APPLICATION_TYPES: [&str; 2] = ["individual", "business"];

pub const MIN_RATING_SCORE: i32 = 1;
pub const MAX_RATING_SCORE: i32 = 5;

/// Reject a value that is not one of `allowed`.
pub fn validate_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Ratings are whole stars from 1 to 5.
pub fn validate_rating_score(score: i32) -> Result<(), CoreError> {
    if !(MIN_RATING_SCORE..=MAX_RATING_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "score must be between {MIN_RATING_SCORE} and {MAX_RATING_SCORE}, got {score}"
        )));
    }
    Ok(())
}
