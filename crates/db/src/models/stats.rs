//! Platform-wide counters.

use serde::Serialize;
use sqlx::FromRow;

/// Headline counts shown on the landing page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlatformStats {
    pub published_builds: i64,
    pub active_parts: i64,
    pub users: i64,
    pub build_requests: i64,
}
