//! Aggregate counters across the platform.

use sqlx::PgPool;
use buildboard_core::marketplace::BUILD_STATUS_PUBLISHED;

use crate::models::stats::PlatformStats;

/// Read-only aggregate queries.
pub struct StatsRepo;

impl StatsRepo {
    /// Count published builds, active parts, non-banned users and requests.
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        sqlx::query_as::<_, PlatformStats>(
            "SELECT
                (SELECT COUNT(*) FROM builds WHERE status = $1) AS published_builds,
                (SELECT COUNT(*) FROM parts WHERE is_active = true) AS active_parts,
                (SELECT COUNT(*) FROM users WHERE is_banned = false) AS users,
                (SELECT COUNT(*) FROM build_requests) AS build_requests",
        )
        .bind(BUILD_STATUS_PUBLISHED)
        .fetch_one(pool)
        .await
    }
}
