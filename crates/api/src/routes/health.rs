//! Liveness check, mounted at the root rather than under `/api/v1`.

use std::time::Instant;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Round-trip time of the check query, absent when it failed.
    pub latency_ms: Option<u64>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

/// GET /health
///
/// Always 200; a failed database check downgrades `status` to `degraded`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let database = match buildboard_db::health_check(&state.pool).await {
        Ok(()) => DatabaseHealth {
            reachable: true,
            latency_ms: u64::try_from(started.elapsed().as_millis()).ok(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            DatabaseHealth {
                reachable: false,
                latency_ms: None,
            }
        }
    };

    Json(HealthResponse {
        status: if database.reachable {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
