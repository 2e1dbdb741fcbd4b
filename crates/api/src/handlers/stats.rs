//! Handler for the public `/stats` endpoint.

use axum::extract::State;
use axum::Json;
use buildboard_db::models::stats::PlatformStats;
use buildboard_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
pub async fn platform_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PlatformStats>>> {
    let stats = StatsRepo::platform_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
