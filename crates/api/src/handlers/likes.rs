//! Handlers for `/builds/{id}/likes`.

use axum::extract::{Path, State};
use axum::Json;
use buildboard_core::types::DbId;
use buildboard_db::models::like::{Like, LikeToggle};
use buildboard_db::repositories::LikeRepo;
use serde::Serialize;

use super::builds::ensure_build_exists;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /builds/{id}/likes/check`.
#[derive(Debug, Serialize)]
pub struct LikeStatus {
    pub liked: bool,
}

/// GET /api/v1/builds/{id}/likes
pub async fn list_likes(
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Like>>>> {
    let likes = LikeRepo::list_for_build(&state.pool, build_id).await?;
    Ok(Json(DataResponse { data: likes }))
}

/// GET /api/v1/builds/{id}/likes/check
pub async fn check_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeStatus>>> {
    let liked = LikeRepo::exists(&state.pool, build_id, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: LikeStatus { liked },
    }))
}

/// POST /api/v1/builds/{id}/likes/toggle
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeToggle>>> {
    ensure_build_exists(&state.pool, build_id).await?;
    let toggled = LikeRepo::toggle(&state.pool, build_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: toggled }))
}
