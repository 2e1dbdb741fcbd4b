//! Handlers for the `/requests` resource (customers asking builders to
//! assemble a build).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::error::CoreError;
use buildboard_core::marketplace::{validate_one_of, REQUEST_STATUSES};
use buildboard_core::types::DbId;
use buildboard_db::models::request::{
    BuildRequest, BuildRequestFilter, CreateBuildRequest, UpdateBuildRequest,
};
use buildboard_db::repositories::BuildRequestRepo;

use super::builds::ensure_build_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) fn request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BuildRequest",
        id,
    })
}

/// GET /api/v1/requests?status=&user_id=&build_id=
pub async fn list_requests(
    State(state): State<AppState>,
    Query(filter): Query<BuildRequestFilter>,
) -> AppResult<Json<DataResponse<Vec<BuildRequest>>>> {
    let requests = BuildRequestRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BuildRequest>>> {
    let request = BuildRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| request_not_found(id))?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBuildRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BuildRequest>>)> {
    ensure_build_exists(&state.pool, input.build_id).await?;
    let request = BuildRequestRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(request_id = request.id, user_id = auth.user_id, "Build request opened");
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// PUT /api/v1/requests/{id}
///
/// Owner or admin only.
pub async fn update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBuildRequest>,
) -> AppResult<Json<DataResponse<BuildRequest>>> {
    let existing = BuildRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| request_not_found(id))?;
    auth.ensure_owner_or_admin(existing.user_id)?;
    if let Some(status) = &input.status {
        validate_one_of(status, &REQUEST_STATUSES, "status")?;
    }

    let request = BuildRequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| request_not_found(id))?;
    Ok(Json(DataResponse { data: request }))
}
