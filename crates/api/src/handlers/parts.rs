//! Handlers for the `/parts` catalog resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::error::CoreError;
use buildboard_core::types::DbId;
use buildboard_db::models::part::{CreatePart, Part, PartWithCategory, UpdatePart};
use buildboard_db::repositories::PartRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::CategoryFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn part_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Part", id })
}

/// GET /api/v1/parts?category_id=X
///
/// Active parts only, ordered by category then name.
pub async fn list_parts(
    State(state): State<AppState>,
    Query(params): Query<CategoryFilterParams>,
) -> AppResult<Json<DataResponse<Vec<PartWithCategory>>>> {
    let parts = PartRepo::list_active(&state.pool, params.category_id).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/v1/parts/all
///
/// Every part, including inactive ones. Admin only.
pub async fn list_all_parts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PartWithCategory>>>> {
    let parts = PartRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/v1/parts/{id}
pub async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PartWithCategory>>> {
    let part = PartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| part_not_found(id))?;
    Ok(Json(DataResponse { data: part }))
}

/// POST /api/v1/parts
pub async fn create_part(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePart>,
) -> AppResult<(StatusCode, Json<DataResponse<Part>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    let part = PartRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(part_id = part.id, user_id = admin.user_id, "Part created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: part })))
}

/// PUT /api/v1/parts/{id}
///
/// Partial update; absent fields keep their stored values.
pub async fn update_part(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePart>,
) -> AppResult<Json<DataResponse<Part>>> {
    let part = PartRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| part_not_found(id))?;
    Ok(Json(DataResponse { data: part }))
}

/// DELETE /api/v1/parts/{id}
///
/// Parts referenced by a saved build cannot be deleted (400).
pub async fn delete_part(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PartRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(part_not_found(id))
    }
}
