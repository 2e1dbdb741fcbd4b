//! Handlers for the `/builds` resource.
//!
//! Saving a build enforces the required slots, then runs the compatibility
//! check inside the same transaction as the write. Any `error` issue rolls
//! the transaction back; `warning` issues are returned alongside the build.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::build_slots::missing_required_slots;
use buildboard_core::compatibility::rules::{has_blocking_issues, warnings_only};
use buildboard_core::compatibility::{CompatibilityIssue, PartSlots};
use buildboard_core::error::CoreError;
use buildboard_core::marketplace::{validate_one_of, BUILD_STATUSES, BUILD_TYPES};
use buildboard_core::types::DbId;
use buildboard_db::models::build::{
    Build, BuildFilter, BuildPartDetail, BuildWithCreator, CreateBuild, UpdateBuild,
};
use buildboard_db::repositories::BuildRepo;
use serde::Serialize;

use super::compatibility::run_compatibility_check;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A saved build plus the non-blocking issues found while saving it.
#[derive(Debug, Serialize)]
pub struct SavedBuild {
    pub build: Build,
    pub warnings: Vec<CompatibilityIssue>,
}

pub(crate) fn build_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Build", id })
}

/// Reject the build if any required slot is empty.
fn ensure_required_parts(parts: &PartSlots) -> AppResult<()> {
    let missing = missing_required_slots(parts);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingParts(missing))
    }
}

fn validate_build_fields(status: Option<&str>, build_type: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        validate_one_of(status, &BUILD_STATUSES, "status")?;
    }
    if let Some(build_type) = build_type {
        validate_one_of(build_type, &BUILD_TYPES, "build_type")?;
    }
    Ok(())
}

/// Run the check on the open transaction and split the outcome.
///
/// Returns the warnings to report, or [`AppError::Incompatible`] carrying
/// every issue when any of them blocks the save.
async fn check_within(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    parts: &PartSlots,
) -> AppResult<Vec<CompatibilityIssue>> {
    let issues = run_compatibility_check(&mut **tx, parts).await?;
    if has_blocking_issues(&issues) {
        return Err(AppError::Incompatible(issues));
    }
    Ok(warnings_only(&issues))
}

/// GET /api/v1/builds?status=&build_type=&creator_id=
pub async fn list_builds(
    State(state): State<AppState>,
    Query(filter): Query<BuildFilter>,
) -> AppResult<Json<DataResponse<Vec<BuildWithCreator>>>> {
    let builds = BuildRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: builds }))
}

/// GET /api/v1/builds/{id}
pub async fn get_build(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BuildWithCreator>>> {
    let build = BuildRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| build_not_found(id))?;
    Ok(Json(DataResponse { data: build }))
}

/// GET /api/v1/builds/{id}/parts
pub async fn list_build_parts(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<BuildPartDetail>>>> {
    let parts = BuildRepo::list_parts(&state.pool, id).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// POST /api/v1/builds
pub async fn create_build(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBuild>,
) -> AppResult<(StatusCode, Json<DataResponse<SavedBuild>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    validate_build_fields(input.status.as_deref(), input.build_type.as_deref())?;
    ensure_required_parts(&input.parts)?;

    let mut tx = state.pool.begin().await?;
    let warnings = check_within(&mut tx, &input.parts).await?;
    let build = BuildRepo::create(&mut tx, auth.user_id, &input).await?;
    tx.commit().await?;

    tracing::info!(
        build_id = build.id,
        user_id = auth.user_id,
        warnings = warnings.len(),
        "Build created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SavedBuild { build, warnings },
        }),
    ))
}

/// PUT /api/v1/builds/{id}
///
/// Owner or admin only. The part selection is replaced wholesale.
pub async fn update_build(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBuild>,
) -> AppResult<Json<DataResponse<SavedBuild>>> {
    let creator_id = BuildRepo::find_creator_id(&state.pool, id)
        .await?
        .ok_or_else(|| build_not_found(id))?;
    auth.ensure_owner_or_admin(creator_id)?;

    validate_build_fields(input.status.as_deref(), input.build_type.as_deref())?;
    ensure_required_parts(&input.parts)?;

    let mut tx = state.pool.begin().await?;
    let warnings = check_within(&mut tx, &input.parts).await?;
    let build = BuildRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| build_not_found(id))?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: SavedBuild { build, warnings },
    }))
}

/// DELETE /api/v1/builds/{id}
///
/// Owner or admin only.
pub async fn delete_build(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let creator_id = BuildRepo::find_creator_id(&state.pool, id)
        .await?
        .ok_or_else(|| build_not_found(id))?;
    auth.ensure_owner_or_admin(creator_id)?;

    BuildRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 404 unless the build exists. Used by the nested review handlers.
pub(crate) async fn ensure_build_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    BuildRepo::find_creator_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| build_not_found(id))
}
