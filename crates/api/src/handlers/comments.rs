//! Handlers for `/builds/{id}/comments`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::types::DbId;
use buildboard_db::models::comment::{Comment, CommentWithUser, CreateComment};
use buildboard_db::repositories::CommentRepo;

use super::builds::ensure_build_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/builds/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithUser>>>> {
    let comments = CommentRepo::list_for_build(&state.pool, build_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/builds/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(build_id): Path<DbId>,
    Json(mut input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    input.content = input.content.trim().to_string();
    if input.content.is_empty() {
        return Err(AppError::BadRequest("content must not be empty".into()));
    }
    ensure_build_exists(&state.pool, build_id).await?;

    let comment = CommentRepo::create(&state.pool, build_id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
