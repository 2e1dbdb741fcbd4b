//! Handlers for `/builds/{id}/ratings`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::marketplace::validate_rating_score;
use buildboard_core::types::DbId;
use buildboard_db::models::rating::{CreateRating, Rating, RatingWithUser};
use buildboard_db::repositories::RatingRepo;

use super::builds::ensure_build_exists;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/builds/{id}/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RatingWithUser>>>> {
    let ratings = RatingRepo::list_for_build(&state.pool, build_id).await?;
    Ok(Json(DataResponse { data: ratings }))
}

/// GET /api/v1/builds/{id}/ratings/mine
///
/// `data` is `null` when the caller has not rated the build.
pub async fn my_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(build_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<Rating>>>> {
    let rating = RatingRepo::find_for_user(&state.pool, build_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: rating }))
}

/// POST /api/v1/builds/{id}/ratings
///
/// One rating per user per build; a second attempt is a 409.
pub async fn create_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(build_id): Path<DbId>,
    Json(input): Json<CreateRating>,
) -> AppResult<(StatusCode, Json<DataResponse<Rating>>)> {
    validate_rating_score(input.score)?;
    ensure_build_exists(&state.pool, build_id).await?;

    let rating = RatingRepo::create(&state.pool, build_id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: rating })))
}
