//! Route definitions for the `/builds` resource and its nested reviews.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{builds, comments, likes, ratings};
use crate::state::AppState;

/// Routes mounted at `/builds`.
///
/// ```text
/// GET    /                        -> list_builds
/// POST   /                        -> create_build      (auth)
/// GET    /{id}                    -> get_build
/// PUT    /{id}                    -> update_build      (owner or admin)
/// DELETE /{id}                    -> delete_build      (owner or admin)
/// GET    /{id}/parts              -> list_build_parts
/// GET    /{id}/ratings            -> list_ratings
/// POST   /{id}/ratings            -> create_rating     (auth)
/// GET    /{id}/ratings/mine       -> my_rating         (auth)
/// GET    /{id}/comments           -> list_comments
/// POST   /{id}/comments           -> create_comment    (auth)
/// GET    /{id}/likes              -> list_likes
/// GET    /{id}/likes/check        -> check_like        (auth)
/// POST   /{id}/likes/toggle       -> toggle_like       (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(builds::list_builds).post(builds::create_build))
        .route(
            "/{id}",
            get(builds::get_build)
                .put(builds::update_build)
                .delete(builds::delete_build),
        )
        .route("/{id}/parts", get(builds::list_build_parts))
        .route(
            "/{id}/ratings",
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route("/{id}/ratings/mine", get(ratings::my_rating))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/{id}/likes", get(likes::list_likes))
        .route("/{id}/likes/check", get(likes::check_like))
        .route("/{id}/likes/toggle", post(likes::toggle_like))
}
