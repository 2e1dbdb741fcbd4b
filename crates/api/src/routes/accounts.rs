//! Route definitions for the `/users` and `/applications` resources.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{applications, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /                       -> list_users              (admin)
/// GET /builders               -> list_builders
/// GET /{id}                   -> get_user
/// PUT /{id}                   -> update_user             (owner or admin)
/// PUT /{id}/ban               -> set_banned              (admin)
/// PUT /{id}/role              -> set_role                (admin)
/// GET /{id}/builder-profile   -> get_builder_profile
/// PUT /{id}/builder-profile   -> update_builder_profile  (owner or admin)
/// ```
pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/builders", get(users::list_builders))
        .route("/{id}", get(users::get_user).put(users::update_user))
        .route("/{id}/ban", put(users::set_banned))
        .route("/{id}/role", put(users::set_role))
        .route(
            "/{id}/builder-profile",
            get(users::get_builder_profile).put(users::update_builder_profile),
        )
}

/// Routes mounted at `/applications`.
///
/// ```text
/// GET  /              -> list_applications    (admin; ?status, ?user_id)
/// POST /              -> create_application   (consumer)
/// GET  /mine          -> my_applications      (auth)
/// PUT  /{id}/review   -> review_application   (admin)
/// ```
pub fn applications_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(applications::list_applications).post(applications::create_application),
        )
        .route("/mine", get(applications::my_applications))
        .route("/{id}/review", put(applications::review_application))
}
