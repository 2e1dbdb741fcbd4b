pub mod accounts;
pub mod auth;
pub mod builds;
pub mod compatibility;
pub mod health;
pub mod marketplace;
pub mod parts;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /users                                           list (admin)
/// /users/builders                                  builder directory
/// /users/{id}                                      get, update profile (owner or admin)
/// /users/{id}/ban                                  ban / unban (admin)
/// /users/{id}/role                                 change role (admin)
/// /users/{id}/builder-profile                      get, update (owner or admin)
///
/// /applications                                    list (admin), apply (consumer)
/// /applications/mine                               caller's applications (auth)
/// /applications/{id}/review                        approve / reject (admin)
///
/// /categories                                      list
///
/// /parts                                           list active (?category_id), create (admin)
/// /parts/all                                       list including inactive (admin)
/// /parts/{id}                                      get, update (admin), delete (admin)
///
/// /compatibility/check                             evaluate a part selection (POST)
/// /compatibility/rule-types                        recognized rule types
/// /compatibility/rules                             list, create (admin)
/// /compatibility/rules/{id}                        get, update, delete (admin)
///
/// /builds                                          list (?status, ?build_type, ?creator_id), create
/// /builds/{id}                                     get, update, delete (owner or admin)
/// /builds/{id}/parts                               parts with category
/// /builds/{id}/ratings                             list, rate (auth)
/// /builds/{id}/ratings/mine                        caller's rating (auth)
/// /builds/{id}/comments                            list, post (auth)
/// /builds/{id}/likes                               list
/// /builds/{id}/likes/check                         caller liked? (auth)
/// /builds/{id}/likes/toggle                        like / unlike (POST, auth)
///
/// /requests                                        list (?status, ?user_id, ?build_id), create
/// /requests/{id}                                   get, update (owner or admin)
///
/// /offers                                          list (auth), create (builder)
/// /offers/{id}/accept                              accept (request owner or admin)
///
/// /stats                                           platform counters
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", accounts::users_router())
        .nest("/applications", accounts::applications_router())
        .route("/categories", get(handlers::categories::list_categories))
        .nest("/parts", parts::router())
        .nest("/compatibility", compatibility::router())
        .nest("/builds", builds::router())
        .nest("/requests", marketplace::requests_router())
        .nest("/offers", marketplace::offers_router())
        .route("/stats", get(handlers::stats::platform_stats))
}
