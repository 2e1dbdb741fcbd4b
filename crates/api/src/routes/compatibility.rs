//! Route definitions for the `/compatibility` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::compatibility;
use crate::state::AppState;

/// Routes mounted at `/compatibility`.
///
/// ```text
/// POST   /check        -> check
/// GET    /rule-types   -> list_rule_types
/// GET    /rules        -> list_rules    (admin)
/// POST   /rules        -> create_rule   (admin)
/// GET    /rules/{id}   -> get_rule      (admin)
/// PUT    /rules/{id}   -> update_rule   (admin)
/// DELETE /rules/{id}   -> delete_rule   (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", post(compatibility::check))
        .route("/rule-types", get(compatibility::list_rule_types))
        .route(
            "/rules",
            get(compatibility::list_rules).post(compatibility::create_rule),
        )
        .route(
            "/rules/{id}",
            get(compatibility::get_rule)
                .put(compatibility::update_rule)
                .delete(compatibility::delete_rule),
        )
}
