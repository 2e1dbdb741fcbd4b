//! Route definitions for the `/parts` catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::parts;
use crate::state::AppState;

/// Routes mounted at `/parts`.
///
/// ```text
/// GET    /        -> list_parts      (?category_id)
/// POST   /        -> create_part     (admin)
/// GET    /all     -> list_all_parts  (admin)
/// GET    /{id}    -> get_part
/// PUT    /{id}    -> update_part     (admin)
/// DELETE /{id}    -> delete_part     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parts::list_parts).post(parts::create_part))
        .route("/all", get(parts::list_all_parts))
        .route(
            "/{id}",
            get(parts::get_part)
                .put(parts::update_part)
                .delete(parts::delete_part),
        )
}
