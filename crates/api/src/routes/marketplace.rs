//! Route definitions for the `/requests` and `/offers` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{offers, requests};
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET  /        -> list_requests   (?status, ?user_id, ?build_id)
/// POST /        -> create_request  (auth)
/// GET  /{id}    -> get_request
/// PUT  /{id}    -> update_request  (owner or admin)
/// ```
pub fn requests_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route(
            "/{id}",
            get(requests::get_request).put(requests::update_request),
        )
}

/// Routes mounted at `/offers`.
///
/// ```text
/// GET  /              -> list_offers    (auth; ?request_id, ?builder_id)
/// POST /              -> create_offer   (builder)
/// POST /{id}/accept   -> accept_offer   (request owner or admin)
/// ```
pub fn offers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(offers::list_offers).post(offers::create_offer))
        .route("/{id}/accept", post(offers::accept_offer))
}
