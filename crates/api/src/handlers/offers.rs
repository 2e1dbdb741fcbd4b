//! Handlers for the `/offers` resource (builders bidding on requests).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildboard_core::error::CoreError;
use buildboard_core::marketplace::{OFFER_STATUS_PENDING, REQUEST_STATUS_OPEN};
use buildboard_core::types::DbId;
use buildboard_db::models::offer::{BuilderOffer, CreateOffer, OfferFilter, OfferWithBuilder};
use buildboard_db::repositories::{BuildRequestRepo, OfferRepo};

use super::requests::request_not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireBuilder};
use crate::response::DataResponse;
use crate::state::AppState;

fn offer_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BuilderOffer",
        id,
    })
}

fn not_acceptable(reason: String) -> AppError {
    AppError::Core(CoreError::Conflict(format!("{reason}; offer cannot be accepted")))
}

/// GET /api/v1/offers?request_id=&builder_id=
pub async fn list_offers(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(filter): Query<OfferFilter>,
) -> AppResult<Json<DataResponse<Vec<OfferWithBuilder>>>> {
    let offers = OfferRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: offers }))
}

/// POST /api/v1/offers
///
/// Builders only, and only on open requests. One offer per builder per
/// request; a second attempt is a 409.
pub async fn create_offer(
    RequireBuilder(builder): RequireBuilder,
    State(state): State<AppState>,
    Json(input): Json<CreateOffer>,
) -> AppResult<(StatusCode, Json<DataResponse<BuilderOffer>>)> {
    let request = BuildRequestRepo::find_by_id(&state.pool, input.request_id)
        .await?
        .ok_or_else(|| request_not_found(input.request_id))?;
    if request.status != REQUEST_STATUS_OPEN {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Request is {} and no longer accepts offers",
            request.status
        ))));
    }

    let offer = OfferRepo::create(&state.pool, builder.user_id, &input).await?;
    tracing::info!(offer_id = offer.id, request_id = offer.request_id, "Offer submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: offer })))
}

/// POST /api/v1/offers/{id}/accept
///
/// The request's owner (or an admin) accepts one offer; every competing
/// offer is rejected and the request becomes `claimed`. A request that is
/// no longer open, or an offer that is no longer pending, is a 409.
pub async fn accept_offer(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BuilderOffer>>> {
    let offer = OfferRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| offer_not_found(id))?;
    let request = BuildRequestRepo::find_by_id(&state.pool, offer.request_id)
        .await?
        .ok_or_else(|| request_not_found(offer.request_id))?;
    user.ensure_owner_or_admin(request.user_id)?;
    if request.status != REQUEST_STATUS_OPEN {
        return Err(not_acceptable(format!("Request is {}", request.status)));
    }
    if offer.status != OFFER_STATUS_PENDING {
        return Err(not_acceptable(format!("Offer is {}", offer.status)));
    }

    // The repository re-checks both statuses under the transaction.
    let accepted = OfferRepo::accept(&state.pool, id)
        .await?
        .ok_or_else(|| not_acceptable("Request was claimed concurrently".into()))?;
    tracing::info!(offer_id = id, request_id = accepted.request_id, "Offer accepted");
    Ok(Json(DataResponse { data: accepted }))
}
