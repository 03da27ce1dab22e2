//! REST endpoints for bidding rooms: state, the admitted-bid ledger, bid
//! admission, and settlement.

use crate::{
    ApiApplication,
    config::ServerConfig,
    error::{ApiError, internal_error},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mkt_core::{
    models::{
        Amount, BidRecord, DateTimeRangeQuery, DateTimeRangeResponse, RoomPhase, RoomRecord,
        SettleOutcome,
    },
    ports::{Application as _, BidRepository as _, Repository, SettlementRepository as _},
};
use std::sync::Arc;

/// Creates a router with room-related endpoints.
pub fn router<T: ApiApplication>() -> Router<T> {
    Router::new()
        .route("/{room_id}", get(get_room::<T>))
        .route("/{room_id}/bid", post(place_bid::<T>))
        .route("/{room_id}/bids", get(get_bid_history::<T>))
        .route("/{room_id}/settle", post(settle_room::<T>))
}

/// Path parameter for room-specific endpoints.
#[derive(serde::Deserialize)]
struct Id<T> {
    room_id: T,
}

/// Request body for placing a bid.
#[derive(serde::Deserialize)]
struct PlaceBidDto {
    /// The offered price; must strictly beat the floor and the current
    /// highest bid
    price: Amount,
}

/// A room plus its phase as of the request.
#[derive(serde::Serialize)]
struct RoomView<RoomId, ListingId, BidId, UserId, DateTime> {
    #[serde(flatten)]
    room: RoomRecord<RoomId, ListingId, BidId, UserId, DateTime>,
    phase: RoomPhase,
}

/// Fetch a room's state, including its current highest bid.
///
/// # Returns
///
/// - `200 OK`: the room, with its phase computed as of now
/// - `404 Not Found`: no such room
async fn get_room<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { room_id }): Path<Id<<T::Repository as Repository>::RoomId>>,
) -> Result<
    Json<
        RoomView<
            <T::Repository as Repository>::RoomId,
            <T::Repository as Repository>::ListingId,
            <T::Repository as Repository>::BidId,
            <T::Repository as Repository>::UserId,
            <T::Repository as Repository>::DateTime,
        >,
    >,
    ApiError,
> {
    let room = app
        .database()
        .get_room(room_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| ApiError::not_found("room"))?;

    let phase = room.phase(&app.now());
    Ok(Json(RoomView { room, phase }))
}

/// Place a bid.
///
/// # Returns
///
/// - `201 Created`: the admitted bid, now the room's highest
/// - `401 Unauthorized`: no resolvable identity
/// - `404 Not Found`: no such room
/// - `409 Conflict`: the room is closed or the listing sold (terminal)
/// - `422 Unprocessable Entity`: self-bid, or the price is too low
///   (actionable; the body names the least admissible price)
async fn place_bid<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { room_id }): Path<Id<<T::Repository as Repository>::RoomId>>,
    Json(body): Json<PlaceBidDto>,
) -> Result<
    (
        StatusCode,
        Json<
            BidRecord<
                <T::Repository as Repository>::BidId,
                <T::Repository as Repository>::RoomId,
                <T::Repository as Repository>::UserId,
                <T::Repository as Repository>::DateTime,
            >,
        >,
    ),
    ApiError,
> {
    let bidder_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;

    let admitted = app
        .database()
        .place_bid(
            room_id,
            app.generate_bid_id(),
            bidder_id,
            body.price,
            app.now(),
        )
        .await
        .map_err(internal_error)?
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(admitted)))
}

/// Page through a room's admitted-bid ledger, newest first.
///
/// # Returns
///
/// - `200 OK`: one page of bids plus the query for the next page, if any
async fn get_bid_history<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { room_id }): Path<Id<<T::Repository as Repository>::RoomId>>,
    Extension(config): Extension<Arc<ServerConfig>>,
    Query(query): Query<DateTimeRangeQuery<<T::Repository as Repository>::DateTime>>,
) -> Result<
    Json<
        DateTimeRangeResponse<
            BidRecord<
                <T::Repository as Repository>::BidId,
                <T::Repository as Repository>::RoomId,
                <T::Repository as Repository>::UserId,
                <T::Repository as Repository>::DateTime,
            >,
            <T::Repository as Repository>::DateTime,
        >,
    >,
    ApiError,
> {
    let history = app
        .database()
        .get_bids(room_id, query, config.page_limit)
        .await
        .map_err(internal_error)?;

    Ok(Json(history))
}

/// Trigger settlement for a room.
///
/// Settlement normally runs from the periodic sweep; this endpoint lets an
/// operator drive it by hand. Idempotent, like the operation itself.
///
/// # Returns
///
/// - `200 OK`: the settlement outcome (settled, unsold, not yet due, or
///   already settled)
/// - `403 Forbidden`: the identity may not manage the market
/// - `404 Not Found`: no such room
async fn settle_room<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { room_id }): Path<Id<<T::Repository as Repository>::RoomId>>,
) -> Result<Json<SettleOutcome<<T::Repository as Repository>::UserId>>, ApiError> {
    if !app.can_manage_market(&auth).await {
        return Err(ApiError::forbidden());
    }

    let outcome = app
        .database()
        .settle(room_id, app.now())
        .await
        .map_err(internal_error)?
        .ok_or_else(|| ApiError::not_found("room"))?;

    Ok(Json(outcome))
}
