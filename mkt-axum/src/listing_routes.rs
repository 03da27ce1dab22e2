//! REST endpoints for listings.
//!
//! Creating a listing opens its bidding room and promotes matching standing
//! wishes as one unit; deleting one is refused as soon as any bid exists.

use crate::{
    ApiApplication,
    error::{ApiError, internal_error},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mkt_core::{
    models::{Amount, ListingCreated, ListingRecord},
    ports::{Application as _, ListingRepository as _, Repository},
};

/// Creates a router with listing-related endpoints.
pub fn router<T: ApiApplication>() -> Router<T> {
    Router::new()
        .route("/", post(create_listing::<T>))
        .route(
            "/{listing_id}",
            get(get_listing::<T>).delete(delete_listing::<T>),
        )
}

/// Path parameter for listing-specific endpoints.
#[derive(serde::Deserialize)]
struct Id<T> {
    listing_id: T,
}

/// Request body for creating a new listing.
#[derive(serde::Deserialize)]
struct CreateListingDto<ModelId, DateTime> {
    /// Catalog model of the listed item
    model_id: ModelId,
    /// The ask, and the bidding floor
    price: Amount,
    /// Bidding deadline for the room opened alongside the listing
    closes_at: DateTime,
}

/// Create a listing and open its bidding room.
///
/// The caller becomes the seller. Standing wishes matching the model and
/// price are promoted in the same unit of work; the response reports how
/// many.
///
/// # Returns
///
/// - `201 Created`: the listing, its room id, and the promoted-wish count
/// - `401 Unauthorized`: no resolvable identity
/// - `422 Unprocessable Entity`: the deadline is not in the future
async fn create_listing<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(body): Json<
        CreateListingDto<
            <T::Repository as Repository>::ModelId,
            <T::Repository as Repository>::DateTime,
        >,
    >,
) -> Result<
    (
        StatusCode,
        Json<
            ListingCreated<
                <T::Repository as Repository>::ListingId,
                <T::Repository as Repository>::RoomId,
                <T::Repository as Repository>::UserId,
                <T::Repository as Repository>::ModelId,
                <T::Repository as Repository>::DateTime,
            >,
        >,
    ),
    ApiError,
> {
    let db = app.database();
    let seller_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;

    let as_of = app.now();
    if body.closes_at <= as_of {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_deadline",
            "the bidding deadline must be in the future",
        ));
    }

    let created = db
        .create_listing(
            app.generate_listing_id(),
            app.generate_room_id(),
            seller_id,
            body.model_id,
            body.price,
            body.closes_at,
            as_of,
        )
        .await
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch a listing.
///
/// # Returns
///
/// - `200 OK`: the listing
/// - `404 Not Found`: no such listing
async fn get_listing<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { listing_id }): Path<Id<<T::Repository as Repository>::ListingId>>,
) -> Result<
    Json<
        ListingRecord<
            <T::Repository as Repository>::ListingId,
            <T::Repository as Repository>::UserId,
            <T::Repository as Repository>::ModelId,
            <T::Repository as Repository>::DateTime,
        >,
    >,
    ApiError,
> {
    let listing = app
        .database()
        .get_listing(listing_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| ApiError::not_found("listing"))?;

    Ok(Json(listing))
}

/// Delete an unsold listing with an empty ledger.
///
/// # Returns
///
/// - `204 No Content`: deleted, along with its room
/// - `401 Unauthorized`: no resolvable identity
/// - `403 Forbidden`: the caller is not the seller
/// - `404 Not Found`: no such listing
/// - `409 Conflict`: the listing has bids or is already sold
async fn delete_listing<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { listing_id }): Path<Id<<T::Repository as Repository>::ListingId>>,
) -> Result<StatusCode, ApiError> {
    let acting_user_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;

    app.database()
        .delete_listing(listing_id, acting_user_id)
        .await
        .map_err(internal_error)?
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
