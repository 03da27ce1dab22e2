//! REST endpoints for standing wishes.
//!
//! Wishes are private to their owner: reads and deletes are gated on the
//! authenticated identity matching the wish's owner.

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
    models::{Amount, CreateWishFailure, PriceRange, WishRecord},
    ports::{Application as _, Repository, WishRepository as _},
};

/// Creates a router with wish-related endpoints.
pub fn router<T: ApiApplication>() -> Router<T> {
    Router::new()
        .route("/", post(create_wish::<T>).get(query_wishes::<T>))
        .route("/{wish_id}", get(get_wish::<T>).delete(delete_wish::<T>))
}

/// Path parameter for wish-specific endpoints.
#[derive(serde::Deserialize)]
struct Id<T> {
    wish_id: T,
}

/// Request body for registering a wish.
#[derive(serde::Deserialize)]
struct CreateWishDto<ModelId> {
    /// The wished-for catalog model
    model_id: ModelId,
    /// Inclusive lower bound of the acceptable price
    lower_bound: Amount,
    /// Inclusive upper bound of the acceptable price
    upper_bound: Amount,
}

/// Register a standing wish.
///
/// If an unsold listing of the model already falls inside the range, the
/// wish comes back `available` immediately; otherwise it is `pending` until
/// a matching listing appears.
///
/// # Returns
///
/// - `201 Created`: the wish, with its initial status
/// - `401 Unauthorized`: no resolvable identity
/// - `409 Conflict`: a wish for this model already exists for the caller
/// - `422 Unprocessable Entity`: the price range is inverted
async fn create_wish<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(body): Json<CreateWishDto<<T::Repository as Repository>::ModelId>>,
) -> Result<
    (
        StatusCode,
        Json<
            WishRecord<
                <T::Repository as Repository>::WishId,
                <T::Repository as Repository>::UserId,
                <T::Repository as Repository>::ModelId,
                <T::Repository as Repository>::DateTime,
            >,
        >,
    ),
    ApiError,
> {
    let user_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;

    let range = PriceRange::new(body.lower_bound, body.upper_bound)
        .map_err(|err| ApiError::from(CreateWishFailure::from(err)))?;

    let wish = app
        .database()
        .create_wish(app.generate_wish_id(), user_id, body.model_id, range, app.now())
        .await
        .map_err(internal_error)?
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(wish)))
}

/// List the caller's wishes, newest first.
///
/// # Returns
///
/// - `200 OK`: the caller's wishes
/// - `401 Unauthorized`: no resolvable identity
async fn query_wishes<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<
    Json<
        Vec<
            WishRecord<
                <T::Repository as Repository>::WishId,
                <T::Repository as Repository>::UserId,
                <T::Repository as Repository>::ModelId,
                <T::Repository as Repository>::DateTime,
            >,
        >,
    >,
    ApiError,
> {
    let user_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;

    let wishes = app
        .database()
        .query_wishes(user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(wishes))
}

/// Fetch one of the caller's wishes.
///
/// # Returns
///
/// - `200 OK`: the wish
/// - `401 Unauthorized`: no resolvable identity
/// - `403 Forbidden`: the wish belongs to someone else
/// - `404 Not Found`: no such wish
async fn get_wish<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { wish_id }): Path<Id<<T::Repository as Repository>::WishId>>,
) -> Result<
    Json<
        WishRecord<
            <T::Repository as Repository>::WishId,
            <T::Repository as Repository>::UserId,
            <T::Repository as Repository>::ModelId,
            <T::Repository as Repository>::DateTime,
        >,
    >,
    ApiError,
> {
    let user_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;
    let db = app.database();

    let owner = db
        .get_wish_owner(wish_id.clone())
        .await
        .map_err(internal_error)?
        .ok_or_else(|| ApiError::not_found("wish"))?;
    if owner != user_id {
        return Err(ApiError::forbidden());
    }

    let wish = db
        .get_wish(wish_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| ApiError::not_found("wish"))?;

    Ok(Json(wish))
}

/// Delete one of the caller's wishes.
///
/// # Returns
///
/// - `204 No Content`: deleted
/// - `401 Unauthorized`: no resolvable identity
/// - `403 Forbidden`: the wish belongs to someone else
/// - `404 Not Found`: no such wish
async fn delete_wish<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { wish_id }): Path<Id<<T::Repository as Repository>::WishId>>,
) -> Result<StatusCode, ApiError> {
    let user_id = app
        .authenticate(&auth)
        .await
        .ok_or_else(ApiError::unauthorized)?;
    let db = app.database();

    let owner = db
        .get_wish_owner(wish_id.clone())
        .await
        .map_err(internal_error)?
        .ok_or_else(|| ApiError::not_found("wish"))?;
    if owner != user_id {
        return Err(ApiError::forbidden());
    }

    db.delete_wish(wish_id).await.map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
