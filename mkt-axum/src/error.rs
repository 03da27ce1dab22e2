//! Error payloads for the REST surface.
//!
//! Every expected business refusal maps to a stable machine `code` so that
//! collaborators can distinguish actionable refusals (bid too low: try a
//! higher price) from terminal ones (room closed, listing sold) without
//! string-matching messages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mkt_core::models::{CreateWishFailure, DeleteListingFailure, PlaceBidFailure};
use serde::Serialize;

/// Uniform JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable refusal code
    pub code: &'static str,
    /// Human-readable explanation
    pub message: String,
}

/// The error half of every handler: an HTTP status plus an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// An arbitrary status/code/message triple.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    /// 401: the request carried no resolvable identity.
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "no resolvable identity on the request",
        )
    }

    /// 403: the identity is known but not allowed to do this.
    pub fn forbidden() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "forbidden",
            "not allowed for this identity",
        )
    }

    /// 404 with a short description of what was missing.
    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", format!("no such {what}"))
    }

    /// 500 with an opaque body; the cause goes to the log, not the wire.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "internal error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Log an infrastructure failure and turn it into an opaque 500.
pub(crate) fn internal_error<E: std::fmt::Display>(err: E) -> ApiError {
    tracing::event!(tracing::Level::ERROR, err = %err);
    ApiError::internal()
}

impl From<PlaceBidFailure> for ApiError {
    fn from(failure: PlaceBidFailure) -> Self {
        match failure {
            PlaceBidFailure::RoomNotFound => {
                Self::new(StatusCode::NOT_FOUND, "room_not_found", "no such room")
            }
            PlaceBidFailure::AlreadySold => Self::new(
                StatusCode::CONFLICT,
                "already_sold",
                "the listing has been sold",
            ),
            PlaceBidFailure::RoomClosed => Self::new(
                StatusCode::CONFLICT,
                "room_closed",
                "bidding on this room has closed",
            ),
            PlaceBidFailure::SelfBid => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "self_bid",
                "sellers cannot bid on their own listing",
            ),
            PlaceBidFailure::BidTooLow { minimum } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "bid_too_low",
                format!("bid at least {minimum}"),
            ),
        }
    }
}

impl From<DeleteListingFailure> for ApiError {
    fn from(failure: DeleteListingFailure) -> Self {
        match failure {
            DeleteListingFailure::NotFound => Self::not_found("listing"),
            DeleteListingFailure::NotOwner => Self::new(
                StatusCode::FORBIDDEN,
                "not_owner",
                "only the seller may delete a listing",
            ),
            DeleteListingFailure::AlreadySold => Self::new(
                StatusCode::CONFLICT,
                "already_sold",
                "the listing has been sold",
            ),
            DeleteListingFailure::HasBids => Self::new(
                StatusCode::CONFLICT,
                "has_bids",
                "the listing has admitted bids",
            ),
        }
    }
}

impl From<CreateWishFailure> for ApiError {
    fn from(failure: CreateWishFailure) -> Self {
        match failure {
            CreateWishFailure::InvalidRange { lower, upper } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_range",
                format!("lower bound {lower} exceeds upper bound {upper}"),
            ),
            CreateWishFailure::Duplicate => Self::new(
                StatusCode::CONFLICT,
                "duplicate_wish",
                "a wish for this model already exists",
            ),
        }
    }
}
