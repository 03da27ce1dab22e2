#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod error;
mod listing_routes;
mod room_routes;
mod wish_routes;

pub mod config;

pub use error::{ApiError, ErrorBody};

use axum::{Extension, Json, Router, routing::get};
use config::ServerConfig;
use headers::{Authorization, authorization::Bearer};
use mkt_core::ports::{Application, Repository};
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

/// Response for the health check endpoint
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct the full API router with the given state and config.
pub fn router<T: ApiApplication>(state: T, config: ServerConfig) -> Router {
    // collaborators drive the bid and wish flows from browser contexts
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/listing", listing_routes::router())
        .nest("/room", room_routes::router())
        .nest("/wish", wish_routes::router())
        .layer(cors)
        .layer(Extension(Arc::new(config)))
        .with_state(state)
}

/// Starts the HTTP server with the provided configuration.
pub async fn start_server<T: ApiApplication>(
    config: ServerConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state and for
/// extractor/response types. This trait, coupled with a blanket
/// implementation, specifies them all upfront and in one place: a function
/// taking a generic `T: ApiApplication` can extract every identifier from a
/// path, deserialize every request body, and serialize every record.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            Error: Display,
            DateTime: Display + Serialize + DeserializeOwned + Send + Sync,
            UserId: Display + Serialize + DeserializeOwned + Send + Sync,
            ModelId: Display + Serialize + DeserializeOwned + Send + Sync,
            ListingId: Display + Serialize + DeserializeOwned + Send + Sync,
            RoomId: Display + Serialize + DeserializeOwned + Send + Sync,
            BidId: Display + Serialize + DeserializeOwned + Send + Sync,
            WishId: Display + Serialize + DeserializeOwned + Send + Sync,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                Error: Display,
                DateTime: Display + Serialize + DeserializeOwned + Send + Sync,
                UserId: Display + Serialize + DeserializeOwned + Send + Sync,
                ModelId: Display + Serialize + DeserializeOwned + Send + Sync,
                ListingId: Display + Serialize + DeserializeOwned + Send + Sync,
                RoomId: Display + Serialize + DeserializeOwned + Send + Sync,
                BidId: Display + Serialize + DeserializeOwned + Send + Sync,
                WishId: Display + Serialize + DeserializeOwned + Send + Sync,
            >,
        >
{
}
