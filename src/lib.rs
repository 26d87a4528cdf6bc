//! Movement and location service.
//!
//! Two independent JSON handlers over two single-table stores:
//!
//! - **Movements**: income/expense entries with full CRUD
//! - **Locations**: append-only geolocation pings (create and list)
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: PostgreSQL with sqlx, or in-memory maps, behind the
//!   `MovementStore` / `LocationStore` traits
//! - **Amounts**: exact decimals (`rust_decimal`), encoded to JSON only at the
//!   response boundary
//! - **Gateway**: API-gateway style events can be driven through the same
//!   routers without an HTTP listener (see [`gateway`])

pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, options},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{locations, movements, preflight};
use crate::middleware::cors::{self, cors_middleware};
use crate::store::{SharedLocationStore, SharedMovementStore};

/// Routes of the movement handler.
///
/// Methods a route does not list fall through to the 405 movement body.
/// HEAD is routed there explicitly, since `get` would otherwise answer it.
pub fn movement_routes(store: SharedMovementStore) -> Router {
    Router::new()
        .route(
            "/movements",
            get(movements::list_movements)
                .post(movements::create_movement)
                .head(movements::method_not_supported)
                .options(preflight)
                .fallback(movements::method_not_supported),
        )
        .route(
            "/movements/{movement_id}",
            get(movements::list_movements)
                .post(movements::create_movement)
                .put(movements::update_movement)
                .delete(movements::delete_movement)
                .head(movements::method_not_supported)
                .options(preflight)
                .fallback(movements::method_not_supported),
        )
        .layer(axum_middleware::from_fn_with_state(
            cors::MOVEMENTS,
            cors_middleware,
        ))
        .with_state(store)
}

/// Routes of the location handler.
pub fn location_routes(store: SharedLocationStore) -> Router {
    Router::new()
        .route(
            "/locations",
            options(preflight)
                .get(locations::list_locations)
                .post(locations::create_location)
                .head(locations::method_not_allowed)
                .fallback(locations::method_not_allowed),
        )
        .layer(axum_middleware::from_fn_with_state(
            cors::LOCATIONS,
            cors_middleware,
        ))
        .with_state(store)
}

/// Both handlers behind one listener, with request tracing.
pub fn app(movement_store: SharedMovementStore, location_store: SharedLocationStore) -> Router {
    Router::new()
        .merge(movement_routes(movement_store))
        .merge(location_routes(location_store))
        .layer(TraceLayer::new_for_http())
}
