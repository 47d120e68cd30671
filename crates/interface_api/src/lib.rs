//! HTTP API Layer
//!
//! REST interface for the motor insurance core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers for cars, policies, claims, and the
//!   administrative expiration trigger
//! - **DTOs**: request/response data transfer objects (camelCase JSON)
//! - **Error handling**: the domain error taxonomy mapped onto HTTP statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState { cars, expiration });
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_motor::{CarService, ExpirationCheck};

use crate::handlers::{admin, cars, claims, health, policies};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cars: CarService,
    pub expiration: Arc<dyn ExpirationCheck>,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let car_routes = Router::new()
        .route("/", get(cars::list_cars).post(cars::create_car))
        .route("/:car_id/insurance-valid", get(cars::insurance_valid))
        .route("/:car_id/policies", post(policies::create_policy))
        .route("/:car_id/claims", post(claims::register_claim))
        .route("/:car_id/history", get(cars::car_history));

    let admin_routes = Router::new().route("/check-expirations", post(admin::check_expirations));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/cars", car_routes)
        .nest("/api/admin", admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
