//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: trip store access shared by every handler
//! - `routes/`: HTTP routes + handlers (one file per area of a trip)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// With a password, every route except `/health` requires
/// `Authorization: Bearer <password>`.
pub fn build_app(services: Arc<AppServices>, password: Option<String>) -> Router {
    let mut protected = routes::router().layer(Extension(services));

    if let Some(password) = password {
        let access = middleware::AccessState {
            password: Arc::from(password),
        };
        protected = protected.layer(axum::middleware::from_fn_with_state(
            access,
            middleware::password_middleware,
        ));
    }

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}

pub use services::AppServices;
