use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};

use crate::app::dto;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/trips/:trip_id/people", post(add_person))
        .route("/trips/:trip_id/people/:name", delete(remove_person))
}

pub async fn add_person(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
    Json(body): Json<dto::AddPersonRequest>,
) -> axum::response::Response {
    match common::update_trip(&services, &trip_id, move |trip| trip.add_person(&body.name)).await {
        Ok((trip, _)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "people": trip.ledger.people() })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

/// Payments the person made move to the first remaining person.
pub async fn remove_person(
    Extension(services): Extension<Arc<AppServices>>,
    Path((trip_id, name)): Path<(String, String)>,
) -> axum::response::Response {
    match common::update_trip(&services, &trip_id, move |trip| trip.remove_person(&name)).await {
        Ok((trip, ())) => (
            StatusCode::OK,
            Json(serde_json::json!({ "people": trip.ledger.people() })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}
