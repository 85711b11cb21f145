use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use tripsplit_infra::{TripSnapshot, TripState};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route("/trips/:trip_id", get(get_trip).delete(delete_trip))
        .route("/trips/:trip_id/reset", post(reset_trip))
        .route("/trips/:trip_id/import", post(import_trip))
}

pub async fn create_trip(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.create_trip().await {
        Ok(trip) => (StatusCode::CREATED, Json(dto::trip_to_json(&trip))).into_response(),
        Err(e) => errors::infra_error_to_response(e),
    }
}

pub async fn list_trips(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.list_trips().await {
        Ok(ids) => {
            let items = ids.iter().map(ToString::to_string).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::infra_error_to_response(e),
    }
}

pub async fn get_trip(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    match common::load_trip(&services, &trip_id).await {
        Ok(trip) => (StatusCode::OK, Json(dto::trip_to_json(&trip))).into_response(),
        Err(resp) => resp,
    }
}

pub async fn delete_trip(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_trip_id(&trip_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.delete_trip(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::trip_not_found(),
        Err(e) => errors::infra_error_to_response(e),
    }
}

/// Back to the default group with no expenses and no drafts.
pub async fn reset_trip(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    let result = common::update_trip(&services, &trip_id, |trip| {
        *trip = TripState::new(trip.id());
        Ok(())
    })
    .await;
    match result {
        Ok((trip, ())) => {
            tracing::info!(trip_id = %trip.id(), "trip reset");
            (StatusCode::OK, Json(dto::trip_to_json(&trip))).into_response()
        }
        Err(resp) => resp,
    }
}

/// Replace the trip with an exported snapshot.
pub async fn import_trip(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
    body: String,
) -> axum::response::Response {
    let id = match common::parse_trip_id(&trip_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let restored = match TripSnapshot::from_json(&body).and_then(|s| TripState::from_snapshot(id, s)) {
        Ok(state) => state,
        Err(e) => return errors::infra_error_to_response(e),
    };

    let result = common::update_trip(&services, &trip_id, move |trip| {
        *trip = restored;
        Ok(())
    })
    .await;
    match result {
        Ok((trip, ())) => {
            tracing::info!(
                trip_id = %trip.id(),
                people = trip.ledger.people().len(),
                expenses = trip.ledger.expenses().len(),
                "trip imported"
            );
            (StatusCode::OK, Json(dto::trip_to_json(&trip))).into_response()
        }
        Err(resp) => resp,
    }
}
