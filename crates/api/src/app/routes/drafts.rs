use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use tripsplit_infra::TripState;
use tripsplit_ledger::PersonName;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/trips/:trip_id/drafts/:payer", get(get_draft))
        .route("/trips/:trip_id/drafts/:payer/balance", post(balance_draft))
        .route("/trips/:trip_id/drafts/:payer/:person", put(set_share))
}

pub async fn get_draft(
    Extension(services): Extension<Arc<AppServices>>,
    Path((trip_id, payer)): Path<(String, String)>,
) -> axum::response::Response {
    let trip = match common::load_trip(&services, &trip_id).await {
        Ok(trip) => trip,
        Err(resp) => return resp,
    };
    match dto::person(&trip, &payer) {
        Ok(payer) => (StatusCode::OK, Json(dto::draft_to_json(&trip, &payer))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_share(
    Extension(services): Extension<Arc<AppServices>>,
    Path((trip_id, payer, person)): Path<(String, String, String)>,
    Json(body): Json<dto::SetShareRequest>,
) -> axum::response::Response {
    let result = common::update_trip(&services, &trip_id, move |trip| {
        let payer = dto::person(trip, &payer)?;
        let person = dto::person(trip, &person)?;
        trip.drafts.set_share(&payer, &person, body.percentage);
        Ok(payer)
    })
    .await;
    draft_response(result)
}

/// Give the last person whatever the others leave of 100%.
pub async fn balance_draft(
    Extension(services): Extension<Arc<AppServices>>,
    Path((trip_id, payer)): Path<(String, String)>,
) -> axum::response::Response {
    let result = common::update_trip(&services, &trip_id, move |trip| {
        let payer = dto::person(trip, &payer)?;
        trip.drafts.balance(&payer, trip.ledger.people());
        Ok(payer)
    })
    .await;
    draft_response(result)
}

fn draft_response(
    result: common::HandlerResult<(TripState, PersonName)>,
) -> axum::response::Response {
    match result {
        Ok((trip, payer)) => (StatusCode::OK, Json(dto::draft_to_json(&trip, &payer))).into_response(),
        Err(resp) => resp,
    }
}
