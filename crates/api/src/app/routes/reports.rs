use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use tripsplit_infra::{TripReport, export_csv};
use tripsplit_settlement::{TripSummary, compute_balances, compute_settlements};

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/trips/:trip_id/balances", get(balances))
        .route("/trips/:trip_id/settlements", get(settlements))
        .route("/trips/:trip_id/summary", get(summary))
        .route("/trips/:trip_id/export.json", get(export_json))
        .route("/trips/:trip_id/export.csv", get(export_csv_file))
}

pub async fn balances(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    let trip = match common::load_trip(&services, &trip_id).await {
        Ok(trip) => trip,
        Err(resp) => return resp,
    };
    let balances = compute_balances(trip.ledger.people(), trip.ledger.expenses());
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "items": balances,
            "settled": balances.is_settled(),
        })),
    )
        .into_response()
}

pub async fn settlements(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    let trip = match common::load_trip(&services, &trip_id).await {
        Ok(trip) => trip,
        Err(resp) => return resp,
    };
    let balances = compute_balances(trip.ledger.people(), trip.ledger.expenses());
    let plan = compute_settlements(&balances);
    (StatusCode::OK, Json(serde_json::json!({ "items": plan }))).into_response()
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    match common::load_trip(&services, &trip_id).await {
        Ok(trip) => (
            StatusCode::OK,
            Json(TripSummary::compute(trip.ledger.people(), trip.ledger.expenses())),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

pub async fn export_json(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    let trip = match common::load_trip(&services, &trip_id).await {
        Ok(trip) => trip,
        Err(resp) => return resp,
    };
    let now = Utc::now();
    let disposition = attachment(&format!("trip-report-{}.json", now.format("%Y-%m-%d")));
    (
        StatusCode::OK,
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(TripReport::build(&trip, now)),
    )
        .into_response()
}

pub async fn export_csv_file(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    let trip = match common::load_trip(&services, &trip_id).await {
        Ok(trip) => trip,
        Err(resp) => return resp,
    };
    let body = match export_csv(&trip) {
        Ok(body) => body,
        Err(e) => return errors::infra_error_to_response(e),
    };
    let disposition = attachment(&format!("trip-expenses-{}.csv", Utc::now().format("%Y-%m-%d")));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}
