use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};

use tripsplit_core::DomainError;
use tripsplit_ledger::ExpenseId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/trips/:trip_id/expenses", post(add_expense).get(list_expenses))
        .route("/trips/:trip_id/expenses/:expense_id", delete(remove_expense))
}

pub async fn list_expenses(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
) -> axum::response::Response {
    match common::load_trip(&services, &trip_id).await {
        Ok(trip) => (
            StatusCode::OK,
            Json(serde_json::json!({ "items": trip.ledger.expenses() })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

pub async fn add_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Path(trip_id): Path<String>,
    Json(body): Json<dto::AddExpenseRequest>,
) -> axum::response::Response {
    let result = common::update_trip(&services, &trip_id, move |trip| {
        let cmd = dto::to_add_expense(&body, trip)?;
        trip.ledger.add_expense(cmd)
    })
    .await;

    let (trip, added) = match result {
        Ok(updated) => updated,
        Err(resp) => return resp,
    };

    match trip.ledger.expense(added) {
        Some(expense) => {
            tracing::info!(trip_id = %trip.id(), expense_id = %expense.id, amount = expense.amount, "expense recorded");
            (StatusCode::CREATED, Json(expense)).into_response()
        }
        None => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "recorded expense is missing",
        ),
    }
}

pub async fn remove_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Path((trip_id, expense_id)): Path<(String, String)>,
) -> axum::response::Response {
    let id = match expense_id.parse::<u64>() {
        Ok(v) => ExpenseId::new(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid expense id");
        }
    };

    let result = common::update_trip(&services, &trip_id, move |trip| {
        if trip.ledger.remove_expense(id) {
            Ok(())
        } else {
            Err(DomainError::not_found())
        }
    })
    .await;
    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(resp) => resp,
    }
}
