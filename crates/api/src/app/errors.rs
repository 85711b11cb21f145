use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tripsplit_core::DomainError;
use tripsplit_infra::InfraError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn infra_error_to_response(err: InfraError) -> axum::response::Response {
    match err {
        InfraError::Domain(e) => domain_error_to_response(e),
        InfraError::InvalidSnapshot(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_snapshot", msg)
        }
        other => {
            tracing::error!(error = %other, "trip store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                other.to_string(),
            )
        }
    }
}

pub fn trip_not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "trip not found")
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
