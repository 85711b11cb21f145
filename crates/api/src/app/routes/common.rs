use axum::http::StatusCode;

use tripsplit_core::{DomainResult, TripId};
use tripsplit_infra::TripState;

use crate::app::errors;
use crate::app::services::AppServices;

pub type HandlerResult<T> = Result<T, axum::response::Response>;

pub fn parse_trip_id(raw: &str) -> HandlerResult<TripId> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid trip id"))
}

/// Current state of the trip named in the path, or the error response.
pub async fn load_trip(services: &AppServices, raw_id: &str) -> HandlerResult<TripState> {
    let id = parse_trip_id(raw_id)?;
    match services.trip(id).await {
        Ok(Some(state)) => Ok(state),
        Ok(None) => Err(errors::trip_not_found()),
        Err(e) => Err(errors::infra_error_to_response(e)),
    }
}

/// Apply `f` to the trip named in the path; returns the stored trip and the
/// value `f` produced.
pub async fn update_trip<F, R>(services: &AppServices, raw_id: &str, f: F) -> HandlerResult<(TripState, R)>
where
    F: FnOnce(&mut TripState) -> DomainResult<R> + Send + 'static,
    R: Send + 'static,
{
    let id = parse_trip_id(raw_id)?;
    match services.update_trip(id, f).await {
        Ok(Some(updated)) => Ok(updated),
        Ok(None) => Err(errors::trip_not_found()),
        Err(e) => Err(errors::infra_error_to_response(e)),
    }
}
