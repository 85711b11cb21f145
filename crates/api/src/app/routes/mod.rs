use axum::Router;

pub mod common;
pub mod drafts;
pub mod expenses;
pub mod people;
pub mod reports;
pub mod system;
pub mod trips;

/// Router for every trip endpoint (password-gated when a password is set).
pub fn router() -> Router {
    Router::new()
        .merge(trips::router())
        .merge(people::router())
        .merge(expenses::router())
        .merge(drafts::router())
        .merge(reports::router())
}
