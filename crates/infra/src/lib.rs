//! Infrastructure layer: configuration, trip persistence, import/export.

pub mod config;
pub mod error;
pub mod export;
pub mod snapshot;
pub mod trip_store;

pub use config::{AppConfig, ConfigError};
pub use export::{TripReport, export_csv};
pub use error::InfraError;
pub use snapshot::{TripSnapshot, TripState};
pub use trip_store::{InMemoryTripStore, JsonFileTripStore, TripStore, build_store};
