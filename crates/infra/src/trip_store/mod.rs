//! Trip persistence boundary.
//!
//! Stores hold whole [`TripState`](crate::snapshot::TripState) values keyed by
//! [`TripId`](tripsplit_core::TripId). Reads hand out clones; writes replace
//! the stored value, so a rejected edit never leaves a trip half-updated.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

use std::sync::Arc;

pub use in_memory::InMemoryTripStore;
pub use json_file::JsonFileTripStore;
pub use r#trait::TripStore;

use crate::config::AppConfig;
use crate::error::InfraError;

/// Pick the store the configuration asks for.
pub fn build_store(config: &AppConfig) -> Result<Arc<dyn TripStore>, InfraError> {
    match &config.data_dir {
        Some(dir) => {
            tracing::info!(data_dir = %dir.display(), "using JSON file trip store");
            Ok(Arc::new(JsonFileTripStore::open(dir)?))
        }
        None => {
            tracing::info!("using in-memory trip store; trips are lost on restart");
            Ok(Arc::new(InMemoryTripStore::new()))
        }
    }
}
