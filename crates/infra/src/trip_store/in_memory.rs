use std::collections::HashMap;
use std::sync::RwLock;

use tripsplit_core::{DomainResult, TripId};

use super::r#trait::TripStore;
use crate::error::InfraError;
use crate::snapshot::TripState;

/// In-memory trip store.
///
/// Intended for tests/dev. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryTripStore {
    trips: RwLock<HashMap<TripId, TripState>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripStore for InMemoryTripStore {
    fn get(&self, id: TripId) -> Result<Option<TripState>, InfraError> {
        let trips = self.trips.read().map_err(|_| InfraError::LockPoisoned)?;
        Ok(trips.get(&id).cloned())
    }

    fn put(&self, state: TripState) -> Result<(), InfraError> {
        let mut trips = self.trips.write().map_err(|_| InfraError::LockPoisoned)?;
        trips.insert(state.id(), state);
        Ok(())
    }

    fn remove(&self, id: TripId) -> Result<bool, InfraError> {
        let mut trips = self.trips.write().map_err(|_| InfraError::LockPoisoned)?;
        Ok(trips.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<TripId>, InfraError> {
        let trips = self.trips.read().map_err(|_| InfraError::LockPoisoned)?;
        let mut ids: Vec<TripId> = trips.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn modify(
        &self,
        id: TripId,
        f: &mut dyn FnMut(&mut TripState) -> DomainResult<()>,
    ) -> Result<Option<TripState>, InfraError> {
        let mut trips = self.trips.write().map_err(|_| InfraError::LockPoisoned)?;
        let Some(stored) = trips.get_mut(&id) else {
            return Ok(None);
        };

        let mut working = stored.clone();
        f(&mut working)?;
        *stored = working.clone();
        Ok(Some(working))
    }
}
