use std::sync::Arc;

use tripsplit_core::{DomainResult, TripId};

use crate::error::InfraError;
use crate::snapshot::TripState;

/// Keyed storage of trips.
///
/// Implementations must:
/// - return clones from `get` (callers never hold a reference into the store)
/// - run `modify` as one read-modify-write, serialized against other writes
/// - leave the stored trip untouched when the `modify` closure fails
pub trait TripStore: Send + Sync {
    fn get(&self, id: TripId) -> Result<Option<TripState>, InfraError>;

    /// Insert or replace the trip `state.id()`.
    fn put(&self, state: TripState) -> Result<(), InfraError>;

    /// Returns `false` when the trip did not exist.
    fn remove(&self, id: TripId) -> Result<bool, InfraError>;

    /// All trip ids, ascending (oldest first for v7 ids).
    fn list(&self) -> Result<Vec<TripId>, InfraError>;

    /// Apply `f` to a working copy of the trip and store it if `f` succeeds.
    ///
    /// `Ok(None)` when the trip does not exist; a closure error surfaces as
    /// [`InfraError::Domain`].
    fn modify(
        &self,
        id: TripId,
        f: &mut dyn FnMut(&mut TripState) -> DomainResult<()>,
    ) -> Result<Option<TripState>, InfraError>;
}

impl<S> TripStore for Arc<S>
where
    S: TripStore + ?Sized,
{
    fn get(&self, id: TripId) -> Result<Option<TripState>, InfraError> {
        (**self).get(id)
    }

    fn put(&self, state: TripState) -> Result<(), InfraError> {
        (**self).put(state)
    }

    fn remove(&self, id: TripId) -> Result<bool, InfraError> {
        (**self).remove(id)
    }

    fn list(&self) -> Result<Vec<TripId>, InfraError> {
        (**self).list()
    }

    fn modify(
        &self,
        id: TripId,
        f: &mut dyn FnMut(&mut TripState) -> DomainResult<()>,
    ) -> Result<Option<TripState>, InfraError> {
        (**self).modify(id, f)
    }
}
