use std::sync::Arc;

use tripsplit_core::{DomainError, DomainResult, TripId};
use tripsplit_infra::{AppConfig, InMemoryTripStore, InfraError, TripState, TripStore, build_store};

/// Services shared by all handlers.
///
/// Store calls may touch the filesystem, so every one of them runs on the
/// blocking pool rather than on an executor thread.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn TripStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn TripStore>) -> Self {
        Self { store }
    }

    /// Store selected by configuration (JSON files or memory).
    pub fn from_config(config: &AppConfig) -> Result<Self, InfraError> {
        Ok(Self::new(build_store(config)?))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTripStore::new()))
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, InfraError>
    where
        F: FnOnce(&dyn TripStore) -> Result<T, InfraError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| InfraError::Background(e.to_string()))?
    }

    /// New trip with the default group.
    pub async fn create_trip(&self) -> Result<TripState, InfraError> {
        let state = TripState::new(TripId::new());
        let stored = state.clone();
        self.blocking(move |store| store.put(stored)).await?;
        tracing::info!(trip_id = %state.id(), "trip created");
        Ok(state)
    }

    pub async fn list_trips(&self) -> Result<Vec<TripId>, InfraError> {
        self.blocking(|store| store.list()).await
    }

    pub async fn trip(&self, id: TripId) -> Result<Option<TripState>, InfraError> {
        self.blocking(move |store| store.get(id)).await
    }

    pub async fn delete_trip(&self, id: TripId) -> Result<bool, InfraError> {
        let removed = self.blocking(move |store| store.remove(id)).await?;
        if removed {
            tracing::info!(trip_id = %id, "trip deleted");
        }
        Ok(removed)
    }

    /// Read-modify-write of one trip; nothing is stored if `f` fails.
    ///
    /// Returns the stored state together with whatever `f` produced.
    pub async fn update_trip<F, R>(&self, id: TripId, f: F) -> Result<Option<(TripState, R)>, InfraError>
    where
        F: FnOnce(&mut TripState) -> DomainResult<R> + Send + 'static,
        R: Send + 'static,
    {
        self.blocking(move |store| {
            let mut f = Some(f);
            let mut out = None;
            let stored = store.modify(id, &mut |trip: &mut TripState| {
                let f = f
                    .take()
                    .ok_or_else(|| DomainError::invariant("trip update applied twice"))?;
                out = Some(f(trip)?);
                Ok(())
            })?;
            Ok(stored.zip(out))
        })
        .await
    }
}
