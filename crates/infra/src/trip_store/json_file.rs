use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tempfile::NamedTempFile;

use tripsplit_core::{DomainResult, TripId};

use super::r#trait::TripStore;
use crate::error::InfraError;
use crate::snapshot::{TripSnapshot, TripState};

const EXTENSION: &str = "json";

/// One `<trip id>.json` snapshot file per trip in a directory.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crash never leaves a truncated trip behind. A process-wide
/// mutex serializes every access; the store is not meant to be shared by
/// several processes.
#[derive(Debug)]
pub struct JsonFileTripStore {
    dir: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileTripStore {
    /// Open (creating if needed) the data directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, InfraError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            guard: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: TripId) -> PathBuf {
        self.dir.join(format!("{id}.{EXTENSION}"))
    }

    fn read(&self, id: TripId) -> Result<Option<TripState>, InfraError> {
        let raw = match fs::read_to_string(self.path_for(id)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = TripSnapshot::from_json(&raw)?;
        Ok(Some(TripState::from_snapshot(id, snapshot)?))
    }

    fn write(&self, state: &TripState) -> Result<(), InfraError> {
        let json = state.to_snapshot(Utc::now()).to_json_pretty()?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(state.id()))
            .map_err(|e| InfraError::Io(e.error))?;

        tracing::debug!(trip_id = %state.id(), "trip written");
        Ok(())
    }
}

impl TripStore for JsonFileTripStore {
    fn get(&self, id: TripId) -> Result<Option<TripState>, InfraError> {
        let _guard = self.guard.lock().map_err(|_| InfraError::LockPoisoned)?;
        self.read(id)
    }

    fn put(&self, state: TripState) -> Result<(), InfraError> {
        let _guard = self.guard.lock().map_err(|_| InfraError::LockPoisoned)?;
        self.write(&state)
    }

    fn remove(&self, id: TripId) -> Result<bool, InfraError> {
        let _guard = self.guard.lock().map_err(|_| InfraError::LockPoisoned)?;
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<TripId>, InfraError> {
        let _guard = self.guard.lock().map_err(|_| InfraError::LockPoisoned)?;

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match stem.parse::<TripId>() {
                Ok(id) => ids.push(id),
                Err(_) => {
                    tracing::warn!(path = %path.display(), "skipping file with non-trip name");
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn modify(
        &self,
        id: TripId,
        f: &mut dyn FnMut(&mut TripState) -> DomainResult<()>,
    ) -> Result<Option<TripState>, InfraError> {
        let _guard = self.guard.lock().map_err(|_| InfraError::LockPoisoned)?;
        let Some(mut state) = self.read(id)? else {
            return Ok(None);
        };
        f(&mut state)?;
        self.write(&state)?;
        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripsplit_ledger::{AddExpense, SplitMethod};

    fn hotel() -> AddExpense {
        AddExpense {
            description: "Hotel".to_string(),
            amount: 200.0,
            paid_by: "Person 1".to_string(),
            split: SplitMethod::Equal,
        }
    }

    #[test]
    fn trips_survive_reopening_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut trip = TripState::new(TripId::new());
        trip.ledger.add_expense(hotel()).unwrap();

        {
            let store = JsonFileTripStore::open(dir.path()).unwrap();
            store.put(trip.clone()).unwrap();
        }

        let store = JsonFileTripStore::open(dir.path()).unwrap();
        let loaded = store.get(trip.id()).unwrap().unwrap();
        assert_eq!(loaded.ledger.people(), trip.ledger.people());
        assert_eq!(loaded.ledger.expenses(), trip.ledger.expenses());
        assert_eq!(store.list().unwrap(), vec![trip.id()]);
    }

    #[test]
    fn missing_trip_is_none_and_remove_reports_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTripStore::open(dir.path()).unwrap();
        let id = TripId::new();

        assert_eq!(store.get(id).unwrap(), None);
        assert!(!store.remove(id).unwrap());

        store.put(TripState::new(id)).unwrap();
        assert!(store.remove(id).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn failed_modify_does_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTripStore::open(dir.path()).unwrap();
        let trip = TripState::new(TripId::new());
        store.put(trip.clone()).unwrap();

        let before = fs::read_to_string(store.path_for(trip.id())).unwrap();
        let err = store
            .modify(trip.id(), &mut |t| t.remove_person("Nobody"))
            .unwrap_err();
        assert!(matches!(err, InfraError::Domain(_)));

        let after = fs::read_to_string(store.path_for(trip.id())).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn list_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::write(dir.path().join("not-a-uuid.json"), "{}").unwrap();

        let store = JsonFileTripStore::open(dir.path()).unwrap();
        let id = TripId::new();
        store.put(TripState::new(id)).unwrap();

        assert_eq!(store.list().unwrap(), vec![id]);
    }

    #[test]
    fn corrupt_file_is_an_invalid_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTripStore::open(dir.path()).unwrap();
        let id = TripId::new();
        fs::write(store.path_for(id), "{\"people\": 3}").unwrap();

        assert!(matches!(store.get(id), Err(InfraError::InvalidSnapshot(_))));
    }
}
