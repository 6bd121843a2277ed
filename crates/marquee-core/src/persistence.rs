use marquee_config::PathManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// The only state that survives a restart. List caches are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistKey {
    Watchlist,
    Session,
}

impl PersistKey {
    pub const ALL: [PersistKey; 2] = [PersistKey::Watchlist, PersistKey::Session];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersistKey::Watchlist => "watchlist",
            PersistKey::Session => "session",
        }
    }
}

impl fmt::Display for PersistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to write {key} snapshot: {source}")]
    Io {
        key: PersistKey,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {key} snapshot: {source}")]
    Serialize {
        key: PersistKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create state directory {path}: {source}")]
    StateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to purge snapshots: {}", .0.join("; "))]
    Purge(Vec<String>),
}

/// Durable JSON snapshots, one file per key.
///
/// A snapshot has hit the disk when `snapshot` returns, so the next
/// `restore` of that key sees it.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    state_dir: PathBuf,
}

impl PersistenceGateway {
    pub fn new(path_manager: &PathManager) -> Result<Self, PersistenceError> {
        Self::with_dir(path_manager.state_dir())
    }

    pub fn with_dir(state_dir: PathBuf) -> Result<Self, PersistenceError> {
        std::fs::create_dir_all(&state_dir).map_err(|source| PersistenceError::StateDir {
            path: state_dir.clone(),
            source,
        })?;
        Ok(Self { state_dir })
    }

    fn snapshot_path(&self, key: PersistKey) -> PathBuf {
        self.state_dir.join(format!("{}.json", key.as_str()))
    }

    pub fn exists(&self, key: PersistKey) -> bool {
        self.snapshot_path(key).exists()
    }

    pub fn snapshot<T: Serialize + ?Sized>(&self, key: PersistKey, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| PersistenceError::Serialize { key, source })?;

        // Atomic write: temp file, then rename over the snapshot
        let path = self.snapshot_path(key);
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|source| PersistenceError::Io { key, source })?;
        std::fs::rename(&temp_path, &path).map_err(|source| PersistenceError::Io { key, source })?;

        debug!("Snapshot saved: {}", key);
        Ok(())
    }

    /// Last snapshot for `key`, or the default when there is none or it is unreadable
    pub fn restore<T>(&self, key: PersistKey) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.snapshot_path(key);

        if !path.exists() {
            debug!("Snapshot miss: {} (file does not exist)", key);
            return T::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(value) => {
                    info!("Restored {} snapshot", key);
                    value
                }
                Err(e) => {
                    warn!(
                        "Snapshot corruption detected for {}: {}. Deleting corrupted file.",
                        key, e
                    );
                    if let Err(rm_err) = std::fs::remove_file(&path) {
                        warn!("Failed to delete corrupted snapshot: {}", rm_err);
                    }
                    T::default()
                }
            },
            Err(e) => {
                warn!("Failed to read snapshot for {}: {}", key, e);
                T::default()
            }
        }
    }

    /// Remove every persisted key. Each removal is attempted even if an
    /// earlier one failed; all failures are reported together.
    pub fn purge(&self) -> Result<(), PersistenceError> {
        let mut failures = Vec::new();

        for key in PersistKey::ALL {
            let path = self.snapshot_path(key);
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("Purged {} snapshot", key),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!("Failed to purge {} snapshot: {}", key, e);
                    failures.push(format!("{}: {}", key, e));
                }
            }
        }

        if failures.is_empty() {
            info!("Purged all persisted state");
            Ok(())
        } else {
            Err(PersistenceError::Purge(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn gateway() -> (TempDir, PersistenceGateway) {
        let dir = TempDir::new().unwrap();
        let gateway = PersistenceGateway::with_dir(dir.path().join("state")).unwrap();
        (dir, gateway)
    }

    #[test]
    fn test_snapshot_then_restore() {
        let (_dir, gateway) = gateway();
        gateway.snapshot(PersistKey::Watchlist, &vec![1u64, 2, 3]).unwrap();

        let restored: Vec<u64> = gateway.restore(PersistKey::Watchlist);
        assert_eq!(restored, vec![1, 2, 3]);
        assert!(!gateway.exists(PersistKey::Session));
    }

    #[test]
    fn test_restore_missing_is_default() {
        let (_dir, gateway) = gateway();
        let restored: Vec<u64> = gateway.restore(PersistKey::Watchlist);
        assert!(restored.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let (dir, gateway) = gateway();
        let path = dir.path().join("state").join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let restored: Vec<String> = gateway.restore(PersistKey::Session);
        assert!(restored.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_purge_removes_every_key() {
        let (_dir, gateway) = gateway();
        gateway.snapshot(PersistKey::Watchlist, &vec![1u64]).unwrap();
        gateway.snapshot(PersistKey::Session, &true).unwrap();

        gateway.purge().unwrap();
        assert!(!gateway.exists(PersistKey::Watchlist));
        assert!(!gateway.exists(PersistKey::Session));

        // Nothing left to remove is not a failure
        gateway.purge().unwrap();
    }

    #[test]
    fn test_purge_continues_past_failures() {
        let (dir, gateway) = gateway();
        // A directory where the watchlist file should be cannot be removed with remove_file
        std::fs::create_dir(dir.path().join("state").join("watchlist.json")).unwrap();
        gateway.snapshot(PersistKey::Session, &true).unwrap();

        let err = gateway.purge().unwrap_err();
        assert!(matches!(err, PersistenceError::Purge(ref failures) if failures.len() == 1));
        assert!(err.to_string().contains("watchlist"));
        assert!(!gateway.exists(PersistKey::Session));
    }
}
