use crate::persistence::{PersistKey, PersistenceGateway};
use marquee_models::{Movie, MovieId, WatchlistEntry};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Ordered set of watchlist entries keyed by movie id.
///
/// Insertion order is kept for display; `contains` goes through the id index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
    index: HashSet<MovieId>,
}

impl Watchlist {
    /// Build from stored entries. A duplicated id keeps its first entry.
    pub fn from_entries(entries: impl IntoIterator<Item = WatchlistEntry>) -> Self {
        let mut watchlist = Self::default();
        for entry in entries {
            watchlist.insert(entry);
        }
        watchlist
    }

    fn insert(&mut self, entry: WatchlistEntry) -> bool {
        if !self.index.insert(entry.id()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Add `movie` unless its id is already present
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.insert(WatchlistEntry::new(movie))
    }

    pub fn remove(&mut self, id: MovieId) -> bool {
        if !self.index.remove(&id) {
            return false;
        }
        self.entries.retain(|e| e.id() != id);
        true
    }

    /// Returns false when the list was already empty
    pub fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.clear();
        self.index.clear();
        true
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.index.contains(&id)
    }

    pub fn get(&self, id: MovieId) -> Option<&WatchlistEntry> {
        if !self.contains(id) {
            return None;
        }
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Snapshots are a plain JSON array of entries; the index is rebuilt on load
impl Serialize for Watchlist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Watchlist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<WatchlistEntry>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}

/// Persisted, deduplicated watchlist
pub struct WatchlistStore {
    state: watch::Sender<Watchlist>,
    persistence: Arc<PersistenceGateway>,
}

impl WatchlistStore {
    /// Rehydrate from the last snapshot, or start empty
    pub fn restore(persistence: Arc<PersistenceGateway>) -> Self {
        let watchlist: Watchlist = persistence.restore(PersistKey::Watchlist);
        info!(entries = watchlist.len(), "Watchlist restored");
        let (state, _) = watch::channel(watchlist);
        Self { state, persistence }
    }

    pub fn add(&self, movie: Movie) -> bool {
        let id = movie.id;
        let title = movie.title.clone();
        let added = self.state.send_if_modified(|list| list.add(movie));
        if added {
            info!(id, title = %title, "Added to watchlist");
            self.persist();
        }
        added
    }

    pub fn remove(&self, id: MovieId) -> bool {
        let removed = self.state.send_if_modified(|list| list.remove(id));
        if removed {
            info!(id, "Removed from watchlist");
            self.persist();
        }
        removed
    }

    pub fn clear(&self) {
        let cleared = self.state.send_if_modified(Watchlist::clear);
        if cleared {
            info!("Watchlist cleared");
        }
        self.persist();
    }

    /// Drop the in-memory entries without writing a snapshot. Used on logout,
    /// where the durable copy is purged separately.
    pub(crate) fn forget(&self) {
        self.state.send_if_modified(Watchlist::clear);
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.state.borrow().contains(id)
    }

    pub fn get(&self, id: MovieId) -> Option<WatchlistEntry> {
        self.state.borrow().get(id).cloned()
    }

    pub fn entries(&self) -> Vec<WatchlistEntry> {
        self.state.borrow().entries().to_vec()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Watchlist> {
        self.state.subscribe()
    }

    fn persist(&self) {
        let snapshot = self.state.borrow().clone();
        if let Err(e) = self.persistence.snapshot(PersistKey::Watchlist, &snapshot) {
            warn!("Failed to persist watchlist: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::movie;
    use tempfile::TempDir;

    fn store() -> (TempDir, Arc<PersistenceGateway>, WatchlistStore) {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(PersistenceGateway::with_dir(dir.path().to_path_buf()).unwrap());
        let store = WatchlistStore::restore(gateway.clone());
        (dir, gateway, store)
    }

    fn ids(store: &WatchlistStore) -> Vec<MovieId> {
        store.entries().iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let (_dir, _gateway, store) = store();

        assert!(store.add(movie(5)));
        assert!(!store.add(movie(5)));

        assert_eq!(store.len(), 1);
        assert!(store.contains(5));
        assert!(store.get(5).unwrap().watchlist_added);
    }

    #[test]
    fn test_first_add_wins() {
        let (_dir, _gateway, store) = store();
        let mut renamed = movie(5);
        renamed.title = "Renamed".to_string();

        store.add(movie(5));
        store.add(renamed);

        assert_eq!(store.get(5).unwrap().movie.title, "Movie 5");
    }

    #[test]
    fn test_add_then_remove_restores_previous_list() {
        let (_dir, _gateway, store) = store();
        store.add(movie(1));
        store.add(movie(2));
        let before = ids(&store);

        assert!(store.add(movie(3)));
        assert!(store.remove(3));

        assert_eq!(ids(&store), before);
        assert!(!store.contains(3));
    }

    #[test]
    fn test_remove_absent_id_is_a_no_op() {
        let (_dir, _gateway, store) = store();
        for id in [1, 2, 3] {
            store.add(movie(id));
        }

        assert!(!store.remove(99));
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let (_dir, gateway, store) = store();
        store.add(movie(1));
        store.add(movie(2));
        store.remove(1);

        let restored = WatchlistStore::restore(gateway);
        assert_eq!(ids(&restored), vec![2]);
    }

    #[test]
    fn test_clear_is_persisted() {
        let (_dir, gateway, store) = store();
        store.add(movie(1));
        store.clear();

        assert!(store.is_empty());
        assert!(WatchlistStore::restore(gateway).is_empty());
    }

    #[test]
    fn test_forget_leaves_snapshot_alone() {
        let (_dir, gateway, store) = store();
        store.add(movie(1));
        store.forget();

        assert!(store.is_empty());
        assert_eq!(WatchlistStore::restore(gateway).len(), 1);
    }

    #[test]
    fn test_snapshot_with_duplicate_ids_dedups_on_restore() {
        let (_dir, gateway, _store) = store();
        let entries = vec![
            WatchlistEntry::new(movie(4)),
            WatchlistEntry::new(movie(4)),
            WatchlistEntry::new(movie(6)),
        ];
        gateway.snapshot(PersistKey::Watchlist, &entries).unwrap();

        let restored = WatchlistStore::restore(gateway);
        assert_eq!(ids(&restored), vec![4, 6]);
    }

    #[test]
    fn test_persist_failure_does_not_fail_mutation() {
        let (dir, _gateway, store) = store();
        // Rename onto a directory fails, so the snapshot write errors
        std::fs::create_dir(dir.path().join("watchlist.json")).unwrap();

        assert!(store.add(movie(1)));
        assert!(store.contains(1));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let (_dir, _gateway, store) = store();
        let mut rx = store.subscribe();

        store.add(movie(8));

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().contains(8));
    }
}
