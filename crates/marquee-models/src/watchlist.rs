use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::{Movie, MovieId};

/// A movie saved to the local watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub movie: Movie,
    pub watchlist_added: bool, // Always true; kept so snapshots carry the marker
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(movie: Movie) -> Self {
        Self {
            movie,
            watchlist_added: true,
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_flat() {
        let movie: Movie = serde_json::from_str(r#"{"id": 7, "title": "Heat"}"#).unwrap();
        let entry = WatchlistEntry::new(movie);
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["title"], "Heat");
        assert_eq!(value["watchlist_added"], true);

        let back: WatchlistEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
