use serde::{Deserialize, Serialize};

/// Lifecycle of an asynchronous list fetch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Nothing requested since the last reset
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    Succeeded,
    Failed,
}
