pub mod app;
pub mod list_store;
pub mod persistence;
pub mod session;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{AppContext, MovieOverview};
pub use list_store::{BrowseStore, FeaturedStore, FetchOutcome, ListIntent, ListState, ListStore, TrendingStore};
pub use persistence::{PersistKey, PersistenceError, PersistenceGateway};
pub use session::{validate_login_input, SessionError, SessionStore};
pub use watchlist::{Watchlist, WatchlistStore};
