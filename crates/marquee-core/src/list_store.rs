//! Paginated movie-list caches keyed by query intent.
//!
//! One `ListStore` design serves the trending, featured and browse lists; the
//! intent type decides which catalog call a page fetch makes. Each store
//! tracks a single intent at a time. A newer fetch, intent change or reset
//! supersedes any request still in flight: when the older response arrives it
//! is dropped instead of committed. Nothing cancels the network call itself.

use async_trait::async_trait;
use marquee_catalog::{CatalogApi, CatalogError};
use marquee_models::{BrowseQuery, FeaturedIntent, LoadStatus, Movie, MovieId, MoviePage, TimeWindow};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};


/// A query a list store can track
#[async_trait]
pub trait ListIntent: Clone + Default + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Store name used in logs
    const KIND: &'static str;

    async fn fetch(&self, catalog: &dyn CatalogApi, page: u32) -> Result<MoviePage, CatalogError>;
}

#[async_trait]
impl ListIntent for TimeWindow {
    const KIND: &'static str = "trending";

    async fn fetch(&self, catalog: &dyn CatalogApi, page: u32) -> Result<MoviePage, CatalogError> {
        catalog.trending(*self, page).await
    }
}

#[async_trait]
impl ListIntent for FeaturedIntent {
    const KIND: &'static str = "featured";

    async fn fetch(&self, catalog: &dyn CatalogApi, page: u32) -> Result<MoviePage, CatalogError> {
        catalog.now_playing(page).await
    }
}

#[async_trait]
impl ListIntent for BrowseQuery {
    const KIND: &'static str = "browse";

    async fn fetch(&self, catalog: &dyn CatalogApi, page: u32) -> Result<MoviePage, CatalogError> {
        catalog.search_or_discover(self, page).await
    }
}

pub type TrendingStore = ListStore<TimeWindow>;
pub type FeaturedStore = ListStore<FeaturedIntent>;
pub type BrowseStore = ListStore<BrowseQuery>;

/// Observable state of one list store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState<I> {
    pub intent: I,
    /// Unique by id; page arrival order, then catalog order within a page
    pub movies: Vec<Movie>,
    pub current_page: u32,
    pub total_pages: u32,
    pub status: LoadStatus,
    pub last_error: Option<String>,
}

impl<I: Default> Default for ListState<I> {
    fn default() -> Self {
        Self::new(I::default())
    }
}

impl<I> ListState<I> {
    pub fn new(intent: I) -> Self {
        Self {
            intent,
            movies: Vec::new(),
            current_page: 1,
            total_pages: 1,
            status: LoadStatus::Idle,
            last_error: None,
        }
    }

    /// Whether "load more" has a page to fetch
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Back to the empty idle state, keeping the intent
    fn clear(&mut self) {
        self.movies.clear();
        self.current_page = 1;
        self.total_pages = 1;
        self.status = LoadStatus::Idle;
        self.last_error = None;
    }

    /// Commit a successful page. Page 1 replaces the list; later pages append
    /// only ids not already present. Returns how many movies were added.
    fn apply_page(&mut self, page: u32, response: MoviePage) -> usize {
        if page == 1 {
            self.movies.clear();
        }

        let before = self.movies.len();
        let mut seen: HashSet<MovieId> = self.movies.iter().map(|m| m.id).collect();
        self.movies
            .extend(response.results.into_iter().filter(|m| seen.insert(m.id)));

        self.current_page = page;
        self.total_pages = response.total_pages.max(1);
        self.status = LoadStatus::Succeeded;
        self.last_error = None;

        self.movies.len() - before
    }
}

/// What happened to a page request once it resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { page: u32, received: usize, added: usize },
    /// The catalog failed; the message is now the store's `last_error`
    Failed(String),
    /// A newer request or reset owns the store; the response was dropped
    Superseded,
}

pub struct ListStore<I: ListIntent> {
    catalog: Arc<dyn CatalogApi>,
    state: watch::Sender<ListState<I>>,
    /// Bumped by every fetch, intent change and reset
    generation: AtomicU64,
}

impl<I: ListIntent> ListStore<I> {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self::with_intent(catalog, I::default())
    }

    pub fn with_intent(catalog: Arc<dyn CatalogApi>, intent: I) -> Self {
        let (state, _) = watch::channel(ListState::new(intent));
        Self {
            catalog,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ListState<I> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<I>> {
        self.state.subscribe()
    }

    pub fn intent(&self) -> I {
        self.state.borrow().intent.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.borrow().has_more()
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Track a different query. Returns false (and changes nothing) when the
    /// intent is equal to the current one. After a change the list is empty
    /// and idle; the caller issues `fetch_page(1)`.
    pub fn set_intent(&self, intent: I) -> bool {
        // The token moves under the same write lock as the intent so a fetch
        // can never pair a fresh token with the previous intent.
        let changed = self.state.send_if_modified(|state| {
            if state.intent == intent {
                return false;
            }
            self.next_generation();
            state.intent = intent.clone();
            state.clear();
            true
        });
        if changed {
            info!(store = I::KIND, intent = ?intent, "Query intent changed, list reset");
        }
        changed
    }

    /// Clear the list while keeping the current intent
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.next_generation();
            state.clear();
        });
        debug!(store = I::KIND, "List reset");
    }

    /// Fetch `page` for the current intent and merge it into the list
    pub async fn fetch_page(&self, page: u32) -> FetchOutcome {
        let page = page.max(1);
        let mut issued = None;
        self.state.send_modify(|state| {
            issued = Some((self.next_generation(), state.intent.clone()));
            state.status = LoadStatus::Loading;
            state.last_error = None;
        });
        let Some((generation, intent)) = issued else {
            return FetchOutcome::Superseded;
        };
        debug!(store = I::KIND, page, generation, "Fetching page");

        let result = intent.fetch(self.catalog.as_ref(), page).await;

        // The generation check and the commit happen under the same write
        // lock so a concurrent intent change cannot slip in between.
        let mut outcome = FetchOutcome::Superseded;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            outcome = match result {
                Ok(response) => {
                    let received = response.results.len();
                    let added = state.apply_page(page, response);
                    FetchOutcome::Applied { page, received, added }
                }
                Err(e) => {
                    let message = e.to_string();
                    state.status = LoadStatus::Failed;
                    state.last_error = Some(message.clone());
                    FetchOutcome::Failed(message)
                }
            };
            true
        });

        match &outcome {
            FetchOutcome::Applied { page, received, added } => info!(
                store = I::KIND,
                page = *page,
                received = *received,
                added = *added,
                "Page loaded"
            ),
            FetchOutcome::Failed(message) => {
                warn!(store = I::KIND, page, error = %message, "Page fetch failed")
            }
            FetchOutcome::Superseded => {
                debug!(store = I::KIND, page, generation, "Discarding superseded response")
            }
        }
        outcome
    }

    /// Fetch the page after `current_page`. Returns None without touching the
    /// catalog when the last page is already loaded.
    pub async fn load_more(&self) -> Option<FetchOutcome> {
        let next = {
            let state = self.state.borrow();
            if !state.has_more() {
                return None;
            }
            state.current_page + 1
        };
        Some(self.fetch_page(next).await)
    }
}
