use crate::list_store::{BrowseStore, FeaturedStore, TrendingStore};
use crate::persistence::{PersistenceError, PersistenceGateway};
use crate::session::SessionStore;
use crate::watchlist::WatchlistStore;
use anyhow::{Context, Result};
use marquee_catalog::{CatalogApi, CatalogError};
use marquee_config::{Config, PathManager};
use marquee_models::{CastMember, MovieDetails, MovieId, Trailer};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the details view shows for one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieOverview {
    pub details: MovieDetails,
    /// Top-billed actors, capped at the configured preview limit
    pub cast: Vec<CastMember>,
    pub trailer: Option<Trailer>,
}

/// Owns one instance of every store, wired to a shared catalog and gateway
pub struct AppContext {
    pub config: Config,
    pub catalog: Arc<dyn CatalogApi>,
    pub persistence: Arc<PersistenceGateway>,
    pub trending: TrendingStore,
    pub featured: FeaturedStore,
    pub browse: BrowseStore,
    pub watchlist: WatchlistStore,
    pub session: SessionStore,
}

impl AppContext {
    /// Restore the persisted stores and create empty list caches
    pub fn init(config: Config, persistence: Arc<PersistenceGateway>, catalog: Arc<dyn CatalogApi>) -> Self {
        let watchlist = WatchlistStore::restore(persistence.clone());
        let session = SessionStore::restore(persistence.clone(), config.auth.clone());

        info!(
            catalog = catalog.catalog_name(),
            watchlist = watchlist.len(),
            logged_in = session.is_logged_in(),
            "App context initialized"
        );

        Self {
            trending: TrendingStore::new(catalog.clone()),
            featured: FeaturedStore::new(catalog.clone()),
            browse: BrowseStore::new(catalog.clone()),
            watchlist,
            session,
            config,
            catalog,
            persistence,
        }
    }

    pub fn from_paths(config: Config, paths: &PathManager, catalog: Arc<dyn CatalogApi>) -> Result<Self> {
        let persistence = PersistenceGateway::new(paths).context("Failed to open state directory")?;
        Ok(Self::init(config, Arc::new(persistence), catalog))
    }

    /// Fetch details, cast and trailer together. Any failure fails the whole view.
    pub async fn movie_overview(&self, id: MovieId) -> Result<MovieOverview, CatalogError> {
        debug!(id, "Loading movie overview");
        let (details, mut cast, trailer) = futures::try_join!(
            self.catalog.movie_details(id),
            self.catalog.movie_cast(id),
            self.catalog.movie_trailer(id),
        )?;
        cast.truncate(self.config.catalog.cast_preview_limit);

        Ok(MovieOverview { details, cast, trailer })
    }

    /// Drop the in-memory watchlist, then clear the session and purge every
    /// persisted key
    pub fn logout(&self) -> Result<(), PersistenceError> {
        self.watchlist.forget();
        self.session.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{movie, page, FakeCatalog};
    use marquee_models::{Genre, TimeWindow};
    use tempfile::TempDir;

    fn details(id: MovieId) -> MovieDetails {
        MovieDetails {
            id,
            title: "Dune: Part Two".to_string(),
            overview: String::new(),
            tagline: Some("Long live the fighters.".to_string()),
            poster_path: None,
            backdrop_path: None,
            release_date: "2024-02-27".to_string(),
            runtime: Some(167),
            status: Some("Released".to_string()),
            genres: vec![Genre { id: 878, name: "Science Fiction".to_string() }],
            imdb_id: Some("tt15239678".to_string()),
            origin_country: vec!["US".to_string()],
            original_language: Some("en".to_string()),
            popularity: 120.0,
            vote_average: 8.2,
        }
    }

    fn cast(count: u32) -> Vec<CastMember> {
        (0..count)
            .map(|order| CastMember {
                id: order as u64,
                name: format!("Actor {}", order),
                character: String::new(),
                profile_path: None,
                order,
            })
            .collect()
    }

    fn context(catalog: Arc<FakeCatalog>) -> (TempDir, AppContext) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let app = AppContext::from_paths(Config::default(), &paths, catalog).unwrap();
        (dir, app)
    }

    #[tokio::test]
    async fn test_overview_caps_cast() {
        let catalog = Arc::new(FakeCatalog::new());
        let trailer = Trailer {
            key: "Way9Dexny3w".to_string(),
            name: "Official Trailer".to_string(),
            site: "YouTube".to_string(),
        };
        catalog.set_details(details(693134), cast(12), Some(trailer.clone()));
        let (_dir, app) = context(catalog.clone());

        let overview = app.movie_overview(693134).await.unwrap();

        assert_eq!(overview.details.id, 693134);
        assert_eq!(overview.cast.len(), 8);
        assert_eq!(overview.cast[0].name, "Actor 0");
        assert_eq!(overview.trailer, Some(trailer));
    }

    #[tokio::test]
    async fn test_overview_fails_when_details_fail() {
        let catalog = Arc::new(FakeCatalog::new());
        let (_dir, app) = context(catalog);

        let err = app.movie_overview(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_stores_are_independent() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.push(Ok(page(1, &[1, 2], 3)));
        let (_dir, app) = context(catalog);

        app.trending.set_intent(TimeWindow::Week);
        app.trending.fetch_page(1).await;

        assert_eq!(app.trending.snapshot().movies.len(), 2);
        assert!(app.featured.snapshot().movies.is_empty());
        assert!(app.browse.snapshot().movies.is_empty());
    }

    #[tokio::test]
    async fn test_state_is_restored_on_init() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        {
            let app = AppContext::from_paths(Config::default(), &paths, Arc::new(FakeCatalog::new())).unwrap();
            app.watchlist.add(movie(42));
            app.session.login("admin@admin.com", "password").unwrap();
        }

        let app = AppContext::from_paths(Config::default(), &paths, Arc::new(FakeCatalog::new())).unwrap();
        assert!(app.watchlist.contains(42));
        assert!(app.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_drops_watchlist_and_session() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let app = AppContext::from_paths(Config::default(), &paths, Arc::new(FakeCatalog::new())).unwrap();
        app.watchlist.add(movie(42));
        app.session.login("admin@admin.com", "password").unwrap();

        app.logout().unwrap();

        assert!(app.watchlist.is_empty());
        assert!(!app.session.is_logged_in());
        let restarted = AppContext::from_paths(Config::default(), &paths, Arc::new(FakeCatalog::new())).unwrap();
        assert!(restarted.watchlist.is_empty());
        assert!(!restarted.session.is_logged_in());
    }
}
