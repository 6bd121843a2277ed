use async_trait::async_trait;
use marquee_models::{BrowseQuery, CastMember, MovieDetails, MovieId, MoviePage, Trailer, TimeWindow};
use crate::error::Result;

/// Read access to the external movie catalog.
///
/// Implementations never panic or throw on expected failures; every failure
/// comes back as a `CatalogError` value.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    fn catalog_name(&self) -> &str;

    /// Title search when `query` has a keyword, discovery otherwise
    async fn search_or_discover(&self, query: &BrowseQuery, page: u32) -> Result<MoviePage>;

    async fn trending(&self, window: TimeWindow, page: u32) -> Result<MoviePage>;

    /// The "now playing" feed
    async fn now_playing(&self, page: u32) -> Result<MoviePage>;

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails>;

    /// Acting credits in billing order. Callers cap the preview length.
    async fn movie_cast(&self, id: MovieId) -> Result<Vec<CastMember>>;

    /// First YouTube trailer, if the movie has one
    async fn movie_trailer(&self, id: MovieId) -> Result<Option<Trailer>>;
}
