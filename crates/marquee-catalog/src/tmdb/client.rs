use async_trait::async_trait;
use marquee_config::CatalogConfig;
use marquee_models::{BrowseQuery, CastMember, MovieDetails, MovieId, MoviePage, TimeWindow, Trailer};
use reqwest::Client;
use std::sync::Arc;
use crate::error::{CatalogError, Result};
use crate::request::CatalogRequest;
use crate::tmdb::api;
use crate::traits::CatalogApi;

pub fn create_tmdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_token: Option<String>,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Arc::new(create_tmdb_client()),
            base_url: base_url.into(),
            api_token,
        }
    }

    pub fn from_config(config: &CatalogConfig, api_token: Option<String>) -> Self {
        Self::new(config.base_url.clone(), api_token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    fn api_token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or(CatalogError::MissingToken)
    }

    async fn movie_page(&self, request: CatalogRequest) -> Result<MoviePage> {
        api::get_movie_page(&self.client, &self.base_url, self.api_token()?, &request).await
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    async fn search_or_discover(&self, query: &BrowseQuery, page: u32) -> Result<MoviePage> {
        self.movie_page(CatalogRequest::browse(query, page)).await
    }

    async fn trending(&self, window: TimeWindow, page: u32) -> Result<MoviePage> {
        self.movie_page(CatalogRequest::trending(window, page)).await
    }

    async fn now_playing(&self, page: u32) -> Result<MoviePage> {
        self.movie_page(CatalogRequest::now_playing(page)).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        api::get_movie_details(&self.client, &self.base_url, self.api_token()?, &CatalogRequest::details(id)).await
    }

    async fn movie_cast(&self, id: MovieId) -> Result<Vec<CastMember>> {
        api::get_cast(&self.client, &self.base_url, self.api_token()?, &CatalogRequest::credits(id)).await
    }

    async fn movie_trailer(&self, id: MovieId) -> Result<Option<Trailer>> {
        api::get_trailer(&self.client, &self.base_url, self.api_token()?, &CatalogRequest::videos(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_base_url() {
        let client = TmdbClient::from_config(&CatalogConfig::default(), Some("token".to_string()));
        assert_eq!(client.base_url(), "https://api.themoviedb.org/3");
        assert!(client.has_token());
        assert_eq!(client.catalog_name(), "tmdb");
    }

    #[test]
    fn test_missing_token_is_a_value() {
        let client = TmdbClient::new("http://localhost", None);
        assert_eq!(client.api_token().unwrap_err(), CatalogError::MissingToken);
        assert_eq!(
            CatalogError::MissingToken.to_string(),
            "Catalog API token is not configured"
        );
    }
}
