use marquee_models::{CastMember, MovieDetails, MoviePage, Trailer};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::{CatalogError, Result};
use crate::request::CatalogRequest;

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CreditEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<VideoEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoEntry {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

/// Issue a GET and decode the JSON body, normalizing every failure to a `CatalogError`
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    api_token: &str,
    request: &CatalogRequest,
) -> Result<T> {
    let url = request.url(base_url);
    debug!("Catalog request: {}", url);

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", api_token))
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| CatalogError::Transport {
            path: request.path.clone(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<TmdbErrorBody>(&error_text)
            .ok()
            .and_then(|body| body.status_message)
            .unwrap_or(error_text);
        warn!("Catalog returned {} for {}: {}", status, request.path, message);
        return Err(CatalogError::Status {
            path: request.path.clone(),
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await.map_err(|e| CatalogError::Transport {
        path: request.path.clone(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&body).map_err(|e| CatalogError::Decode {
        path: request.path.clone(),
        message: e.to_string(),
    })
}

pub async fn get_movie_page(
    client: &Client,
    base_url: &str,
    api_token: &str,
    request: &CatalogRequest,
) -> Result<MoviePage> {
    let page: MoviePage = get_json(client, base_url, api_token, request).await?;
    debug!(
        "Catalog page {}/{} for {}: {} results",
        page.page,
        page.total_pages,
        request.path,
        page.results.len()
    );
    Ok(page)
}

pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_token: &str,
    request: &CatalogRequest,
) -> Result<MovieDetails> {
    get_json(client, base_url, api_token, request).await
}

pub async fn get_cast(
    client: &Client,
    base_url: &str,
    api_token: &str,
    request: &CatalogRequest,
) -> Result<Vec<CastMember>> {
    let credits: CreditsResponse = get_json(client, base_url, api_token, request).await?;
    Ok(select_acting_cast(credits.cast))
}

pub async fn get_trailer(
    client: &Client,
    base_url: &str,
    api_token: &str,
    request: &CatalogRequest,
) -> Result<Option<Trailer>> {
    let videos: VideosResponse = get_json(client, base_url, api_token, request).await?;
    Ok(select_trailer(videos.results))
}

/// Credits whose department is acting, in billing order
pub fn select_acting_cast(credits: Vec<CreditEntry>) -> Vec<CastMember> {
    let mut cast: Vec<CastMember> = credits
        .into_iter()
        .filter(|c| c.known_for_department.as_deref() == Some("Acting"))
        .map(|c| CastMember {
            id: c.id,
            name: c.name,
            character: c.character,
            profile_path: c.profile_path,
            order: c.order,
        })
        .collect();
    // Stable: equal billing keeps catalog order
    cast.sort_by_key(|c| c.order);
    cast
}

/// First video that is a trailer hosted on YouTube
pub fn select_trailer(videos: Vec<VideoEntry>) -> Option<Trailer> {
    videos
        .into_iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
        .map(|v| Trailer {
            key: v.key,
            name: v.name,
            site: v.site,
        })
}
