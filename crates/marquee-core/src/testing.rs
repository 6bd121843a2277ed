//! Scripted catalog fake shared by the store tests.

use async_trait::async_trait;
use marquee_catalog::{CatalogApi, CatalogError, Result};
use marquee_models::{BrowseQuery, CastMember, Movie, MovieDetails, MovieId, MoviePage, TimeWindow, Trailer};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

pub(crate) fn movie(id: MovieId) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: "2024-01-01".to_string(),
        vote_average: 7.0,
        genre_ids: vec![18],
        popularity: 10.0,
    }
}

pub(crate) fn page(number: u32, ids: &[MovieId], total_pages: u32) -> MoviePage {
    MoviePage {
        page: number,
        results: ids.iter().copied().map(movie).collect(),
        total_pages,
        total_results: ids.len() as u64,
    }
}

pub(crate) fn transport_error(message: &str) -> CatalogError {
    CatalogError::Transport {
        path: "/test".to_string(),
        message: message.to_string(),
    }
}

struct Scripted {
    response: Result<MoviePage>,
    gate: Option<oneshot::Receiver<()>>,
}

/// List calls pop scripted responses in call order. A gated response is
/// held until its sender fires, which lets tests resolve requests out of order.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<String>>,
    details: Mutex<Option<MovieDetails>>,
    cast: Mutex<Vec<CastMember>>,
    trailer: Mutex<Option<Trailer>>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, response: Result<MoviePage>) {
        self.responses.lock().unwrap().push_back(Scripted { response, gate: None });
    }

    pub(crate) fn push_gated(&self, response: Result<MoviePage>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.responses.lock().unwrap().push_back(Scripted {
            response,
            gate: Some(rx),
        });
        tx
    }

    pub(crate) fn set_details(&self, details: MovieDetails, cast: Vec<CastMember>, trailer: Option<Trailer>) {
        *self.details.lock().unwrap() = Some(details);
        *self.cast.lock().unwrap() = cast;
        *self.trailer.lock().unwrap() = trailer;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn next(&self, call: String) -> Result<MoviePage> {
        self.calls.lock().unwrap().push(call);
        let scripted = self.responses.lock().unwrap().pop_front();
        let Some(scripted) = scripted else {
            return Err(transport_error("no scripted response"));
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.response
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    fn catalog_name(&self) -> &str {
        "fake"
    }

    async fn search_or_discover(&self, query: &BrowseQuery, page: u32) -> Result<MoviePage> {
        self.next(format!("browse:{}:{}", query.keyword, page)).await
    }

    async fn trending(&self, window: TimeWindow, page: u32) -> Result<MoviePage> {
        self.next(format!("trending:{}:{}", window, page)).await
    }

    async fn now_playing(&self, page: u32) -> Result<MoviePage> {
        self.next(format!("featured:{}", page)).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        self.calls.lock().unwrap().push(format!("details:{}", id));
        self.details
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CatalogError::Status {
                path: format!("/movie/{}", id),
                status: 404,
                message: "The resource you requested could not be found.".to_string(),
            })
    }

    async fn movie_cast(&self, id: MovieId) -> Result<Vec<CastMember>> {
        self.calls.lock().unwrap().push(format!("cast:{}", id));
        Ok(self.cast.lock().unwrap().clone())
    }

    async fn movie_trailer(&self, id: MovieId) -> Result<Option<Trailer>> {
        self.calls.lock().unwrap().push(format!("trailer:{}", id));
        Ok(self.trailer.lock().unwrap().clone())
    }
}

/// Answers every trending call at once with a single movie whose id names the
/// requested window, so a committed page shows which intent produced it.
pub(crate) struct WindowEchoCatalog;

impl WindowEchoCatalog {
    pub(crate) fn id_for(window: TimeWindow) -> MovieId {
        match window {
            TimeWindow::Day => 1,
            TimeWindow::Week => 7,
        }
    }
}

#[async_trait]
impl CatalogApi for WindowEchoCatalog {
    fn catalog_name(&self) -> &str {
        "window-echo"
    }

    async fn search_or_discover(&self, _query: &BrowseQuery, page: u32) -> Result<MoviePage> {
        Ok(self::page(page, &[], 1))
    }

    async fn trending(&self, window: TimeWindow, page: u32) -> Result<MoviePage> {
        tokio::task::yield_now().await;
        Ok(self::page(page, &[Self::id_for(window)], 1))
    }

    async fn now_playing(&self, page: u32) -> Result<MoviePage> {
        Ok(self::page(page, &[], 1))
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        Err(CatalogError::Status {
            path: format!("/movie/{}", id),
            status: 404,
            message: "not found".to_string(),
        })
    }

    async fn movie_cast(&self, _id: MovieId) -> Result<Vec<CastMember>> {
        Ok(Vec::new())
    }

    async fn movie_trailer(&self, _id: MovieId) -> Result<Option<Trailer>> {
        Ok(None)
    }
}
