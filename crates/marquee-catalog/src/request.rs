use marquee_models::{BrowseQuery, MovieId, TimeWindow};

/// A catalog GET request: path relative to the API base plus ordered query parameters.
///
/// Building requests as plain values keeps the filter-to-parameter mapping
/// testable without a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl CatalogRequest {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    fn with_page(self, page: u32) -> Self {
        self.with("page", page.max(1))
    }

    /// Title search when the query has a keyword, discovery otherwise.
    /// `All` genre/year filters and non-constraining rating bounds are left out.
    pub fn browse(query: &BrowseQuery, page: u32) -> Self {
        let mut request = match query.search_term() {
            Some(term) => Self::new("/search/movie").with("query", term),
            None => Self::new("/discover/movie"),
        }
        .with_page(page);

        if let Some(genre) = query.genre.id() {
            request = request.with("with_genres", genre);
        }
        if let Some(year) = query.year.year() {
            request = request.with("primary_release_year", year);
        }
        if let Some(rating) = &query.rating {
            if let Some(min) = rating.min() {
                request = request.with("vote_average.gte", min);
            }
            if let Some(max) = rating.max() {
                request = request.with("vote_average.lte", max);
            }
        }

        request.with("sort_by", "popularity.desc")
    }

    pub fn trending(window: TimeWindow, page: u32) -> Self {
        Self::new(format!("/trending/movie/{}", window.as_str())).with_page(page)
    }

    pub fn now_playing(page: u32) -> Self {
        Self::new("/movie/now_playing").with_page(page)
    }

    pub fn details(id: MovieId) -> Self {
        Self::new(format!("/movie/{}", id))
    }

    pub fn credits(id: MovieId) -> Self {
        Self::new(format!("/movie/{}/credits", id))
    }

    pub fn videos(id: MovieId) -> Self {
        Self::new(format!("/movie/{}/videos", id))
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Absolute URL against the API base, query values percent-encoded
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        for (i, (key, value)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}
