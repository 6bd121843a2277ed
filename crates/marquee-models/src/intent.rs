//! Query intents: the parameter set a list store is currently tracking.
//!
//! Each list store kind has its own closed intent type. Two intents are the
//! same query exactly when they compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted from filter inputs meaning "no filter"
const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError {
    message: String,
}

impl ParseFilterError {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseFilterError {}

fn is_all(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case(ALL)
}

/// Trending window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            other => Err(ParseFilterError::new(format!(
                "Invalid time window: {}. Use 'day' or 'week'",
                other
            ))),
        }
    }
}

/// The featured ("now playing") list takes no parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedIntent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(u32),
}

impl GenreFilter {
    pub fn id(&self) -> Option<u32> {
        match self {
            GenreFilter::All => None,
            GenreFilter::Genre(id) => Some(*id),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str(ALL),
            GenreFilter::Genre(id) => write!(f, "{}", crate::genre::genre_name(*id)),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = ParseFilterError;

    /// Accepts "All", a numeric genre id, or a genre name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_all(s) {
            return Ok(GenreFilter::All);
        }
        if let Ok(id) = s.trim().parse::<u32>() {
            return Ok(GenreFilter::Genre(id));
        }
        crate::genre::genre_id(s)
            .map(GenreFilter::Genre)
            .ok_or_else(|| ParseFilterError::new(format!("Unknown genre: {}", s.trim())))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(u16),
}

impl YearFilter {
    pub fn year(&self) -> Option<u16> {
        match self {
            YearFilter::All => None,
            YearFilter::Year(year) => Some(*year),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str(ALL),
            YearFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

impl FromStr for YearFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_all(s) {
            return Ok(YearFilter::All);
        }
        s.trim()
            .parse::<u16>()
            .map(YearFilter::Year)
            .map_err(|_| ParseFilterError::new(format!("Invalid release year: {}", s.trim())))
    }
}

/// Rating filter on the catalog's 0-10 vote average.
///
/// Some front ends offer a single minimum, others a min/max slider; both are
/// passed through to the catalog as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RatingFilter {
    AtLeast(f32),
    Between { min: f32, max: f32 },
}

impl RatingFilter {
    /// Build from optional CLI-style bounds, None when neither bound constrains anything
    pub fn from_bounds(min: Option<f32>, max: Option<f32>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (Some(min), None) => Some(RatingFilter::AtLeast(min)),
            (min, Some(max)) => Some(RatingFilter::Between {
                min: min.unwrap_or(0.0),
                max,
            }),
        }
    }

    /// Lower bound, None when it would not exclude anything
    pub fn min(&self) -> Option<f32> {
        let min = match self {
            RatingFilter::AtLeast(min) => *min,
            RatingFilter::Between { min, .. } => *min,
        };
        (min > 0.0).then_some(min)
    }

    /// Upper bound, None when it would not exclude anything
    pub fn max(&self) -> Option<f32> {
        match self {
            RatingFilter::AtLeast(_) => None,
            RatingFilter::Between { max, .. } => (*max < 10.0).then_some(*max),
        }
    }
}

/// Browse/search intent: keyword plus filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseQuery {
    pub keyword: String,
    pub genre: GenreFilter,
    pub year: YearFilter,
    pub rating: Option<RatingFilter>,
}

impl BrowseQuery {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn with_genre(mut self, genre: GenreFilter) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_year(mut self, year: YearFilter) -> Self {
        self.year = year;
        self
    }

    pub fn with_rating(mut self, rating: Option<RatingFilter>) -> Self {
        self.rating = rating;
        self
    }

    /// Trimmed keyword, None when this is a plain discovery query
    pub fn search_term(&self) -> Option<&str> {
        let term = self.keyword.trim();
        (!term.is_empty()).then_some(term)
    }
}
