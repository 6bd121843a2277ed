use super::load_app_context;
use super::ui::FetchSpinner;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Color, Table};
use marquee_core::{FetchOutcome, ListIntent, ListState, ListStore, WatchlistStore};
use marquee_models::{primary_genre, BrowseQuery, GenreFilter, Movie, RatingFilter, TimeWindow, YearFilter};
use owo_colors::OwoColorize;

pub struct BrowseFilters {
    pub keyword: Option<String>,
    pub genre: GenreFilter,
    pub year: YearFilter,
    pub min_rating: Option<f32>,
    pub max_rating: Option<f32>,
}

impl BrowseFilters {
    pub fn into_query(self) -> Result<BrowseQuery> {
        for bound in [self.min_rating, self.max_rating].into_iter().flatten() {
            if !(0.0..=10.0).contains(&bound) {
                return Err(color_eyre::eyre::eyre!("Ratings must be between 0 and 10, got {}", bound));
            }
        }
        if let (Some(min), Some(max)) = (self.min_rating, self.max_rating) {
            if min > max {
                return Err(color_eyre::eyre::eyre!("--min-rating {} is above --max-rating {}", min, max));
            }
        }

        Ok(BrowseQuery::keyword(self.keyword.unwrap_or_default())
            .with_genre(self.genre)
            .with_year(self.year)
            .with_rating(RatingFilter::from_bounds(self.min_rating, self.max_rating)))
    }
}

pub async fn run_trending(window: TimeWindow, pages: u32, output: &Output) -> Result<()> {
    let app = load_app_context()?;
    app.trending.set_intent(window);
    let state = load_pages(&app.trending, pages, output).await?;
    let title = match window {
        TimeWindow::Day => "Trending today",
        TimeWindow::Week => "Trending this week",
    };
    render_list(title, &state, &app.watchlist, output);
    Ok(())
}

pub async fn run_featured(pages: u32, output: &Output) -> Result<()> {
    let app = load_app_context()?;
    let state = load_pages(&app.featured, pages, output).await?;
    render_list("Now playing", &state, &app.watchlist, output);
    Ok(())
}

pub async fn run_browse(filters: BrowseFilters, pages: u32, output: &Output) -> Result<()> {
    let query = filters.into_query()?;
    let title = match query.search_term() {
        Some(term) => format!("Results for \"{}\"", term),
        None => "Discover".to_string(),
    };

    let app = load_app_context()?;
    app.browse.set_intent(query);
    let state = load_pages(&app.browse, pages, output).await?;
    render_list(&title, &state, &app.watchlist, output);
    Ok(())
}

/// Fetch page 1, then keep loading until `pages` pages are in or the catalog
/// runs out. A failure on a later page keeps what was already loaded.
async fn load_pages<I: ListIntent>(store: &ListStore<I>, pages: u32, output: &Output) -> Result<ListState<I>> {
    let spinner = FetchSpinner::new(!output.is_quiet() && !output.format().is_json());
    spinner.set_message(format!("Loading {} page 1...", I::KIND));

    if let FetchOutcome::Failed(message) = store.fetch_page(1).await {
        return Err(color_eyre::eyre::eyre!("Failed to load {}: {}", I::KIND, message));
    }

    for _ in 1..pages {
        let next = store.snapshot().current_page + 1;
        spinner.set_message(format!("Loading {} page {}...", I::KIND, next));
        match store.load_more().await {
            None => break,
            Some(FetchOutcome::Failed(message)) => {
                output.warn(format!("Stopped at page {}: {}", next - 1, message));
                break;
            }
            Some(_) => {}
        }
    }
    spinner.finish();

    Ok(store.snapshot())
}

fn render_list<I: ListIntent>(title: &str, state: &ListState<I>, watchlist: &WatchlistStore, output: &Output) {
    if output.format().is_json() {
        output.data(state);
        return;
    }

    output.println(format!("\n{}", title.bright_cyan().bold()));
    if state.movies.is_empty() {
        output.info("No movies found.");
        return;
    }

    output.table(&movie_table(&state.movies, |id| watchlist.contains(id)));
    let footer = format!(
        "{} movies, page {} of {}",
        state.movies.len(),
        state.current_page,
        state.total_pages
    );
    if state.has_more() {
        output.println(format!("{} (use --pages to load more)", footer.dimmed()));
    } else {
        output.println(footer.dimmed().to_string());
    }
}

/// One row per movie; `saved` marks watchlist membership
pub(crate) fn movie_table(movies: &[Movie], saved: impl Fn(u64) -> bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "ID", "Title", "Year", "Genre", "Rating"]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for movie in movies {
        let cells: Vec<Cell> = movie_row(movie, saved(movie.id))
            .into_iter()
            .enumerate()
            .map(|(i, value)| match i {
                0 => Cell::new(value).fg(Color::Yellow),
                _ => Cell::new(value),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

fn movie_row(movie: &Movie, saved: bool) -> Vec<String> {
    vec![
        if saved { "★".to_string() } else { String::new() },
        movie.id.to_string(),
        movie.title.clone(),
        movie.release_year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
        primary_genre(&movie.genre_ids).to_string(),
        format_rating(movie.vote_average),
    ]
}

pub(crate) fn format_rating(vote_average: f64) -> String {
    if vote_average <= 0.0 {
        return "-".to_string();
    }
    format!("{:.1}", vote_average)
}
