use super::lists::movie_table;
use super::load_app_context;
use super::prompts;
use super::ui::{is_interactive, FetchSpinner};
use crate::output::Output;
use crate::WatchlistCommands;
use color_eyre::Result;
use marquee_core::AppContext;
use marquee_models::{Movie, MovieId};
use serde_json::json;

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let app = load_app_context()?;
    match cmd {
        WatchlistCommands::List => list(&app, output),
        WatchlistCommands::Add { id } => add(&app, id, output).await,
        WatchlistCommands::Remove { id } => remove(&app, id, output),
        WatchlistCommands::Clear { yes } => clear(&app, yes, output),
    }
}

fn list(app: &AppContext, output: &Output) -> Result<()> {
    let entries = app.watchlist.entries();

    if output.format().is_json() {
        output.data(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        output.info("Your watchlist is empty. Add a movie with 'marquee watchlist add <id>'.");
        return Ok(());
    }

    let movies: Vec<Movie> = entries.into_iter().map(|e| e.movie).collect();
    output.table(&movie_table(&movies, |_| true));
    output.println(format!("{} saved", movies.len()));
    Ok(())
}

async fn add(app: &AppContext, id: MovieId, output: &Output) -> Result<()> {
    if let Some(entry) = app.watchlist.get(id) {
        output.info(format!("'{}' is already on your watchlist", entry.movie.title));
        return Ok(());
    }

    let spinner = FetchSpinner::new(!output.is_quiet() && !output.format().is_json());
    spinner.set_message(format!("Looking up movie {}...", id));
    let details = app
        .catalog
        .movie_details(id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to look up movie {}: {}", id, e))?;
    spinner.finish();

    let movie = Movie::from(details);
    let title = movie.title.clone();
    let added = app.watchlist.add(movie);

    if output.format().is_json() {
        output.json(&json!({ "id": id, "title": title, "added": added }));
    } else if added {
        output.success(format!("Added '{}' to your watchlist", title));
    } else {
        output.info(format!("'{}' is already on your watchlist", title));
    }
    Ok(())
}

fn remove(app: &AppContext, id: MovieId, output: &Output) -> Result<()> {
    let title = app.watchlist.get(id).map(|e| e.movie.title);
    let removed = app.watchlist.remove(id);

    if output.format().is_json() {
        output.json(&json!({ "id": id, "removed": removed }));
    } else if removed {
        output.success(format!("Removed '{}' from your watchlist", title.unwrap_or_else(|| id.to_string())));
    } else {
        output.info(format!("Movie {} is not on your watchlist", id));
    }
    Ok(())
}

fn clear(app: &AppContext, yes: bool, output: &Output) -> Result<()> {
    let count = app.watchlist.len();
    if count == 0 {
        output.info("Your watchlist is already empty");
        return Ok(());
    }

    if !yes && is_interactive() && !output.format().is_json() {
        let confirmed = prompts::prompt_yes_no(&format!("Remove all {} movies from your watchlist?", count), false)?;
        if !confirmed {
            output.info("Cancelled");
            return Ok(());
        }
    }

    app.watchlist.clear();
    if output.format().is_json() {
        output.json(&json!({ "cleared": count }));
    } else {
        output.success(format!("Cleared {} movies from your watchlist", count));
    }
    Ok(())
}
