use super::lists::format_rating;
use super::load_app_context;
use super::ui::FetchSpinner;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use marquee_core::MovieOverview;
use marquee_models::MovieId;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_details(id: MovieId, output: &Output) -> Result<()> {
    let app = load_app_context()?;

    let spinner = FetchSpinner::new(!output.is_quiet() && !output.format().is_json());
    spinner.set_message(format!("Loading movie {}...", id));
    let overview = app
        .movie_overview(id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load movie {}: {}", id, e))?;
    spinner.finish();

    let saved = app.watchlist.contains(id);
    let poster_url = app
        .config
        .catalog
        .image_url(overview.details.poster_path.as_deref(), "w500");

    if output.format().is_json() {
        output.json(&json!({
            "details": overview.details,
            "cast": overview.cast,
            "trailer": overview.trailer,
            "trailer_url": overview.trailer.as_ref().map(|t| t.watch_url()),
            "poster_url": poster_url,
            "in_watchlist": saved,
        }));
        return Ok(());
    }

    render_overview(&overview, poster_url.as_deref(), saved, output);
    Ok(())
}

fn render_overview(overview: &MovieOverview, poster_url: Option<&str>, saved: bool, output: &Output) {
    let details = &overview.details;

    output.println(format!("\n{}", details.title.bright_cyan().bold()));
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        output.println(tagline.italic().to_string());
    }

    let mut facts = Table::new();
    facts.load_preset(comfy_table::presets::UTF8_FULL);
    facts.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    let rows = [
        ("Released", non_empty(&details.release_date)),
        ("Runtime", details.runtime.map(runtime_label).unwrap_or_else(|| "-".to_string())),
        ("Genres", non_empty(&genres.join(", "))),
        ("Rating", format_rating(details.vote_average)),
        ("Status", details.status.clone().unwrap_or_else(|| "-".to_string())),
        ("Poster", poster_url.unwrap_or("-").to_string()),
        ("Watchlist", if saved { "★ saved" } else { "not saved" }.to_string()),
    ];
    for (label, value) in rows {
        facts.add_row(vec![Cell::new(label).add_attribute(comfy_table::Attribute::Bold), Cell::new(value)]);
    }
    output.table(&facts);

    if !details.overview.is_empty() {
        output.println(format!("\n{}", details.overview));
    }

    if !overview.cast.is_empty() {
        output.println(format!("\n{}", "Top cast".bold()));
        let mut cast = Table::new();
        cast.set_header(vec!["Actor", "Character"]);
        cast.load_preset(comfy_table::presets::UTF8_FULL);
        cast.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        for member in &overview.cast {
            cast.add_row(vec![member.name.clone(), member.character.clone()]);
        }
        output.table(&cast);
    }

    match &overview.trailer {
        Some(trailer) => output.println(format!("\n{} {}", "Trailer:".bold(), trailer.watch_url().underline())),
        None => output.info("\nNo trailer available."),
    }
}

fn non_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// "2h 35m" from a runtime in minutes
fn runtime_label(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_label() {
        assert_eq!(runtime_label(155), "2h 35m");
        assert_eq!(runtime_label(120), "2h");
        assert_eq!(runtime_label(42), "42m");
    }
}
