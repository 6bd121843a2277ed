use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::Context;
use commands::{config, details, genres, lists, session, watchlist};
use marquee_config::PathManager;
use marquee_models::{GenreFilter, TimeWindow, YearFilter};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - Browse trending, now-playing and searchable movies from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (defaults to the
    /// data directory's logs/marquee.log when no path is given)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show trending movies
    #[command(long_about = "List trending movies for the chosen time window. Use --pages to load more than the first page.")]
    Trending {
        /// Trending window: day or week
        #[arg(long, default_value = "day")]
        window: TimeWindow,

        /// Number of pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Show movies now playing in theaters
    Featured {
        /// Number of pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Search by keyword or discover by genre, year and rating
    #[command(long_about = "Search the catalog by keyword, or discover movies by genre, release year and rating when no keyword is given. Results are sorted by popularity.")]
    Browse {
        /// Search keyword; discovery mode when omitted
        #[arg(short, long)]
        keyword: Option<String>,

        /// Genre name or id, or "All"
        #[arg(short, long, default_value = "All")]
        genre: GenreFilter,

        /// Release year, or "All"
        #[arg(short, long, default_value = "All")]
        year: YearFilter,

        /// Minimum average rating (0-10)
        #[arg(long, value_name = "R")]
        min_rating: Option<f32>,

        /// Maximum average rating (0-10)
        #[arg(long, value_name = "R")]
        max_rating: Option<f32>,

        /// Number of pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Show details, top cast and trailer for one movie
    Details {
        /// Catalog movie id
        id: u64,
    },
    /// Manage the local watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Log in with the configured demo account
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Log out and purge all saved state, watchlist included
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// View or change configuration
    #[command(long_about = "Manage configuration and the catalog API token. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// List the genres accepted by --genre
    Genres,
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List saved movies
    List,
    /// Add a movie by catalog id
    Add {
        id: u64,
    },
    /// Remove a movie by catalog id
    Remove {
        id: u64,
    },
    /// Remove every saved movie
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API token)
    Show {
        /// Show the token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the catalog API token in the credentials file
    Token {
        /// API read access token (prompted when omitted)
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err("Failed to initialize logging")?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Trending { window, pages } => lists::run_trending(window, pages, &output).await,
        Commands::Featured { pages } => lists::run_featured(pages, &output).await,
        Commands::Browse {
            keyword,
            genre,
            year,
            min_rating,
            max_rating,
            pages,
        } => {
            let filters = lists::BrowseFilters {
                keyword,
                genre,
                year,
                min_rating,
                max_rating,
            };
            lists::run_browse(filters, pages, &output).await
        }
        Commands::Details { id } => details::run_details(id, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, &output).await
        }
        Commands::Login { email } => session::run_login(email, &output),
        Commands::Logout => session::run_logout(&output),
        Commands::Whoami => session::run_whoami(&output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
        Commands::Genres => {
            genres::run_genres(&output);
            Ok(())
        }
    }
}
