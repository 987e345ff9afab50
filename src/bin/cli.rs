//! yt-radar CLI
//!
//! Local execution entry point for engagement search and comment keyword scans.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use yt_radar::{
    config::{load_validated, resolve_api_key},
    error::Result,
    models::{Config, EngagementQuery, MatchMode, SortKey},
    output,
    pipeline::{self, AnalysisOptions},
    sources::YouTubeApi,
};

/// yt-radar - Video Engagement Radar
#[derive(Parser, Debug)]
#[command(
    name = "yt-radar",
    version,
    about = "Search YouTube and rank results by engagement (views/comments)"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "yt-radar.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search and print the top ranked videos
    Search {
        /// Search query string
        query: String,

        #[command(flatten)]
        engagement: EngagementArgs,

        /// How many results to print
        #[arg(long)]
        top: Option<usize>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Search comment text of the top ranked videos for keywords
    CommentTerms {
        /// Search query string (used to find candidate videos)
        query: String,

        /// Comma-separated keywords, e.g. "pob,league start"
        #[arg(long)]
        terms: String,

        /// Match any term or all terms
        #[arg(long = "match")]
        match_mode: Option<MatchMode>,

        #[command(flatten)]
        engagement: EngagementArgs,

        /// How many videos to scan comments for
        #[arg(long)]
        top_videos: Option<usize>,

        /// How many comments to fetch per video
        #[arg(long)]
        comments: Option<usize>,

        /// Sample comments kept per term
        #[arg(long)]
        samples: Option<usize>,

        /// Hide videos that did not match
        #[arg(long)]
        only_matches: bool,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Validate the configuration file
    Validate,
}

/// Search, filter and ranking flags shared by both run commands.
#[derive(Args, Debug)]
struct EngagementArgs {
    /// Number of search pages to scan
    #[arg(long)]
    pages: Option<u32>,

    /// Results per page (max 50)
    #[arg(long)]
    per_page: Option<u32>,

    /// Rank by this metric
    #[arg(long)]
    sort: Option<SortKey>,

    /// Drop videos with fewer views
    #[arg(long, default_value_t = 0)]
    min_views: u64,

    /// Drop videos with fewer comments
    #[arg(long, default_value_t = 0)]
    min_comments: u64,

    /// Only include videos published within this window (e.g. "30d", "12h", "2w")
    #[arg(long, default_value = "")]
    since: String,
}

impl EngagementArgs {
    /// Overlay the flags on the config defaults.
    fn to_query(&self, config: &Config) -> Result<EngagementQuery> {
        let defaults = config.engagement_query();
        EngagementQuery {
            pages: self.pages.unwrap_or(defaults.pages),
            per_page: self.per_page.unwrap_or(defaults.per_page),
            sort: self.sort.unwrap_or(defaults.sort),
            min_views: self.min_views,
            min_comments: self.min_comments,
            ..defaults
        }
        .with_since(&self.since)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Json,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_api(config: &Config) -> Result<YouTubeApi> {
    let api_key = resolve_api_key(config)?;
    YouTubeApi::from_config(config, api_key)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_validated(&cli.config)?;
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Search {
            query,
            engagement,
            top,
            format,
        } => {
            let mut search = engagement.to_query(&config)?;
            if let Some(top) = top {
                search.top = top;
            }
            search.validate()?;

            let api = build_api(&config)?;
            let videos = pipeline::run_search(&query, &search, &api).await?;

            match format {
                Format::Table => print!("{}", output::render_videos(&videos)),
                Format::Json => println!("{}", output::videos_to_json(&videos)?),
            }
        }

        Command::CommentTerms {
            query,
            terms,
            match_mode,
            engagement,
            top_videos,
            comments,
            samples,
            only_matches,
            format,
        } => {
            let mut keywords = config.keyword_query(&terms)?;
            if let Some(mode) = match_mode {
                keywords.match_mode = mode;
            }
            if let Some(n) = top_videos {
                keywords.top_videos = n;
            }
            if let Some(n) = comments {
                keywords.comments_per_video = n;
            }
            if let Some(n) = samples {
                keywords.sample_limit = n;
            }
            keywords.validate()?;

            // The ranked list must be at least as long as the scan window.
            let mut search = engagement.to_query(&config)?;
            search.top = keywords.top_videos;
            search.validate()?;

            let api = build_api(&config)?;
            let report = pipeline::run_keyword_analysis(
                &query,
                &search,
                &keywords,
                &api,
                &api,
                AnalysisOptions::from(&config.client),
            )
            .await?;

            log::info!(
                "{} of {} videos matched; {} unavailable",
                report.matched_count(),
                report.entries.len(),
                report.unavailable_count()
            );

            match format {
                Format::Table => print!("{}", output::render_report(&report, only_matches)),
                Format::Json => println!("{}", output::report_to_json(&report, only_matches)?),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            log::info!("✓ Config OK ({})", cli.config.display());

            match resolve_api_key(&config) {
                Ok(_) => log::info!("✓ API key found"),
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    Ok(())
}
