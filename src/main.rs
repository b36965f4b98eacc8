//! `shortlink` command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Show how a URL is canonicalized and which code it maps to (no I/O)
//! shortlink canonicalize "HTTP://Example.com:443/p/?utm_source=x&b=2&a=1"
//!
//! # Create a short link
//! shortlink shorten "https://example.com/docs" --created-by alice
//! shortlink shorten "https://example.com/sale" --alias spring-sale --expires-at 2026-06-01T00:00:00Z
//!
//! # Resolve and inspect
//! shortlink resolve 1icKQMxI
//! shortlink show 42 --json
//!
//! # Operations
//! shortlink health
//! shortlink migrate
//! ```
//!
//! Configuration is read from the environment (and `.env`), see
//! [`shortlink::config`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

use shortlink::application::services::CreateShortLink;
use shortlink::AppState;
use shortlink::bootstrap;
use shortlink::config::{self, Config};
use shortlink::domain::entities::ShortLink;
use shortlink::error::AppError;
use shortlink::utils::base62::DEFAULT_CODE_LENGTH;
use shortlink::utils::code_generator::derive_candidate;
use shortlink::utils::url_canonicalizer::canonicalize_url;

/// Content-addressed URL shortener.
#[derive(Parser)]
#[command(name = "shortlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form, hash and short code of a URL
    Canonicalize {
        url: String,

        /// Short code length
        #[arg(short, long, default_value_t = DEFAULT_CODE_LENGTH)]
        length: usize,
    },

    /// Create a short link, or return the existing one for the same URL
    Shorten {
        url: String,

        /// Custom alias to use as the short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Expiry time, RFC 3339 (e.g. 2026-06-01T00:00:00Z)
        #[arg(short, long, value_parser = parse_timestamp)]
        expires_at: Option<DateTime<Utc>>,

        /// Identity recorded as the creator
        #[arg(short, long, default_value = "cli")]
        created_by: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a short code to its original URL
    Resolve { code: String },

    /// Show a short link by id
    Show {
        id: i64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check database and cache connectivity
    Health,

    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        // Pure computation, works without any configuration.
        Commands::Canonicalize { url, length } => canonicalize(&url, length),
        Commands::Shorten {
            url,
            alias,
            expires_at,
            created_by,
            json,
        } => {
            let request = CreateShortLink {
                original_url: url,
                custom_alias: alias,
                expired_at: expires_at,
                created_by,
            };
            shorten(&setup()?, request, json).await
        }
        Commands::Resolve { code } => resolve(&setup()?, &code).await,
        Commands::Show { id, json } => show(&setup()?, id, json).await,
        Commands::Health => health(&setup()?).await,
        Commands::Migrate => migrate(&setup()?).await,
    }
}

/// Loads the configuration and installs logging as it specifies.
fn setup() -> Result<Config> {
    let config = config::load_from_env()?;
    shortlink::logging::init(&config.log_level, &config.log_format);
    Ok(config)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// Converts a service error into a report carrying its stable code.
fn report(err: AppError) -> anyhow::Error {
    let details = err.details();
    if details.is_null() {
        anyhow::anyhow!("[{}] {}", err.code(), err)
    } else {
        anyhow::anyhow!("[{}] {} {}", err.code(), err, details)
    }
}

fn canonicalize(url: &str, length: usize) -> Result<()> {
    let canonical = canonicalize_url(url).context("Invalid URL")?;
    let candidate = derive_candidate(&canonical, 0, length).map_err(report)?;

    println!("  Canonical: {}", canonical.cyan());
    println!("  Hash:      {}", candidate.hash.bright_black());
    println!("  Code:      {}", candidate.short_code.bright_yellow().bold());

    Ok(())
}

async fn shorten(config: &Config, request: CreateShortLink, json: bool) -> Result<()> {
    let state = bootstrap::initialize(config).await?;

    let link = state
        .short_link_service
        .create(request)
        .await
        .map_err(report)?;

    print_link(&link, json)
}

async fn resolve(config: &Config, code: &str) -> Result<()> {
    let state = bootstrap::initialize(config).await?;

    let url = state
        .resolution_service
        .resolve(code)
        .await
        .map_err(report)?;

    println!("{url}");
    Ok(())
}

async fn show(config: &Config, id: i64, json: bool) -> Result<()> {
    let state = bootstrap::initialize(config).await?;

    let link = state.short_link_service.get(id).await.map_err(report)?;

    print_link(&link, json)
}

async fn health(config: &Config) -> Result<()> {
    config.print_summary();

    let pool = bootstrap::connect_database(config).await?;
    let cache = bootstrap::connect_cache(config).await;
    let state = AppState::new(Arc::new(pool), cache, config);

    let database_ok = state.check_database().await;
    let cache_ok = state.cache.health_check().await;

    println!("  Database: {}", status_label(database_ok));
    if config.is_cache_enabled() {
        println!("  Cache:    {}", status_label(cache_ok));
    } else {
        println!("  Cache:    {}", "DISABLED".yellow());
    }

    if !database_ok {
        anyhow::bail!("Database is unreachable");
    }
    Ok(())
}

async fn migrate(config: &Config) -> Result<()> {
    let pool = bootstrap::connect_database(config).await?;
    bootstrap::run_migrations(&pool).await?;

    println!("{}", "Migrations applied".green().bold());
    Ok(())
}

fn status_label(ok: bool) -> ColoredString {
    if ok { "OK".green() } else { "DOWN".red() }
}

fn print_link(link: &ShortLink, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(link)?);
        return Ok(());
    }

    let expires = link
        .expired_at
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:      {}", link.short_code.bright_yellow().bold());
    println!("  URL:       {}", link.original_url.cyan());
    println!("  Canonical: {}", link.canonical_url.bright_black());
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Custom:    {}", link.is_custom);
    println!("  Expires:   {expires}");
    println!("  Created:   {} by {}", link.created_at.to_rfc3339(), link.created_by);

    Ok(())
}
