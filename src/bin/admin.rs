//! CLI administration tool for slug-shortener.
//!
//! Provides commands for inspecting and deleting links, viewing statistics,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links, optionally for one owner
//! cargo run --bin admin -- links list --owner user-42
//!
//! # Delete a link
//! cargo run --bin admin -- links delete promo2024
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use slug_shortener::application::services::{StatsService, short_url};
use slug_shortener::domain::repositories::LinkRepository;
use slug_shortener::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing slug-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show click statistics
    Stats {
        /// Restrict to links of this owner
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List links, newest first
    List {
        /// Restrict to links of this owner
        #[arg(short, long)]
        owner: Option<String>,

        /// Maximum number of links to show
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Delete a link by slug
    Delete {
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Links { action } => handle_links_action(action, pool).await?,
        Commands::Stats { owner } => handle_stats(pool, owner).await?,
        Commands::Db { action } => handle_db_action(action, pool).await?,
    }

    Ok(())
}

async fn handle_links_action(action: LinksAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgLinkRepository::new(pool);

    match action {
        LinksAction::List { owner, limit } => list_links(&repo, owner, limit).await,
        LinksAction::Delete { slug, yes } => delete_link(&repo, slug, yes).await,
    }
}

/// Lists links in a table.
///
/// ```text
/// 🔗 Links
///
///   Slug         Clicks   Created              Destination
///   ───────────────────────────────────────────────────────────────
///   promo2024    12       2026-10-01 09:15     http://example.com/landing
/// ```
async fn list_links(
    repo: &PgLinkRepository,
    owner: Option<String>,
    limit: Option<i64>,
) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = repo
        .list(owner, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<20} {}",
        "Slug".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<8} {:<20} {}",
            link.slug.cyan(),
            link.click_count.to_string().bright_white(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.destination
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(repo: &PgLinkRepository, slug: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let destination = repo
        .get_destination(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Slug:        {}", slug.cyan());
    println!("  Destination: {}", destination.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(&slug, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays link and click totals, followed by the monthly breakdown.
async fn handle_stats(pool: Arc<PgPool>, owner: Option<String>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = StatsService::new(
        Arc::new(PgStatsRepository::new(pool)),
        Duration::from_secs(30),
    );
    let report = service
        .report(owner.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        report.total_links.to_string().bright_white().bold()
    );
    println!(
        "  Clicks: {}",
        report.total_clicks.to_string().bright_white().bold()
    );
    println!();

    if report.monthly.is_empty() {
        return Ok(());
    }

    println!("  {}", "By month".bright_white().bold());
    for month in &report.monthly {
        println!(
            "    {}  {}",
            month.month.cyan(),
            month.total_clicks.to_string().bright_white()
        );
    }
    println!();

    println!("  {}", "By link".bright_white().bold());
    let base_url =
        std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    for row in &report.per_slug {
        println!(
            "    {}  {:<40} {}",
            row.month.bright_black(),
            short_url(&base_url, &row.slug).cyan(),
            row.total_clicks.to_string().bright_white()
        );
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: Arc<PgPool>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgLinkRepository::new(pool.clone());
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool.as_ref())
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool.as_ref())
                .await
                .context("Failed to query links table (migrations not applied?)")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Version: {}", version.bright_black());
            println!("  Links:   {}", links.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
