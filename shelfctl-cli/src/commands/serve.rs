//! HTTP server command
//!
//! Connects to PostgreSQL (or keeps books in memory), applies pending
//! migrations, and runs the book list server until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use shelfctl_server::covers::{CoverAggregator, FEATURED_ISBNS};
use shelfctl_server::db::{connect, migrations, PoolSettings};
use shelfctl_server::{run_server, AppState, BookStore, MemoryBookStore, PgBookStore, ServerConfig};

use crate::config::{CoverArgs, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SHELFCTL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout: u64,

    /// Directory of static assets served under /static
    #[arg(long, env = "SHELFCTL_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Keep books in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,

    /// Do not apply pending schema migrations at startup
    #[arg(long)]
    pub skip_migrations: bool,

    /// Comma-separated ISBNs for /covers/featured
    #[arg(long, env = "SHELFCTL_FEATURED_ISBNS", value_delimiter = ',')]
    pub featured: Vec<String>,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub covers: CoverArgs,
}

async fn open_store(args: &ServeArgs) -> Result<Arc<dyn BookStore>> {
    if args.memory {
        tracing::warn!("Using in-memory book store; data is lost on exit");
        return Ok(Arc::new(MemoryBookStore::new()));
    }

    tracing::info!(database = %args.database.redacted_url(), "Connecting to database");
    let settings = PoolSettings {
        max_connections: args.database.db_max_connections,
        acquire_timeout: Duration::from_secs(args.database.db_acquire_timeout_secs),
    };
    let pool = connect(&args.database.connection_url(), &settings)
        .await
        .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::warn!("Skipping schema migrations");
    } else {
        let applied = migrations::run(&pool)
            .await
            .context("Failed to apply schema migrations")?;
        tracing::info!(
            applied,
            version = migrations::latest_version(),
            "Schema ready"
        );
    }

    Ok(Arc::new(PgBookStore::new(pool)))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting shelfctl server on {}", args.bind);

    let books = open_store(&args).await?;

    let featured = if args.featured.is_empty() {
        FEATURED_ISBNS.iter().map(|s| s.to_string()).collect()
    } else {
        args.featured.clone()
    };

    let cover_config = args.covers.to_config();
    tracing::debug!(?cover_config, "Cover lookups configured");

    let state = AppState {
        books,
        covers: CoverAggregator::from_config(&cover_config),
        featured,
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout),
        static_dir: args.static_dir.clone(),
    };

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
