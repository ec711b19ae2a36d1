//! shelfctl CLI - book list web server and cover lookups
//!
//! - `serve`: run the server-rendered book list with the cover proxy
//! - `covers`: look up cover images from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "shelfctl",
    author,
    version,
    about = "Track the books you read, with cover images from Open Library"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the book list web server
    Serve(commands::serve::ServeArgs),
    /// Fetch cover images for identifiers and print them
    Covers(commands::covers::CoversArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env fallbacks
    let dotenv_files = config::load_dotenv()?;
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    for path in &dotenv_files {
        tracing::debug!("Loaded .env from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Covers(args) => commands::run_covers(args).await?,
    }

    Ok(())
}
