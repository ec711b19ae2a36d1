//! Bulk cover lookup from the terminal
//!
//! Runs the same aggregator as `GET /covers` without a database, which
//! makes it a quick check that the provider is reachable.

use anyhow::{Context, Result};
use clap::Parser;

use shelfctl_server::covers::CoverAggregator;
use shelfctl_server::models::{CoverLookupResult, CoverScheme, CoverSize};

use crate::config::CoverArgs;

/// Arguments for the covers command
#[derive(Parser, Debug)]
pub struct CoversArgs {
    /// Identifiers to look up (e.g. ISBNs)
    #[arg(required = true)]
    pub identifiers: Vec<String>,

    /// Identifier scheme: isbn, oclc, lccn, olid or id
    #[arg(long, default_value = "isbn")]
    pub scheme: CoverScheme,

    /// Image size: S, M or L
    #[arg(long, default_value = "L")]
    pub size: CoverSize,

    /// Print one "identifier<TAB>found|missing" line per result instead of JSON
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub covers: CoverArgs,
}

fn summary_lines(results: &[CoverLookupResult]) -> Vec<String> {
    results
        .iter()
        .map(|r| {
            let state = if r.is_missing() { "missing" } else { "found" };
            format!("{}\t{}", r.identifier, state)
        })
        .collect()
}

/// Fetch covers and print them
pub async fn run_covers(args: CoversArgs) -> Result<()> {
    let aggregator = CoverAggregator::from_config(&args.covers.to_config());

    let results = aggregator
        .fetch_all(args.scheme, args.identifiers, args.size)
        .await;

    let missing = results.iter().filter(|r| r.is_missing()).count();
    tracing::info!(total = results.len(), missing, "Cover lookup finished");

    if args.summary {
        for line in summary_lines(&results) {
            println!("{}", line);
        }
    } else {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize covers")?;
        println!("{}", json);
    }

    Ok(())
}
