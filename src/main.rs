// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up diagnostics on stderr according to the debug level
// 3. Run the crawl
// 4. Print the most frequent words on stdout
// 5. Exit with proper code (0 = success, 1 = fatal error)
//
// A page that fails to load is never fatal; only a bad seed address or bad
// settings make the program exit with 1.
// =============================================================================

mod cli;
mod crawl;
mod error;
mod extract;
mod fetch;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use cli::Cli;
use crawl::{CrawlConfig, CrawlOutcome, Scheduler};
use fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_diagnostics(cli.debug_level);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = CrawlConfig::new(&cli.seed_url, cli.max_depth)?
        .with_grace_period(Duration::from_secs(cli.grace_secs))
        .with_fetch_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }

    let fetcher = HttpFetcher::new(config.fetch_timeout).context("failed to build HTTP client")?;
    let outcome = Scheduler::new(config, Arc::new(fetcher)).run().await?;

    print_results(&outcome, cli.top, cli.json)
}

// Diagnostics go to stderr so they never mix with the report on stdout.
// Level 0 keeps per-page events silent.
fn init_diagnostics(debug_level: u8) {
    let max_level = match debug_level {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Prints the report either as 'word;count' lines or JSON
fn print_results(outcome: &CrawlOutcome, top: usize, json: bool) -> Result<()> {
    let entries = report::top_words(&outcome.words, top);

    if json {
        let json_output = report::render_json(&outcome.summary, &entries)?;
        println!("{}", json_output);
    } else {
        print!("{}", report::render_text(&entries));
    }
    Ok(())
}
