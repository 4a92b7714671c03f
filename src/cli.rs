// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The three positional arguments follow the classic invocation:
//   word-crawler <SEED_URL> [MAX_DEPTH] [DEBUG_LEVEL]
// Everything else is an optional --flag.
// =============================================================================

use clap::Parser;

use crate::crawl::DEFAULT_MAX_DEPTH;
use crate::report::DEFAULT_TOP;

#[derive(Parser, Debug)]
#[command(
    name = "word-crawler",
    version,
    about = "Crawl a website and print its most frequent words",
    long_about = "word-crawler follows links from a seed page up to a maximum depth, \
                  counts every word it sees across all visited pages, and prints the \
                  most frequent ones as 'word;count' lines."
)]
pub struct Cli {
    /// Address to start from (e.g., https://example.com)
    ///
    /// A trailing '/' is added if missing
    pub seed_url: String,

    /// Maximum link depth (the seed page is depth 0)
    #[arg(default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Diagnostics level on stderr: 0 = quiet, 1 = pages and failures,
    /// 2 = scheduler details, 3 = everything
    #[arg(default_value_t = 0)]
    pub debug_level: u8,

    /// Number of words to print
    #[arg(long, default_value_t = DEFAULT_TOP)]
    pub top: usize,

    /// Output the report as JSON instead of 'word;count' lines
    #[arg(long)]
    pub json: bool,

    /// Number of pages processed in parallel (default: number of CPUs)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seconds to wait for running workers once the crawl is done
    #[arg(long, default_value_t = 60)]
    pub grace_secs: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}
