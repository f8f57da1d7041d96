// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::{Args, Parser, Subcommand};
use page_crawler::fetch::GOLANG_ROOT;
use page_crawler::Strategy;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "page-crawler",
    version,
    about = "Recursively crawl pages, reporting each one exactly once",
    long_about = "page-crawler follows links from a seed address down to a maximum depth, \
                  fetching every page concurrently and at most once. Every visit is reported \
                  as found, already fetched, or an error."
)]
pub struct Cli {
    /// Print debug diagnostics to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

// Options shared by every subcommand
#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// How the crawler detects that every task has finished
    #[arg(long, value_enum, default_value_t = Strategy::Structural)]
    pub strategy: Strategy,

    /// Output results in JSON format instead of one line per page
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the built-in in-memory site (no network access)
    ///
    /// Example: page-crawler fixture --depth 4 --strategy counted
    Fixture {
        /// Address to start from
        #[arg(long, default_value = GOLANG_ROOT)]
        seed: String,

        /// Maximum crawl depth (0 = visit nothing, 1 = just the seed)
        #[arg(long, default_value_t = 4)]
        depth: usize,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Crawl a real website over HTTP(S)
    ///
    /// Example: page-crawler site https://example.com --depth 2
    Site {
        /// Website URL to start from (e.g., https://example.com)
        website_url: url::Url,

        /// Maximum crawl depth (0 = visit nothing, 1 = just the start page)
        #[arg(long, default_value_t = 2)]
        depth: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Follow links to other domains too
        #[arg(long)]
        any_domain: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}
