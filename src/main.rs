// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (diagnostics go to stderr, results to stdout)
// 3. Build the right fetcher and run the crawl
// 4. Print results as they arrive, or as JSON at the end
// 5. Exit with proper code (0 = all fetches ok, 1 = some fetches failed, 2 = error)
// =============================================================================

mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, CrawlArgs};
use page_crawler::{CrawlResult, CrawlSummary, Crawler, Fetcher, FixtureFetcher, HttpFetcher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when it is set; otherwise warnings only, or debug with -v
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = crawl finished, every fetch succeeded
//   Ok(1) = crawl finished, at least one fetch failed
//   Err = we couldn't even start
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Fixture { seed, depth, crawl } => {
            let fetcher = Arc::new(FixtureFetcher::golang_tour());
            run_crawl(fetcher, &seed, depth, &crawl).await
        }
        Commands::Site {
            website_url,
            depth,
            timeout_secs,
            any_domain,
            crawl,
        } => {
            let same_domain = (!any_domain).then_some(&website_url);
            let fetcher = HttpFetcher::new(Duration::from_secs(timeout_secs), same_domain)
                .context("failed to build HTTP client")?;
            run_crawl(Arc::new(fetcher), website_url.as_str(), depth, &crawl).await
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    seed: &'a str,
    depth: usize,
    strategy: page_crawler::Strategy,
    results: Vec<CrawlResult>,
    summary: CrawlSummary,
}

async fn run_crawl(
    fetcher: Arc<dyn Fetcher>,
    seed: &str,
    depth: usize,
    args: &CrawlArgs,
) -> Result<i32> {
    let crawler = Crawler::new(fetcher).with_strategy(args.strategy);
    let mut stream = crawler.crawl(seed, depth);

    let mut summary = CrawlSummary::default();
    let mut results = Vec::new();

    while let Some(result) = stream.next().await {
        summary.record(&result);
        if args.json {
            results.push(result);
        } else {
            println!("{}", result);
        }
    }

    tracing::info!(
        found = summary.found,
        already_visited = summary.already_visited,
        errors = summary.errors,
        "crawl complete"
    );

    if args.json {
        let report = JsonReport {
            seed,
            depth,
            strategy: args.strategy,
            results,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&summary);
    }

    Ok(if summary.errors > 0 { 1 } else { 0 })
}

fn print_summary(summary: &CrawlSummary) {
    println!();
    println!("📊 Summary:");
    println!("   ✅ Found: {}", summary.found);
    println!("   🔁 Already fetched: {}", summary.already_visited);
    println!("   ❌ Errors: {}", summary.errors);
    println!("   📋 Total: {}", summary.total());
}
