// src/lib.rs
// =============================================================================
// page-crawler as a library.
//
// Give it a fetcher, a seed address and a depth; get back a stream with one
// result per visited address: Found, AlreadyVisited or Error.
//
//   let crawler = Crawler::new(Arc::new(FixtureFetcher::golang_tour()));
//   let mut results = crawler.crawl("https://golang.org/", 4);
//   while let Some(result) = results.next().await {
//       println!("{}", result);
//   }
//
// Modules:
// - crawl: the concurrent traversal, visited set and completion detection
// - fetch: the Fetcher trait plus an in-memory and an HTTP implementation
// - error: what a fetch can fail with
// =============================================================================

pub mod crawl;
pub mod error;
pub mod fetch;

pub use crawl::{CrawlResult, CrawlSummary, Crawler, Strategy};
pub use error::FetchError;
pub use fetch::{Fetcher, FixtureFetcher, HttpFetcher, Page};
