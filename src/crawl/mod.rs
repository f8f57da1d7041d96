// src/crawl/mod.rs
// =============================================================================
// This module handles the recursive, concurrent crawl.
//
// Features:
// - One tokio task per page visit, children spawned for every discovered link
// - A shared visited set so no address is ever fetched twice in one crawl
// - Depth limit counted down from the seed
// - Two ways of knowing the crawl is finished (see structural.rs / counted.rs)
// - A failed fetch is reported and never stops the rest of the crawl
//
// Rust concepts:
// - Arc: Shared ownership of the crawl context between many tasks
// - Mutex: Guarding the visited set
// - Streams: Results arrive one at a time while the crawl is still running
// =============================================================================

mod counted;
mod crawler;
mod result;
mod structural;
mod task;
mod visited;

#[cfg(test)]
mod test_support;

// Re-export the public crawling API
pub use crawler::{Crawler, Strategy};
pub use result::{CrawlResult, CrawlSummary};
