// src/fetch/mod.rs
// =============================================================================
// The fetch capability: "give me the content of this address and the links
// on it". The crawler only ever talks to the Fetcher trait, so it does not
// care whether pages come from the network or from an in-memory map.
//
// Submodules:
// - fixture: canned pages kept in memory (used by tests and `fixture` command)
// - http: real pages fetched with reqwest
// - html: pulls the title and links out of an HTML document
//
// Rust concepts:
// - Traits: An interface that several types can implement
// - async-trait: Lets trait methods be async and still work behind dyn
// - Arc<dyn Trait>: Shared ownership of "some type implementing Trait"
// =============================================================================

mod fixture;
mod html;
mod http;

pub use fixture::{FixtureFetcher, GOLANG_ROOT};
pub use html::{extract_html_links, extract_title};
pub use http::HttpFetcher;

use async_trait::async_trait;

use crate::error::FetchError;

// What a successful fetch hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Short human-readable summary of the page (fixture body, HTML title)
    pub content: String,
    /// Outbound addresses discovered on the page, in document order
    pub links: Vec<String>,
}

impl Page {
    pub fn new(content: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            content: content.into(),
            links,
        }
    }
}

/// Retrieves a page and the addresses it links to.
///
/// Implementations must be safe to call from many crawl tasks at once;
/// the crawler guarantees it calls `fetch` at most once per address per crawl.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Send + Sync on the trait?
//    - Every crawl task runs on tokio's thread pool
//    - They all share ONE fetcher through an Arc
//    - Send + Sync tells the compiler that sharing across threads is fine
//
// 2. Why #[async_trait]?
//    - We want to store the fetcher as Arc<dyn Fetcher>
//    - async_trait boxes the returned future so the trait stays dyn-compatible
// -----------------------------------------------------------------------------
