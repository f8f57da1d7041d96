// src/error.rs
// =============================================================================
// Errors a fetch can fail with.
//
// A FetchError only ever lives inside a single crawl task: the crawler turns
// it into a CrawlResult::Error and carries on with the rest of the crawl.
// Nothing here is ever propagated out of the crawler with `?`.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The address is not known to the fetcher (fixture miss, 404, ...)
    #[error("not found: {address}")]
    NotFound { address: String },

    /// The address could not be turned into a URL
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The server answered, but not with a 2xx
    #[error("HTTP {status} fetching {address}")]
    Status { address: String, status: u16 },

    /// Timeout, DNS failure, TLS failure, ...
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    pub fn not_found(address: impl Into<String>) -> Self {
        FetchError::NotFound {
            address: address.into(),
        }
    }
}
