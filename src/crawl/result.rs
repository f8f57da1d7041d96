// src/crawl/result.rs
// =============================================================================
// What each crawl task reports.
//
// Every task that gets past the depth check produces exactly ONE of these:
// - Found: the page was fetched for the first time
// - AlreadyVisited: another task got to this address first
// - Error: the fetch failed (this never stops the rest of the crawl)
//
// Display gives the human-readable line, Serialize gives the JSON object.
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CrawlResult {
    Found { address: String, content: String },
    AlreadyVisited { address: String },
    Error { address: String, message: String },
}

impl CrawlResult {
    pub fn address(&self) -> &str {
        match self {
            CrawlResult::Found { address, .. }
            | CrawlResult::AlreadyVisited { address }
            | CrawlResult::Error { address, .. } => address,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, CrawlResult::Found { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CrawlResult::Error { .. })
    }
}

impl fmt::Display for CrawlResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // {:?} quotes and escapes the content
            CrawlResult::Found { address, content } => write!(f, "found: {} {:?}", address, content),
            CrawlResult::AlreadyVisited { address } => write!(f, "already fetched {}", address),
            CrawlResult::Error { message, .. } => f.write_str(message),
        }
    }
}

// Running totals for one crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub found: usize,
    pub already_visited: usize,
    pub errors: usize,
}

impl CrawlSummary {
    pub fn record(&mut self, result: &CrawlResult) {
        match result {
            CrawlResult::Found { .. } => self.found += 1,
            CrawlResult::AlreadyVisited { .. } => self.already_visited += 1,
            CrawlResult::Error { .. } => self.errors += 1,
        }
    }

    /// Number of task attempts that reported something
    pub fn total(&self) -> usize {
        self.found + self.already_visited + self.errors
    }
}

impl<'a> FromIterator<&'a CrawlResult> for CrawlSummary {
    fn from_iter<I: IntoIterator<Item = &'a CrawlResult>>(iter: I) -> Self {
        let mut summary = CrawlSummary::default();
        for result in iter {
            summary.record(result);
        }
        summary
    }
}
