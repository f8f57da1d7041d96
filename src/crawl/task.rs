// src/crawl/task.rs
// =============================================================================
// The work one crawl task does for one address, shared by both completion
// strategies (structural and counted).
//
// Per task:
//
//   depth == 0        -> nothing to report, no children
//   already visited   -> AlreadyVisited, no children
//   fetch fails       -> Error, no children
//   fetch succeeds    -> Found, one child per discovered link at depth - 1
//
// How the children get spawned and how their results reach the caller is
// up to the strategy.
// =============================================================================

use std::sync::Arc;

use crate::fetch::Fetcher;

use super::result::CrawlResult;
use super::visited::VisitedSet;

// Everything the tasks of ONE crawl share. Built fresh for every crawl and
// handed to each task through an Arc, so two crawls never see each other's
// visited addresses.
pub(crate) struct CrawlContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub visited: VisitedSet,
}

impl CrawlContext {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            visited: VisitedSet::new(),
        }
    }
}

// What a task produced
pub(crate) struct Visit {
    pub result: CrawlResult,
    /// Addresses to crawl next, at depth - 1 (empty unless the fetch succeeded)
    pub links: Vec<String>,
}

// Runs one task. Returns None only when the depth is exhausted.
pub(crate) async fn visit(ctx: &CrawlContext, address: &str, depth: usize) -> Option<Visit> {
    if depth == 0 {
        tracing::debug!(address, "depth exhausted");
        return None;
    }

    if ctx.visited.test_and_mark(address) {
        tracing::debug!(address, depth, "already visited");
        return Some(Visit {
            result: CrawlResult::AlreadyVisited {
                address: address.to_string(),
            },
            links: Vec::new(),
        });
    }

    match ctx.fetcher.fetch(address).await {
        Ok(page) => {
            tracing::debug!(address, depth, links = page.links.len(), "fetched");
            // Links found at depth 1 would be crawled at depth 0, which
            // reports nothing, so don't bother spawning them
            let links = if depth > 1 { page.links } else { Vec::new() };
            Some(Visit {
                result: CrawlResult::Found {
                    address: address.to_string(),
                    content: page.content,
                },
                links,
            })
        }
        Err(e) => {
            tracing::warn!(address, depth, error = %e, "fetch failed");
            Some(Visit {
                result: CrawlResult::Error {
                    address: address.to_string(),
                    message: e.to_string(),
                },
                links: Vec::new(),
            })
        }
    }
}
