// src/fetch/fixture.rs
// =============================================================================
// An in-memory fetcher that returns canned pages.
//
// Every address in the map is a page with some content and a list of links.
// Any address that is not in the map fails with "not found: <address>".
//
// golang_tour() builds the small site used by the `fixture` command:
//
//   /         -> /pkg/, /cmd/
//   /pkg/     -> /, /cmd/, /pkg/fmt/, /pkg/os/
//   /pkg/fmt/ -> /, /pkg/
//   /pkg/os/  -> /, /pkg/
//   /cmd/     (missing, so fetching it fails)
// =============================================================================

use std::collections::HashMap;

use async_trait::async_trait;

use super::{Fetcher, Page};
use crate::error::FetchError;

pub const GOLANG_ROOT: &str = "https://golang.org/";

#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, Page>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds (or replaces) one page
    pub fn with_page(mut self, address: &str, content: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|link| link.to_string()).collect();
        self.pages
            .insert(address.to_string(), Page::new(content, links));
        self
    }

    pub fn golang_tour() -> Self {
        Self::new()
            .with_page(
                GOLANG_ROOT,
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"],
            )
            .with_page(
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
            .with_page(
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        self.pages
            .get(address)
            .cloned()
            .ok_or_else(|| FetchError::not_found(address))
    }
}
