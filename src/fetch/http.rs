// src/fetch/http.rs
// =============================================================================
// A fetcher that downloads real pages over HTTP(S).
//
// Key functionality:
// - One reqwest Client shared by every crawl task (connection pooling)
// - GET the page, treat anything but 2xx as a failed fetch
// - Summarise the page by its <title> and collect its links
// - Optionally keep the crawl on the seed's domain
//
// What this does NOT do: robots.txt, rate limiting, retries. A failed fetch
// is reported once and never tried again within the same crawl.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::html::{extract_html_links, extract_title};
use super::{Fetcher, Page};
use crate::error::FetchError;

pub struct HttpFetcher {
    client: Client,
    /// When set, links to other hosts are dropped before the crawler sees them
    scope: Option<Origin>,
}

// Host and port a same-domain crawl is kept on (IP-address hosts included)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Origin {
    host: String,
    port: Option<u16>,
}

impl Origin {
    fn of(url: &Url) -> Option<Self> {
        Some(Self {
            host: url.host_str()?.to_string(),
            port: url.port_or_known_default(),
        })
    }
}

impl HttpFetcher {
    // Builds the fetcher
    //
    // Parameters:
    //   timeout: per-request timeout
    //   same_domain_as: only follow links on this URL's host and port (None = follow everything)
    //
    // Fails if same_domain_as has no host (e.g. a file: or data: URL), since
    // there would be nothing to keep the crawl on.
    pub fn new(timeout: Duration, same_domain_as: Option<&Url>) -> Result<Self, FetchError> {
        let scope = match same_domain_as {
            None => None,
            Some(url) => Some(Origin::of(url).ok_or_else(|| FetchError::InvalidAddress {
                address: url.to_string(),
                reason: "URL has no host".to_string(),
            })?),
        };

        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("page-crawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, scope })
    }

    fn keep_link(&self, link: &str) -> bool {
        match &self.scope {
            None => true,
            Some(scope) => Url::parse(link)
                .ok()
                .and_then(|url| Origin::of(&url))
                .is_some_and(|origin| origin == *scope),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        let url = Url::parse(address).map_err(|e| FetchError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(FetchError::not_found(address));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                address: address.to_string(),
                status: status.as_u16(),
            });
        }

        // Relative links resolve against where we ended up after redirects
        let final_url = response.url().clone();
        let html = response.text().await?;

        let links = extract_html_links(&html, &final_url)
            .into_iter()
            .filter(|link| self.keep_link(link))
            .collect();

        Ok(Page::new(extract_title(&html), links))
    }
}
