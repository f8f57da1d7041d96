// src/crawl/test_support.rs
// =============================================================================
// Fetcher wrappers used by the crawl tests.
//
// - CountingFetcher: records how often each address was fetched
// - SlowFetcher: delays fetches so tasks really overlap
//
// Both wrap another Fetcher, so they can be stacked on top of a fixture.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::fetch::{Fetcher, Page};

// Records how many times each address was fetched
pub(crate) struct CountingFetcher<F> {
    inner: F,
    calls: Mutex<HashMap<String, usize>>,
}

impl<F: Fetcher> CountingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self, address: &str) -> usize {
        self.calls.lock().unwrap().get(address).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CountingFetcher<F> {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_insert(0) += 1;
        self.inner.fetch(address).await
    }
}

// Sleeps before every fetch, except for the addresses listed in `except`
pub(crate) struct SlowFetcher<F> {
    inner: F,
    delay: Duration,
    except: HashSet<String>,
}

impl<F: Fetcher> SlowFetcher<F> {
    pub fn new(inner: F, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            except: HashSet::new(),
        }
    }

    pub fn except(mut self, address: &str) -> Self {
        self.except.insert(address.to_string());
        self
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for SlowFetcher<F> {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        if !self.except.contains(address) {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch(address).await
    }
}
