// src/crawl/crawler.rs
// =============================================================================
// The public face of the crawl module.
//
// A Crawler holds a fetcher and a completion strategy. Every call to crawl()
// starts an independent crawl with its own visited set, so one Crawler can run
// several crawls at the same time without them interfering.
//
// Rust concepts:
// - BoxStream: a heap-allocated Stream, so both strategies return one type
// - ValueEnum: lets clap parse `--strategy counted` straight into the enum
// =============================================================================

use std::fmt;
use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::fetch::Fetcher;

use super::result::CrawlResult;
use super::task::CrawlContext;
use super::{counted, structural};

// How the crawler knows the crawl is over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Each task's stream ends after its children's streams end
    #[default]
    Structural,
    /// All tasks share one channel; an in-flight counter signals the end
    Counted,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Structural => f.write_str("structural"),
            Strategy::Counted => f.write_str("counted"),
        }
    }
}

#[derive(Clone)]
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    strategy: Strategy,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Crawls from `seed` down to `depth` levels and streams one result per
    /// task attempt.
    ///
    /// The stream ends exactly once, after every task has finished. A task's
    /// own result always comes before its children's; the order between
    /// sibling subtrees is not something to rely on.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn crawl(&self, seed: &str, depth: usize) -> BoxStream<'static, CrawlResult> {
        tracing::info!(seed, depth, strategy = %self.strategy, "starting crawl");

        let ctx = CrawlContext::new(Arc::clone(&self.fetcher));
        match self.strategy {
            Strategy::Structural => structural::crawl(Arc::new(ctx), seed.to_string(), depth).boxed(),
            Strategy::Counted => counted::crawl(ctx, seed.to_string(), depth),
        }
    }

    /// Runs a whole crawl and collects its results.
    pub async fn crawl_to_vec(&self, seed: &str, depth: usize) -> Vec<CrawlResult> {
        self.crawl(seed, depth).collect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::crawl::result::CrawlSummary;
    use crate::crawl::test_support::{CountingFetcher, SlowFetcher};
    use crate::fetch::FixtureFetcher;

    const STRATEGIES: [Strategy; 2] = [Strategy::Structural, Strategy::Counted];

    fn golang_crawler(strategy: Strategy) -> Crawler {
        Crawler::new(Arc::new(FixtureFetcher::golang_tour())).with_strategy(strategy)
    }

    fn count_by_address<'a>(
        results: &'a [CrawlResult],
        keep: impl Fn(&CrawlResult) -> bool,
    ) -> HashMap<&'a str, usize> {
        let mut counts = HashMap::new();
        for result in results.iter().filter(|r| keep(*r)) {
            *counts.entry(result.address()).or_insert(0) += 1;
        }
        counts
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_golang_tour_at_depth_four() {
        for strategy in STRATEGIES {
            let results = golang_crawler(strategy)
                .crawl_to_vec("https://golang.org/", 4)
                .await;

            let found = count_by_address(&results, CrawlResult::is_found);
            assert_eq!(found.len(), 4, "{strategy}: {results:?}");
            for address in [
                "https://golang.org/",
                "https://golang.org/pkg/",
                "https://golang.org/pkg/fmt/",
                "https://golang.org/pkg/os/",
            ] {
                assert_eq!(found.get(address), Some(&1), "{strategy}: {address}");
            }

            let errors = count_by_address(&results, CrawlResult::is_error);
            assert_eq!(errors.len(), 1, "{strategy}");
            assert_eq!(errors.get("https://golang.org/cmd/"), Some(&1));

            // 1 root + 2 links of "/" + 4 links of "/pkg/" + 2 links each of fmt/os
            let summary: CrawlSummary = results.iter().collect();
            assert_eq!(
                summary,
                CrawlSummary {
                    found: 4,
                    already_visited: 6,
                    errors: 1
                },
                "{strategy}"
            );
        }
    }

    #[tokio::test]
    async fn test_depth_zero_yields_nothing() {
        for strategy in STRATEGIES {
            let results = golang_crawler(strategy)
                .crawl_to_vec("https://golang.org/", 0)
                .await;
            assert!(results.is_empty(), "{strategy}");
        }
    }

    #[tokio::test]
    async fn test_unknown_seed_yields_single_error() {
        for strategy in STRATEGIES {
            let results = golang_crawler(strategy)
                .crawl_to_vec("https://golang.org/missing/", 3)
                .await;
            assert_eq!(
                results,
                vec![CrawlResult::Error {
                    address: "https://golang.org/missing/".to_string(),
                    message: "not found: https://golang.org/missing/".to_string(),
                }],
                "{strategy}"
            );
        }
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_reports_revisit() {
        let fixture = FixtureFetcher::new()
            .with_page("a", "A", &["b"])
            .with_page("b", "B", &["a"]);

        for strategy in STRATEGIES {
            let crawler = Crawler::new(Arc::new(fixture.clone())).with_strategy(strategy);
            let results = crawler.crawl_to_vec("a", 100).await;

            assert_eq!(
                results,
                vec![
                    CrawlResult::Found {
                        address: "a".to_string(),
                        content: "A".to_string()
                    },
                    CrawlResult::Found {
                        address: "b".to_string(),
                        content: "B".to_string()
                    },
                    CrawlResult::AlreadyVisited {
                        address: "a".to_string()
                    },
                ],
                "{strategy}"
            );
        }
    }

    #[tokio::test]
    async fn test_never_fetches_past_depth() {
        let chain = FixtureFetcher::new()
            .with_page("one", "1", &["two"])
            .with_page("two", "2", &["three"])
            .with_page("three", "3", &["four"])
            .with_page("four", "4", &[]);

        for strategy in STRATEGIES {
            let counting = Arc::new(CountingFetcher::new(chain.clone()));
            let crawler = Crawler::new(counting.clone()).with_strategy(strategy);

            let results = crawler.crawl_to_vec("one", 2).await;
            let addresses: Vec<_> = results.iter().map(|r| r.address()).collect();
            assert_eq!(addresses, vec!["one", "two"], "{strategy}");

            assert_eq!(counting.calls("one"), 1);
            assert_eq!(counting.calls("two"), 1);
            assert_eq!(counting.calls("three"), 0);
            assert_eq!(counting.total_calls(), 2);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_each_address_fetched_at_most_once_under_contention() {
        // Every hub page links to every other hub page, so each address is
        // discovered by many tasks at roughly the same time
        let hubs: Vec<String> = (0..12).map(|i| format!("hub-{i}")).collect();
        let hub_refs: Vec<&str> = hubs.iter().map(String::as_str).collect();
        let mut fixture = FixtureFetcher::new();
        for hub in &hubs {
            fixture = fixture.with_page(hub, hub, &hub_refs);
        }

        for strategy in STRATEGIES {
            let counting = Arc::new(CountingFetcher::new(SlowFetcher::new(
                fixture.clone(),
                Duration::from_millis(2),
            )));
            let crawler = Crawler::new(counting.clone()).with_strategy(strategy);

            let results = crawler.crawl_to_vec("hub-0", 3).await;

            for hub in &hubs {
                assert_eq!(counting.calls(hub), 1, "{strategy}: {hub}");
            }

            let summary: CrawlSummary = results.iter().collect();
            assert_eq!(summary.found, hubs.len(), "{strategy}");
            assert_eq!(summary.errors, 0, "{strategy}");
            // Every task at depth > 0 reports once: the root, then one task per
            // link of every page found at depth 3 or 2
            assert_eq!(summary.total(), results.len());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_slow_children_are_not_dropped() {
        // The root answers instantly and its children take a while; a crawl
        // that decided it was done early would lose the children's results
        let fixture = FixtureFetcher::new()
            .with_page("root", "Root", &["left", "right"])
            .with_page("left", "Left", &[])
            .with_page("right", "Right", &[]);

        for strategy in STRATEGIES {
            let slow = SlowFetcher::new(fixture.clone(), Duration::from_millis(20)).except("root");
            let crawler = Crawler::new(Arc::new(slow)).with_strategy(strategy);

            let results = crawler.crawl_to_vec("root", 2).await;
            let summary: CrawlSummary = results.iter().collect();
            assert_eq!(summary.found, 3, "{strategy}: {results:?}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_crawls_do_not_share_visited_addresses() {
        for strategy in STRATEGIES {
            let crawler = golang_crawler(strategy);

            let (first, second) = tokio::join!(
                crawler.crawl_to_vec("https://golang.org/", 4),
                crawler.crawl_to_vec("https://golang.org/", 4),
            );

            let first: CrawlSummary = first.iter().collect();
            let second: CrawlSummary = second.iter().collect();
            assert_eq!(first.found, 4, "{strategy}");
            assert_eq!(first, second, "{strategy}");
        }
    }
}
