// src/crawl/structural.rs
// =============================================================================
// Structural completion: every task owns its own result channel.
//
// How it works:
// 1. A task runs its visit and sends its own result first
// 2. It spawns one child task per discovered link, all at once, so the
//    children fetch concurrently
// 3. It then forwards each child's stream into its own, one child at a time
// 4. When it is done forwarding it drops its sender, closing its stream
//
// A task's stream therefore ends only after all of its descendants' streams
// have ended, and the root stream ending IS "the crawl is complete".
// No counter is needed.
// =============================================================================

use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::StreamExt;

use super::result::CrawlResult;
use super::task::{visit, CrawlContext};

// Starts the task for `address` and returns the stream of its subtree's results
//
// This is a plain fn (not async) so it can call itself from inside the
// spawned task without building an infinitely sized future type.
pub(crate) fn crawl(
    ctx: Arc<CrawlContext>,
    address: String,
    depth: usize,
) -> UnboundedReceiver<CrawlResult> {
    let (tx, rx) = mpsc::unbounded();

    tokio::spawn(async move {
        let Some(visit) = visit(&ctx, &address, depth).await else {
            // Depth exhausted: dropping tx closes the stream with no results
            return;
        };

        // The receiver may already be gone if the consumer stopped reading;
        // the subtree still runs to completion, its results just go nowhere
        let _ = tx.unbounded_send(visit.result);

        if !visit.links.is_empty() {
            tracing::debug!(address = %address, children = visit.links.len(), "spawning children");
        }

        let children: Vec<_> = visit
            .links
            .into_iter()
            .map(|link| crawl(Arc::clone(&ctx), link, depth - 1))
            .collect();

        for mut child in children {
            while let Some(result) = child.next().await {
                let _ = tx.unbounded_send(result);
            }
        }
    });

    rx
}
