// src/crawl/counted.rs
// =============================================================================
// Counted completion: one shared result channel plus an in-flight counter.
//
// How it works:
// - Every task sends straight into the same channel
// - The number of live tasks is kept in a tokio watch channel
// - A parent takes its child's counter slot BEFORE spawning it, and the slot
//   is released when the child's task finishes
// - The consumer waits (no polling) for the counter to hit zero, then drains
//   whatever is still buffered and ends the stream
//
// Because the parent still holds its own slot while it takes its children's,
// the counter can never touch zero while there is still work about to start.
//
// The shared context keeps a sender alive for the whole crawl, so the
// channel itself never closes: the counter is the only completion signal.
// =============================================================================

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::{mpsc, watch};

use super::result::CrawlResult;
use super::task::{visit, CrawlContext};

// Number of crawl tasks that have been claimed but not finished yet
pub(crate) struct InFlight {
    count: watch::Sender<usize>,
}

impl InFlight {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self { count }
    }

    // Claims a slot for a task that is about to be spawned
    pub fn enter(self: &Arc<Self>) -> InFlightGuard {
        self.count.send_modify(|count| *count += 1);
        InFlightGuard {
            in_flight: Arc::clone(self),
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        *self.count.borrow()
    }

    // Resolves once no task is in flight
    pub async fn idle(&self) {
        let mut count = self.count.subscribe();
        // Only fails if the sender is dropped, and we are holding it
        let _ = count.wait_for(|count| *count == 0).await;
    }
}

// Releases its task's slot when dropped, whichever way the task ends
pub(crate) struct InFlightGuard {
    in_flight: Arc<InFlight>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.count.send_modify(|count| {
            debug_assert!(*count > 0, "in-flight counter went negative");
            *count -= 1;
        });
    }
}

struct CountedContext {
    crawl: CrawlContext,
    in_flight: Arc<InFlight>,
    results: mpsc::UnboundedSender<CrawlResult>,
}

// Starts the crawl and returns the merged stream of every task's result
//
// Must be called from inside a tokio runtime: the root task is spawned
// before this returns.
pub(crate) fn crawl(
    crawl: CrawlContext,
    address: String,
    depth: usize,
) -> BoxStream<'static, CrawlResult> {
    let (results, rx) = mpsc::unbounded_channel();
    let ctx = Arc::new(CountedContext {
        crawl,
        in_flight: Arc::new(InFlight::new()),
        results,
    });

    let root = ctx.in_flight.enter();
    spawn_task(Arc::clone(&ctx), address, depth, root);

    // State: (context, receiver, has the counter reached zero yet)
    stream::unfold((ctx, rx, false), |(ctx, mut rx, idle)| async move {
        if !idle {
            let next = tokio::select! {
                biased;
                Some(result) = rx.recv() => Some(result),
                _ = ctx.in_flight.idle() => None,
            };
            if let Some(result) = next {
                return Some((result, (ctx, rx, false)));
            }
            tracing::debug!("no crawl tasks left in flight");
        }

        // Every task sent its result before releasing its slot, so once the
        // counter is zero anything left is already sitting in the buffer
        rx.try_recv().ok().map(|result| (result, (ctx, rx, true)))
    })
    .boxed()
}

// `guard` was taken by the parent before this call and is released when the
// spawned task finishes
fn spawn_task(ctx: Arc<CountedContext>, address: String, depth: usize, guard: InFlightGuard) {
    tokio::spawn(async move {
        let _guard = guard;

        let Some(visit) = visit(&ctx.crawl, &address, depth).await else {
            return;
        };

        let _ = ctx.results.send(visit.result);

        for link in visit.links {
            // Claim the child's slot while we still hold ours
            let child = ctx.in_flight.enter();
            spawn_task(Arc::clone(&ctx), link, depth - 1, child);
        }
    });
}
