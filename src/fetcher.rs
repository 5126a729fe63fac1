//! Background page fetches for the event loop.
//!
//! Each request runs on its own tokio task so the UI keeps handling input
//! while the network call is pending. Results come back over a channel and
//! are applied by the loop with `ListingsBrowser::finish_request`.

use crate::browser::PendingRequest;
use crate::error::FetchError;
use crate::listings::{Listing, ListingsSource};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Outcome of one background request.
#[derive(Debug)]
pub struct FetchCompletion {
    /// Id of the `PendingRequest` this answers
    pub id: u64,
    pub result: Result<Vec<Listing>, FetchError>,
}

/// Spawns fetches and collects their completions.
pub struct Fetcher<S> {
    source: Arc<S>,
    tx: UnboundedSender<FetchCompletion>,
    rx: UnboundedReceiver<FetchCompletion>,
}

impl<S> Fetcher<S>
where
    S: ListingsSource + Send + Sync + 'static,
{
    pub fn new(source: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            tx,
            rx,
        }
    }

    /// Run `pending` on a new task.
    ///
    /// In-flight requests are neither cancelled nor deduplicated.
    pub fn dispatch(&self, pending: PendingRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(&pending.query).await;
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send(FetchCompletion {
                id: pending.id,
                result,
            });
        });
    }

    /// Next finished request, if any, without waiting.
    pub fn try_next(&mut self) -> Option<FetchCompletion> {
        self.rx.try_recv().ok()
    }
}
