use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

use crate::fetch::BookSource;
use crate::formats::Batch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub url: String,
}

/// Result of one search, posted back to whoever owns the view.
#[derive(Debug, Clone)]
pub struct SearchCompletion {
    pub ticket: SearchTicket,
    pub batch: Batch,
}

/// Turns a keyword into one background fetch whose result is sent over a channel.
///
/// Searches are fire-and-forget: nothing tracks the ones still in flight, so overlapping
/// searches complete independently and in no particular order.
#[derive(Clone)]
pub struct QueryDispatcher {
    source: Arc<dyn BookSource>,
    api_base: String,
    next_seq: Arc<AtomicU64>,
    completions: mpsc::UnboundedSender<SearchCompletion>,
}

impl QueryDispatcher {
    pub fn new(
        source: Arc<dyn BookSource>,
        api_base: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<SearchCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            source,
            api_base: api_base.into(),
            next_seq: Arc::new(AtomicU64::new(1)),
            completions: tx,
        };
        (dispatcher, rx)
    }

    /// Must be called from within a tokio runtime.
    pub fn search(&self, keyword: &str) -> SearchTicket {
        let ticket = SearchTicket {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            url: crate::query::request_url(&self.api_base, keyword),
        };
        tracing::info!(seq = ticket.seq, url = %ticket.url, "dispatch search");

        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        let task_ticket = ticket.clone();
        tokio::task::spawn_blocking(move || {
            let batch = source.fetch(&task_ticket.url);
            let completion = SearchCompletion {
                ticket: task_ticket,
                batch,
            };
            if completions.send(completion).is_err() {
                tracing::debug!("completion receiver dropped");
            }
        });

        ticket
    }
}
