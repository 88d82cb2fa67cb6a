use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::SearchOutcome;

/// Sequence number handed out when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// The result set currently shown for one query source
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultSet {
    pub request: u64,
    pub keyword: String,
    pub outcome: SearchOutcome,
}

/// Holds the latest result set for overlapping asynchronous requests.
///
/// With `discard_stale` set, a response is applied only if no newer request was issued after it,
/// so a slow early response cannot overwrite a newer one. Without it, the last response to arrive
/// wins.
pub struct ResultSlot {
    discard_stale: bool,
    issued: AtomicU64,
    latest: RwLock<Option<ResultSet>>,
}

impl ResultSlot {
    pub fn new(discard_stale: bool) -> Self {
        Self {
            discard_stale,
            issued: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Registers a new request and returns its ticket
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Stores `outcome` unless it answers a superseded request. Returns whether it was stored.
    pub async fn apply(&self, ticket: RequestTicket, keyword: &str, outcome: SearchOutcome) -> bool {
        let mut latest = self.latest.write().await;

        if self.discard_stale && ticket.0 != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(
                request = ticket.0,
                newest = self.issued.load(Ordering::SeqCst),
                keyword = %keyword,
                "Discarding stale response"
            );
            return false;
        }

        *latest = Some(ResultSet {
            request: ticket.0,
            keyword: keyword.to_string(),
            outcome,
        });
        true
    }

    /// The applied result set, or `None` when no request has completed yet
    pub async fn latest(&self) -> Option<ResultSet> {
        self.latest.read().await.clone()
    }
}

/// Number of sources a [`ResultBoard`] tracks before evicting the oldest
pub const MAX_TRACKED_SOURCES: usize = 256;

#[derive(Default)]
struct Slots {
    by_source: HashMap<String, Arc<ResultSlot>>,
    order: VecDeque<String>,
}

/// One [`ResultSlot`] per source, created on first use.
///
/// Holds at most `capacity` sources; creating one more evicts the source created earliest.
pub struct ResultBoard {
    discard_stale: bool,
    capacity: usize,
    slots: RwLock<Slots>,
}

impl ResultBoard {
    pub fn new(discard_stale: bool) -> Self {
        Self::with_capacity(discard_stale, MAX_TRACKED_SOURCES)
    }

    pub fn with_capacity(discard_stale: bool, capacity: usize) -> Self {
        Self {
            discard_stale,
            capacity: capacity.max(1),
            slots: RwLock::new(Slots::default()),
        }
    }

    /// The slot for `source`, creating it if needed
    pub async fn slot(&self, source: &str) -> Arc<ResultSlot> {
        if let Some(slot) = self.get(source).await {
            return slot;
        }

        let mut slots = self.slots.write().await;
        if let Some(slot) = slots.by_source.get(source) {
            return slot.clone();
        }

        while slots.order.len() >= self.capacity {
            if let Some(evicted) = slots.order.pop_front() {
                slots.by_source.remove(&evicted);
                tracing::debug!(source = %evicted, "Evicting result slot");
            }
        }

        let slot = Arc::new(ResultSlot::new(self.discard_stale));
        slots.order.push_back(source.to_string());
        slots.by_source.insert(source.to_string(), slot.clone());
        slot
    }

    /// The slot for `source` if one exists
    pub async fn get(&self, source: &str) -> Option<Arc<ResultSlot>> {
        self.slots.read().await.by_source.get(source).cloned()
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.by_source.len()
    }
}
