//! # Broadcast Event Sink
//!
//! Fans committed event records out to async subscribers over
//! `tokio::sync::broadcast`. Suitable for a single process; a distributed
//! host would plug a different [`EventSink`].

use crate::domain::value_objects::AccountId;
use crate::events::{EventRecord, TokenEvent};
use crate::ports::outbound::EventSink;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default number of records buffered per subscriber before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

// =============================================================================
// FILTER
// =============================================================================

/// Selects which records a subscription receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventFilter {
    /// Every record.
    All,
    /// Only `Transfer` records.
    Transfers,
    /// Only `Approval` records.
    Approvals,
    /// Records in which the account appears in any role.
    Account(AccountId),
}

impl EventFilter {
    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &EventRecord) -> bool {
        match (self, &record.event) {
            (Self::All, _)
            | (Self::Transfers, TokenEvent::Transfer { .. })
            | (Self::Approvals, TokenEvent::Approval { .. }) => true,
            (Self::Account(account), TokenEvent::Transfer { from, to, .. }) => {
                from == account || to == account
            }
            (Self::Account(account), TokenEvent::Approval { owner, spender, .. }) => {
                owner == account || spender == account
            }
            _ => false,
        }
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The sink was dropped.
    #[error("event sink closed")]
    Closed,
}

/// A handle for receiving records from a [`BroadcastEventSink`].
pub struct Subscription {
    receiver: broadcast::Receiver<EventRecord>,
    filter: EventFilter,
}

impl Subscription {
    /// Receive the next matching record. `None` once the sink is dropped.
    ///
    /// A lagging subscriber skips the records it missed; the gap shows up
    /// in `sequence`.
    pub async fn recv(&mut self) -> Option<EventRecord> {
        loop {
            let record = match self.receiver.recv().await {
                Ok(r) => r,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some records dropped");
                    continue;
                }
            };

            if self.filter.matches(&record) {
                return Some(record);
            }
        }
    }

    /// Receive the next matching record without waiting.
    pub fn try_recv(&mut self) -> Result<Option<EventRecord>, SubscriptionError> {
        loop {
            let record = match self.receiver.try_recv() {
                Ok(r) => r,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&record) {
                return Ok(Some(record));
            }
        }
    }

    /// The filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

// =============================================================================
// SINK
// =============================================================================

/// Broadcast-backed event sink.
pub struct BroadcastEventSink {
    sender: broadcast::Sender<EventRecord>,
    published: AtomicU64,
    capacity: usize,
}

impl BroadcastEventSink {
    /// Create a sink with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a sink with the given per-subscriber capacity. Zero is raised
    /// to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to records matching `filter`. Only records emitted after
    /// this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(filter = ?filter, "New subscription created");
        Subscription {
            receiver: self.sender.subscribe(),
            filter,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Total records handed to this sink, delivered or not.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, record: &EventRecord) {
        self.published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(record.clone()) {
            Ok(receivers) => {
                debug!(
                    sequence = record.sequence,
                    topic = record.event.topic(),
                    receivers,
                    "Event published"
                );
            }
            Err(_) => {
                warn!(
                    sequence = record.sequence,
                    topic = record.event.topic(),
                    "Event dropped (no receivers)"
                );
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
