//! # In-Process Event Sinks
//!
//! Synchronous [`EventSink`] implementations: a recording log, a discard
//! sink, and a fan-out that forwards to several sinks in order.

use crate::events::EventRecord;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use std::sync::Arc;

// =============================================================================
// IN-MEMORY LOG
// =============================================================================

/// Records every emitted event in emission order.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    records: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.read().clone()
    }

    /// Most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<EventRecord> {
        self.records.read().last().cloned()
    }

    /// Number of records kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&self) -> Vec<EventRecord> {
        std::mem::take(&mut *self.records.write())
    }
}

impl EventSink for InMemoryEventLog {
    fn emit(&self, record: &EventRecord) {
        self.records.write().push(record.clone());
    }
}

// =============================================================================
// NULL SINK
// =============================================================================

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _record: &EventRecord) {}
}

// =============================================================================
// FAN-OUT
// =============================================================================

/// Forwards each record to every inner sink, in insertion order.
#[derive(Clone, Default)]
pub struct FanOutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanOutSink {
    /// Create a sink with no targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: append a sink.
    #[must_use]
    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Append a sink.
    pub fn push(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// True when there are no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanOutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl EventSink for FanOutSink {
    fn emit(&self, record: &EventRecord) {
        for sink in &self.sinks {
            sink.emit(record);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
