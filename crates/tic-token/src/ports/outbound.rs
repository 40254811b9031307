//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger depends on. The only outbound dependency is the
//! notification collaborator that receives event records.

use crate::events::EventRecord;
use std::sync::Arc;

// =============================================================================
// EVENT SINK
// =============================================================================

/// Receiver of committed event records.
///
/// The service calls `emit` exactly once per successful mutation, after the
/// state change has committed and in sequence order. Failed operations never
/// reach the sink.
///
/// Implementations must not call back into the service.
pub trait EventSink: Send + Sync {
    /// Accept one committed event record.
    fn emit(&self, record: &EventRecord);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, record: &EventRecord) {
        (**self).emit(record);
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&self, record: &EventRecord) {
        (**self).emit(record);
    }
}
