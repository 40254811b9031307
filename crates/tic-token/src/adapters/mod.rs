//! # Adapters Layer
//!
//! Implementations of the outbound [`crate::ports::EventSink`] port.

pub mod event_bus;
pub mod event_log;

pub use event_bus::*;
pub use event_log::*;
