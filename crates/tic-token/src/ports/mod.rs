//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the ledger core and the outside world.
//!
//! - **Driving Port (Inbound)**: `TokenApi`
//! - **Driven Port (Outbound)**: `EventSink`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
