//! # Domain Layer (Inner Hexagon)
//!
//! Pure accounting logic for the token ledger.
//! NO I/O, NO async, NO locking.
//!
//! - Dependencies point INWARD only (ports, adapters and the service depend
//!   on this, not vice versa).
//! - Every mutation goes through [`engine::TokenState::apply`].

pub mod allowances;
pub mod engine;
pub mod invariants;
pub mod ledger;
pub mod snapshot;
pub mod value_objects;

pub use allowances::*;
pub use engine::*;
pub use invariants::*;
pub use ledger::*;
pub use snapshot::*;
pub use value_objects::*;
