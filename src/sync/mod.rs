//! Resource synchronization between the console and the backend.
//!
//! The engine is generic: each domain resource plugs in through a
//! [`ResourceAdapter`] and gets the same lifecycle, the same one-at-a-time
//! mutation queue and the same reconciliation rules.

pub mod adapter;
pub mod confirm;
pub mod engine;

pub use adapter::{RemovalMode, ResourceAdapter, SyncRecord};
pub use confirm::ConfirmationRequest;
pub use engine::{SharedSynchronizer, SyncPhase, SyncSnapshot, Synchronizer};
