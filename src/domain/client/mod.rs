//! Member registry resource
//!
//! Pairs the member list with today's occupancy counter. Deactivated
//! members ("dar de baja") leave the active view instead of being erased.

pub mod adapter;
pub mod model;

pub use adapter::ClientAdapter;
pub use model::{Client, ClientDraft, MembershipType};

/// Engine specialization for the member registry view.
pub type ClientSynchronizer = crate::sync::Synchronizer<ClientAdapter>;
