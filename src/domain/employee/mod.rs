//! Staff management resource
//!
//! Deactivated accounts stay in the list with an inactive badge, unlike
//! members, who disappear from the active view.

pub mod adapter;
pub mod model;

pub(crate) use adapter::fetch_users;
pub use adapter::EmployeeAdapter;
pub use model::{Employee, UNNAMED_USER};

/// Engine specialization for the staff view.
pub type EmployeeSynchronizer = crate::sync::Synchronizer<EmployeeAdapter>;
