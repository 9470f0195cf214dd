//! Authentication and authorization module
//!
//! Session establishment against the auth endpoints, the stored user
//! profile, and pure role-based capability checks.

pub mod profile;
pub mod roles;
pub mod service;

pub use profile::{RoleId, UserProfile};
pub use roles::{is_administrator, ADMINISTRATOR_ROLE_ID};
pub use service::{AuthService, ProfileUpdate};
