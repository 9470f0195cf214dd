//! # PrimeGym Console Core
//!
//! Client-side core of the PrimeGym management console: session and
//! authorization handling plus the data-synchronization layer every
//! view runs on. The backend REST API is an external collaborator;
//! nothing here renders.
//!
//! ## Architecture
//!
//! - **session**: credential store (token + profile) with pluggable persistence
//! - **auth**: login flows and pure role capability checks
//! - **api**: authenticated JSON client over the backend REST API
//! - **sync**: generic resource synchronizer (load, mutate, reconcile)
//! - **domain**: per-resource adapters and wire models
//! - **config**: TOML settings file

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod session;
pub mod support;
pub mod sync;

pub use config::{default_config_path, AppConfig};
pub use support::{AppError, AppResult};

// Re-export the pieces nearly every caller touches
pub use api::{ApiClient, ApiError};
pub use auth::{is_administrator, AuthService, UserProfile};
pub use session::{SessionStore, SharedSessionStore};
pub use sync::{SyncPhase, Synchronizer};
