//! Session credential store and its persistence backends.

pub mod storage;
pub mod store;

pub use storage::{CredentialStorage, FileStorage, MemoryStorage};
pub use store::{SessionStore, SharedSessionStore, TOKEN_KEY, USER_KEY};
