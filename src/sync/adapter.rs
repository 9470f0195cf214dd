//! Seam between the generic engine and one domain resource.

use async_trait::async_trait;

use crate::api::{ApiClient, ApiResult};
use crate::support::{AppError, AppResult};

/// How a resource leaves its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMode {
    /// The server erases the record; the entry is dropped from the list.
    HardDelete,
    /// The server marks the record inactive. `retain_in_list` keeps the
    /// entry visible with its inactive flag (orders, employees) instead
    /// of dropping it from the active view (clients, products).
    SoftDeactivate { retain_in_list: bool },
}

/// A record the engine can key, flag and filter.
pub trait SyncRecord: Clone + Send + Sync + 'static {
    /// Server-assigned identifier, unique within one list.
    fn record_id(&self) -> &str;

    /// Flag the record inactive in place. Resources removed with
    /// `retain_in_list` must override this; the default is a no-op for
    /// read-only records that are never removed.
    fn deactivate(&mut self) {}

    /// Whether the record belongs to the active view.
    fn is_active(&self) -> bool {
        true
    }
}

/// Configures the engine with one resource's endpoints and rules.
///
/// `fetch` is the only place joint awaiting happens: implementations issue
/// their independent endpoint calls through `tokio::try_join!`, so the
/// first failure cancels the join and no partial result escapes.
///
/// The mutation defaults reject with a validation error before any
/// transport; read-only resources simply leave them in place.
#[async_trait]
pub trait ResourceAdapter: Send + Sync + 'static {
    type Record: SyncRecord;
    type Aux: Clone + Default + Send + Sync + 'static;
    type Draft: Send + Sync + 'static;

    /// Resource name for logs.
    fn name(&self) -> &'static str;

    fn removal_mode(&self) -> RemovalMode;

    /// Fetch the records and auxiliary view data, all-or-nothing.
    async fn fetch(&self, api: &ApiClient) -> ApiResult<(Vec<Self::Record>, Self::Aux)>;

    /// Client-side precondition check; runs before the mutation queue is
    /// even acquired.
    fn validate(&self, _draft: &Self::Draft) -> AppResult<()> {
        Ok(())
    }

    async fn create(&self, _api: &ApiClient, _draft: &Self::Draft) -> AppResult<Self::Record> {
        Err(AppError::validation(format!(
            "{} does not support create",
            self.name()
        )))
    }

    async fn update(
        &self,
        _api: &ApiClient,
        _id: &str,
        _draft: &Self::Draft,
    ) -> AppResult<Self::Record> {
        Err(AppError::validation(format!(
            "{} does not support update",
            self.name()
        )))
    }

    async fn remove(&self, _api: &ApiClient, _id: &str) -> AppResult<()> {
        Err(AppError::validation(format!(
            "{} does not support remove",
            self.name()
        )))
    }
}
