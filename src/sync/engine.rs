//! Generic synchronization engine.
//!
//! One `Synchronizer` owns the lifecycle of a single resource list: it
//! loads the server copy, applies mutations strictly one at a time, and
//! reconciles every canonical response into its local state. Views read
//! point-in-time [`SyncSnapshot`]s and subscribe to a watch channel for
//! change notification, so they never observe a half-applied list.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::support::AppResult;

use super::adapter::{RemovalMode, ResourceAdapter, SyncRecord};

// ── Phases ───────────────────────────────────────────────────────────────

/// Where the engine sits in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPhase {
    /// No load attempted yet.
    Idle,
    /// A full fetch is in flight.
    Loading,
    /// The list mirrors the last server response.
    Ready,
    /// A mutation is in flight; the list still shows pre-mutation state.
    Mutating,
    /// The last load or mutation failed. The list keeps whatever the
    /// last successful load produced.
    Failed(ApiError),
}

impl SyncPhase {
    pub fn is_failed(&self) -> bool {
        matches!(self, SyncPhase::Failed(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SyncPhase::Loading | SyncPhase::Mutating)
    }
}

// ── Snapshots ────────────────────────────────────────────────────────────

/// Point-in-time copy of one resource list and its auxiliary view data.
#[derive(Debug, Clone)]
pub struct SyncSnapshot<R, X> {
    pub phase: SyncPhase,
    pub records: Vec<R>,
    pub aux: X,
}

impl<R: SyncRecord, X> SyncSnapshot<R, X> {
    /// Records belonging to the active view.
    pub fn active(&self) -> impl Iterator<Item = &R> {
        self.records.iter().filter(|r| r.is_active())
    }
}

// ── Engine ───────────────────────────────────────────────────────────────

struct EngineState<A: ResourceAdapter> {
    phase: SyncPhase,
    records: Vec<A::Record>,
    aux: A::Aux,
}

/// Shared handle to a [`Synchronizer`].
pub type SharedSynchronizer<A> = Arc<Synchronizer<A>>;

pub struct Synchronizer<A: ResourceAdapter> {
    adapter: A,
    api: Arc<ApiClient>,
    state: Mutex<EngineState<A>>,
    /// Serializes mutations; the tokio mutex hands the lock out in FIFO
    /// order, so submissions apply in the order they were made.
    queue: tokio::sync::Mutex<()>,
    /// Sequence number of the most recently initiated load. A fetch that
    /// returns after a newer load started is stale and gets discarded.
    load_seq: AtomicU64,
    attached: AtomicBool,
    changes: watch::Sender<u64>,
}

impl<A: ResourceAdapter> Synchronizer<A> {
    pub fn new(adapter: A, api: Arc<ApiClient>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            adapter,
            api,
            state: Mutex::new(EngineState {
                phase: SyncPhase::Idle,
                records: Vec::new(),
                aux: A::Aux::default(),
            }),
            queue: tokio::sync::Mutex::new(()),
            load_seq: AtomicU64::new(0),
            attached: AtomicBool::new(true),
            changes,
        }
    }

    pub fn shared(adapter: A, api: Arc<ApiClient>) -> SharedSynchronizer<A> {
        Arc::new(Self::new(adapter, api))
    }

    pub fn resource(&self) -> &'static str {
        self.adapter.name()
    }

    /// Point-in-time copy of the current phase, records and aux data.
    pub fn snapshot(&self) -> SyncSnapshot<A::Record, A::Aux> {
        let state = self.lock_state();
        SyncSnapshot {
            phase: state.phase.clone(),
            records: state.records.clone(),
            aux: state.aux.clone(),
        }
    }

    /// Bumped on every state change; views poll or await it to re-read
    /// the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Stop applying responses to local state. In-flight calls finish
    /// quietly without touching the list.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
        debug!(resource = self.adapter.name(), "synchronizer detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    // ── Load ─────────────────────────────────────────────────────────────

    /// Fetch the full list and replace local state with it.
    ///
    /// Concurrent loads are allowed; only the most recently initiated one
    /// settles into state. A stale response, success or failure alike, is
    /// discarded without touching the list. Without a session no request
    /// leaves the process and the phase stays put.
    pub async fn load(&self) -> AppResult<()> {
        self.ensure_session()?;
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock_state();
            state.phase = SyncPhase::Loading;
        }
        self.notify();
        debug!(resource = self.adapter.name(), seq, "load started");

        let outcome = self.adapter.fetch(self.api.as_ref()).await;

        if self.load_seq.load(Ordering::SeqCst) != seq {
            debug!(
                resource = self.adapter.name(),
                seq, "stale load response discarded"
            );
            return Ok(());
        }
        if !self.is_attached() {
            debug!(
                resource = self.adapter.name(),
                "load response after detach discarded"
            );
            return Ok(());
        }

        match outcome {
            Ok((records, aux)) => {
                let count = records.len();
                {
                    let mut state = self.lock_state();
                    state.records = records;
                    state.aux = aux;
                    state.phase = SyncPhase::Ready;
                }
                self.notify();
                debug!(resource = self.adapter.name(), count, "load completed");
                Ok(())
            }
            Err(err) => {
                warn!(resource = self.adapter.name(), error = %err, "load failed");
                {
                    let mut state = self.lock_state();
                    state.phase = SyncPhase::Failed(err.clone());
                }
                self.notify();
                Err(err.into())
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Create a record and fold the canonical server copy into the list.
    ///
    /// When the server echoes an identifier that is already present the
    /// existing entry is replaced, so the list never grows a duplicate.
    pub async fn create(&self, draft: A::Draft) -> AppResult<A::Record> {
        self.ensure_session()?;
        self.adapter.validate(&draft)?;
        let _slot = self.queue.lock().await;
        let prior = self.begin_mutation();
        match self.adapter.create(self.api.as_ref(), &draft).await {
            Ok(record) => {
                self.finish_mutation(|state| {
                    let id = record.record_id().to_owned();
                    match state.records.iter_mut().find(|r| r.record_id() == id) {
                        Some(existing) => *existing = record.clone(),
                        None => state.records.push(record.clone()),
                    }
                });
                debug!(
                    resource = self.adapter.name(),
                    id = record.record_id(),
                    "record created"
                );
                Ok(record)
            }
            Err(err) => {
                warn!(resource = self.adapter.name(), error = %err, "create failed");
                self.abort_mutation(prior);
                Err(err)
            }
        }
    }

    /// Update a record in place, keyed by identity.
    ///
    /// If the identifier is no longer present (the list moved underneath
    /// the caller) the canonical record is still returned but the list is
    /// left unchanged.
    pub async fn update(&self, id: &str, draft: A::Draft) -> AppResult<A::Record> {
        self.ensure_session()?;
        self.adapter.validate(&draft)?;
        let _slot = self.queue.lock().await;
        let prior = self.begin_mutation();
        match self.adapter.update(self.api.as_ref(), id, &draft).await {
            Ok(record) => {
                self.finish_mutation(|state| {
                    if let Some(existing) =
                        state.records.iter_mut().find(|r| r.record_id() == id)
                    {
                        *existing = record.clone();
                    }
                });
                debug!(resource = self.adapter.name(), id, "record updated");
                Ok(record)
            }
            Err(err) => {
                warn!(resource = self.adapter.name(), id, error = %err, "update failed");
                self.abort_mutation(prior);
                Err(err)
            }
        }
    }

    /// Remove a record, reconciling per the adapter's removal mode.
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        self.ensure_session()?;
        let _slot = self.queue.lock().await;
        let prior = self.begin_mutation();
        match self.adapter.remove(self.api.as_ref(), id).await {
            Ok(()) => {
                let mode = self.adapter.removal_mode();
                self.finish_mutation(|state| match mode {
                    RemovalMode::HardDelete
                    | RemovalMode::SoftDeactivate {
                        retain_in_list: false,
                    } => {
                        state.records.retain(|r| r.record_id() != id);
                    }
                    RemovalMode::SoftDeactivate {
                        retain_in_list: true,
                    } => {
                        if let Some(existing) =
                            state.records.iter_mut().find(|r| r.record_id() == id)
                        {
                            existing.deactivate();
                        }
                    }
                });
                debug!(resource = self.adapter.name(), id, "record removed");
                Ok(())
            }
            Err(err) => {
                warn!(resource = self.adapter.name(), id, error = %err, "remove failed");
                self.abort_mutation(prior);
                Err(err)
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn ensure_session(&self) -> AppResult<()> {
        if self.api.session().is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NoSession.into())
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, EngineState<A>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self) {
        self.changes.send_modify(|v| *v = v.wrapping_add(1));
    }

    /// Enter `Mutating`, returning the phase to restore on failure.
    fn begin_mutation(&self) -> SyncPhase {
        let prior = {
            let mut state = self.lock_state();
            std::mem::replace(&mut state.phase, SyncPhase::Mutating)
        };
        self.notify();
        prior
    }

    /// Apply the reconciliation and settle in `Ready`. After a detach the
    /// response is dropped and local state stays untouched.
    fn finish_mutation(&self, apply: impl FnOnce(&mut EngineState<A>)) {
        if !self.is_attached() {
            debug!(
                resource = self.adapter.name(),
                "mutation response after detach discarded"
            );
            return;
        }
        {
            let mut state = self.lock_state();
            apply(&mut state);
            state.phase = SyncPhase::Ready;
        }
        self.notify();
    }

    /// Failed mutation: the list is untouched, the phase falls back to
    /// whatever it was before the attempt.
    fn abort_mutation(&self, prior: SyncPhase) {
        if !self.is_attached() {
            return;
        }
        {
            let mut state = self.lock_state();
            state.phase = prior;
        }
        self.notify();
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
