//! Debounced remote persistence of the active draft.
//!
//! When a mutation occurs, a write is scheduled after the debounce delay.
//! If another save-triggering mutation arrives before the timer fires, the
//! timer is restarted, so a burst of edits becomes one write carrying the
//! state as of the last edit. Once the timer has fired, the write runs on its
//! own task and is never cancelled by later scheduling.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vakalath_core::{Action, DraftState, StoreAccess, StoreObserver};

use crate::SyncError;
use crate::auth::AuthProvider;
use crate::config::SyncConfig;
use crate::remote::RemoteDraftStore;

/// Performs remote writes of the current draft and reports status back
/// through the store's own status actions.
pub struct SyncWorker {
    access: Arc<dyn StoreAccess>,
    remote: Arc<dyn RemoteDraftStore>,
    auth: Arc<dyn AuthProvider>,
}

impl SyncWorker {
    pub fn new(
        access: Arc<dyn StoreAccess>,
        remote: Arc<dyn RemoteDraftStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            access,
            remote,
            auth,
        }
    }

    /// Write now, bypassing the debounce timer.
    ///
    /// Status moves through saving to complete or error exactly as a
    /// scheduled write does, and a failure is returned to the caller.
    pub async fn save_now(&self) -> Result<DateTime<Utc>, SyncError> {
        info!("manual save requested");
        self.write_current().await
    }

    /// Scheduled write; outcomes are logged and reflected in store status only.
    pub async fn save_scheduled(&self) {
        match self.write_current().await {
            Ok(at) => info!(updated_at = %at, "scheduled save complete"),
            Err(SyncError::MissingUser) => info!("no signed-in user, scheduled save skipped"),
            Err(SyncError::NoActiveDraft) => debug!("no active draft, scheduled save skipped"),
            Err(SyncError::StoreClosed) => debug!("store dropped, scheduled save skipped"),
            Err(e) => warn!(error = %e, "scheduled save failed"),
        }
    }

    async fn write_current(&self) -> Result<DateTime<Utc>, SyncError> {
        let state: DraftState = self.access.read().ok_or(SyncError::StoreClosed)?;
        let draft = state.current_draft.ok_or(SyncError::NoActiveDraft)?;
        let user_id = self.auth.current_user().ok_or(SyncError::MissingUser)?;

        self.access.dispatch(Action::StartSaving);
        debug!(draft_id = %draft.id, user_id = %user_id, "writing draft to remote");
        match self.remote.upsert_draft(&user_id, &draft).await {
            Ok(at) => {
                self.access.dispatch(Action::SavingComplete { at });
                Ok(at)
            }
            Err(e) => {
                self.access.dispatch(Action::SavingError(e.to_string()));
                Err(e)
            }
        }
    }
}

/// Owns the single pending debounce timer and the writes it has started.
pub struct RemoteSyncScheduler {
    worker: Arc<SyncWorker>,
    delay: Duration,
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl RemoteSyncScheduler {
    pub fn new(worker: Arc<SyncWorker>, config: &SyncConfig, runtime: Handle) -> Self {
        Self {
            worker,
            delay: config.debounce,
            runtime,
            pending: None,
            in_flight: Arc::default(),
        }
    }

    /// (Re)start the debounce timer.
    pub fn schedule(&mut self) {
        self.cancel();
        let worker = self.worker.clone();
        let delay = self.delay;
        let runtime = self.runtime.clone();
        let in_flight = self.in_flight.clone();
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Separate task so a later `cancel` cannot abort the write mid-flight.
            let write = runtime.spawn(async move { worker.save_scheduled().await });
            let mut writes = lock(&in_flight);
            writes.retain(|w| !w.is_finished());
            writes.push(write);
        }));
        debug!(delay_ms = delay.as_millis() as u64, "remote save scheduled");
    }

    /// Drop the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Hand over the writes started by fired timers that have not finished.
    pub fn take_in_flight(&mut self) -> Vec<JoinHandle<()>> {
        let mut writes = lock(&self.in_flight);
        writes.retain(|w| !w.is_finished());
        std::mem::take(&mut *writes)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}

impl Drop for RemoteSyncScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Shared handle registered with the store as an observer.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Arc<Mutex<RemoteSyncScheduler>>,
}

impl SchedulerHandle {
    pub fn new(scheduler: RemoteSyncScheduler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.lock().has_pending()
    }

    /// Cancel any pending timer. Writes already in flight still finish.
    pub fn dispose(&self) -> bool {
        self.lock().cancel()
    }

    /// Wait for every write already started by a fired timer.
    ///
    /// Does not start new writes; combine with [`dispose`](Self::dispose)
    /// to drain the scheduler before shutdown.
    pub async fn wait_in_flight(&self) -> usize {
        let writes = self.lock().take_in_flight();
        let count = writes.len();
        for write in writes {
            if let Err(e) = write.await {
                warn!(error = %e, "in-flight remote save did not complete");
            }
        }
        count
    }

    fn lock(&self) -> MutexGuard<'_, RemoteSyncScheduler> {
        lock(&self.inner)
    }
}

impl StoreObserver for SchedulerHandle {
    fn on_dispatch(&mut self, action: &Action, _state: &DraftState) {
        if action.triggers_remote_save() {
            debug!(action = action.name(), "save-triggering action");
            self.lock().schedule();
        }
    }
}
