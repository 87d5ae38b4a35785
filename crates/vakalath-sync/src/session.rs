//! A working session over one local device and one remote account.
//!
//! Opening a session builds the store, attaches the snapshot writer, restores
//! any stored draft, and only then attaches the remote scheduler, so the
//! restore itself is never pushed back to the server.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tracing::{debug, info};
use vakalath_core::{Action, DraftId, DraftState, StoreHandle};
use vakalath_store::{KeyValueStorage, SnapshotStore, SnapshotWriter, restore_into};

use crate::SyncError;
use crate::auth::AuthProvider;
use crate::config::SyncConfig;
use crate::remote::{DraftSummary, RemoteDraftStore};
use crate::scheduler::{RemoteSyncScheduler, SchedulerHandle, SyncWorker};

pub struct DraftSession<S> {
    store: StoreHandle,
    snapshots: SnapshotStore<S>,
    worker: Arc<SyncWorker>,
    scheduler: SchedulerHandle,
    remote: Arc<dyn RemoteDraftStore>,
    auth: Arc<dyn AuthProvider>,
    restored: bool,
}

impl<S: KeyValueStorage + Clone + 'static> DraftSession<S> {
    pub fn open(
        snapshots: SnapshotStore<S>,
        remote: Arc<dyn RemoteDraftStore>,
        auth: Arc<dyn AuthProvider>,
        config: &SyncConfig,
        runtime: Handle,
    ) -> Self {
        let store = StoreHandle::default();
        store.add_observer(Box::new(SnapshotWriter::new(snapshots.clone())));
        let restored = restore_into(&store, &snapshots);

        let worker = Arc::new(SyncWorker::new(
            Arc::new(store.downgrade()),
            remote.clone(),
            auth.clone(),
        ));
        let scheduler = SchedulerHandle::new(RemoteSyncScheduler::new(
            worker.clone(),
            config,
            runtime,
        ));
        store.add_observer(Box::new(scheduler.clone()));
        info!(
            restored,
            debounce_secs = config.debounce.as_secs(),
            "draft session opened"
        );

        Self {
            store,
            snapshots,
            worker,
            scheduler,
            remote,
            auth,
            restored,
        }
    }
}

impl<S: KeyValueStorage> DraftSession<S> {
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Whether a draft was restored from the local snapshot on open.
    pub fn restored(&self) -> bool {
        self.restored
    }

    pub fn dispatch(&self, action: Action) {
        self.store.dispatch(action);
    }

    pub fn state(&self) -> DraftState {
        self.store.state()
    }

    /// Push the current draft immediately.
    pub async fn save_now(&self) -> Result<DateTime<Utc>, SyncError> {
        self.worker.save_now().await
    }

    /// Load a draft from the remote store and make it active at step 1.
    pub async fn open_remote(&self, id: DraftId) -> Result<(), SyncError> {
        let user_id = self.auth.current_user().ok_or(SyncError::MissingUser)?;
        let draft = self
            .remote
            .fetch_draft(&user_id, id)
            .await?
            .ok_or(SyncError::NotFound(id))?;
        info!(draft_id = %id, "opened remote draft");
        self.store.dispatch(Action::load_draft(draft));
        self.store.dispatch(Action::GoToStep(1));
        Ok(())
    }

    pub async fn list_remote(&self) -> Result<Vec<DraftSummary>, SyncError> {
        let user_id = self.auth.current_user().ok_or(SyncError::MissingUser)?;
        self.remote.list_drafts(&user_id).await
    }

    /// Delete the local snapshot. The in-memory store is untouched.
    pub fn purge_local(&self) -> Result<(), SyncError> {
        self.snapshots.clear()?;
        info!("local draft snapshot removed");
        Ok(())
    }

    pub fn has_pending_save(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Cancel any pending remote save. A write already in flight completes.
    pub fn close(&self) {
        if self.scheduler.dispose() {
            info!("pending remote save cancelled on close");
        }
    }

    /// Wait for scheduled writes that already started. Call before the
    /// runtime shuts down, or those writes are dropped mid-request.
    pub async fn wait_for_writes(&self) {
        let waited = self.scheduler.wait_in_flight().await;
        if waited > 0 {
            debug!(waited, "in-flight remote saves finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;
    use vakalath_core::PartyRole;
    use vakalath_core::model::Party;
    use vakalath_store::{MemoryStorage, SNAPSHOT_KEY};

    use super::*;
    use crate::auth::StaticAuth;
    use crate::remote::MemoryRemoteStore;

    fn open(
        storage: Arc<MemoryStorage>,
        remote: Arc<MemoryRemoteStore>,
    ) -> DraftSession<Arc<MemoryStorage>> {
        DraftSession::open(
            SnapshotStore::new(storage),
            remote,
            Arc::new(StaticAuth::user("adv-1")),
            &SyncConfig::default(),
            Handle::current(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn edits_reach_snapshot_immediately_and_remote_after_debounce() {
        let storage = Arc::new(MemoryStorage::new());
        let remote = Arc::new(MemoryRemoteStore::new());
        let session = open(storage.clone(), remote.clone());
        assert!(!session.restored());

        session.dispatch(Action::start_new_draft());
        session.dispatch(Action::AddParty(Party::new(PartyRole::Plaintiff, "Raman")));
        assert!(storage.get(SNAPSHOT_KEY).unwrap().is_some());
        assert!(session.has_pending_save());
        assert_eq!(remote.write_count(), 0);

        sleep(Duration::from_secs(31)).await;
        assert_eq!(remote.write_count(), 1);
        assert!(session.state().last_saved.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn reopen_restores_at_step_one_without_remote_write() {
        let storage = Arc::new(MemoryStorage::new());
        let remote = Arc::new(MemoryRemoteStore::new());
        let id = {
            let session = open(storage.clone(), remote.clone());
            session.dispatch(Action::start_new_draft());
            session.dispatch(Action::GoToNextStep);
            session.dispatch(Action::GoToNextStep);
            assert_eq!(session.state().current_step, 3);
            session.close();
            session.state().draft_id().unwrap()
        };

        let session = open(storage.clone(), remote.clone());
        assert!(session.restored());
        let state = session.state();
        assert_eq!(state.current_step, 1);
        let draft = state.current_draft.unwrap();
        assert_eq!(draft.id, id);
        assert!(draft.metadata.completed_steps.contains(&2));
        assert!(!session.has_pending_save());

        sleep(Duration::from_secs(60)).await;
        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn close_then_wait_lets_started_write_land() {
        let storage = Arc::new(MemoryStorage::new());
        let remote = Arc::new(MemoryRemoteStore::new());
        remote.set_latency(Duration::from_secs(10));
        let session = open(storage, remote.clone());
        session.dispatch(Action::start_new_draft());
        session.dispatch(Action::AddParty(Party::new(PartyRole::Plaintiff, "Raman")));

        sleep(Duration::from_secs(35)).await;
        assert!(session.state().is_saving);
        assert_eq!(remote.write_count(), 0);

        session.close();
        session.wait_for_writes().await;
        assert_eq!(remote.write_count(), 1);
        let state = session.state();
        assert!(!state.is_saving);
        assert!(state.last_saved.is_some());
    }

    #[tokio::test]
    async fn open_remote_replaces_active_draft() {
        let storage = Arc::new(MemoryStorage::new());
        let remote = Arc::new(MemoryRemoteStore::new());
        let mut other = vakalath_core::Draft::new(DraftId::new(), Utc::now());
        other.metadata.current_step = 5;
        other.basic_details.court = Some("Munsiff Court".into());
        remote.upsert_draft("adv-1", &other).await.unwrap();

        let session = open(storage, remote.clone());
        session.dispatch(Action::start_new_draft());
        session.open_remote(other.id).await.unwrap();

        let state = session.state();
        assert_eq!(state.current_step, 1);
        let draft = state.current_draft.unwrap();
        assert_eq!(draft.id, other.id);
        assert_eq!(draft.basic_details.court.as_deref(), Some("Munsiff Court"));

        let missing = DraftId::new();
        assert!(matches!(
            session.open_remote(missing).await,
            Err(SyncError::NotFound(id)) if id == missing
        ));

        let list = session.list_remote().await.unwrap();
        assert_eq!(list.len(), 1);
        session.close();
    }

    #[tokio::test]
    async fn purge_local_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::new());
        let session = open(storage.clone(), Arc::new(MemoryRemoteStore::new()));
        session.dispatch(Action::start_new_draft());
        session.purge_local().unwrap();
        assert!(storage.get(SNAPSHOT_KEY).unwrap().is_none());
        assert!(session.state().current_draft.is_some());
        session.close();
    }
}
