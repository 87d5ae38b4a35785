//! Local snapshot of the active draft.
//!
//! After every store mutation the whole state is written, wholesale, under a
//! fixed key as `{ currentDraft, currentStep, timestamp }`. Dates are ISO-8601
//! strings on disk and come back as date values on read. Failures on either
//! side are logged and never reach the caller.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vakalath_core::{Action, Draft, DraftState, StoreHandle, StoreObserver};

use crate::StoreError;
use crate::storage::KeyValueStorage;

/// Fixed storage key of the snapshot.
pub const SNAPSHOT_KEY: &str = "suit-draft-state";

#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Directory for file-backed storage.
    pub dir: PathBuf,
    pub key: String,
}

impl SnapshotConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            key: SNAPSHOT_KEY.to_string(),
        }
    }
}

/// Persisted shape of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_draft: Option<Draft>,
    pub current_step: u8,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    current_draft: Option<&'a Draft>,
    current_step: u8,
    timestamp: DateTime<Utc>,
}

/// Reads, writes, and clears the snapshot under one key.
#[derive(Debug, Clone)]
pub struct SnapshotStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, SNAPSHOT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Serialize and store the state's draft and step.
    pub fn write(&self, state: &DraftState) -> Result<(), StoreError> {
        let snapshot = SnapshotRef {
            current_draft: state.current_draft.as_ref(),
            current_step: state.current_step,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set(&self.key, &json)
    }

    /// The stored snapshot, strictly.
    pub fn try_read(&self) -> Result<Option<Snapshot>, StoreError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// The stored snapshot; absent, unreadable, and corrupt all yield `None`.
    pub fn read(&self) -> Option<Snapshot> {
        match self.try_read() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable draft snapshot");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)
    }
}

/// Store observer that writes a snapshot after every action.
pub struct SnapshotWriter<S> {
    snapshots: SnapshotStore<S>,
}

impl<S: KeyValueStorage> SnapshotWriter<S> {
    pub fn new(snapshots: SnapshotStore<S>) -> Self {
        Self { snapshots }
    }
}

impl<S: KeyValueStorage> StoreObserver for SnapshotWriter<S> {
    fn on_dispatch(&mut self, action: &Action, state: &DraftState) {
        match self.snapshots.write(state) {
            Ok(()) => debug!(action = action.name(), "draft snapshot written"),
            Err(e) => warn!(action = action.name(), error = %e, "draft snapshot write skipped"),
        }
    }
}

/// Load the stored draft into `store` and put the cursor back on step 1.
///
/// The draft is restored in full, including its recorded step and completed
/// steps; only the navigation cursor is reset. Returns whether a draft was
/// restored.
pub fn restore_into<S: KeyValueStorage>(store: &StoreHandle, snapshots: &SnapshotStore<S>) -> bool {
    let Some(snapshot) = snapshots.read() else {
        debug!("no draft snapshot to restore");
        return false;
    };
    let Some(draft) = snapshot.current_draft else {
        debug!("snapshot holds no draft");
        return false;
    };
    info!(
        draft_id = %draft.id,
        saved_step = snapshot.current_step,
        saved_at = %snapshot.timestamp,
        "restoring draft from snapshot"
    );
    store.dispatch(Action::load_draft(draft));
    store.dispatch(Action::GoToStep(1));
    true
}
