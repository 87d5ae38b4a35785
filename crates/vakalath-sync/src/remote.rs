//! Remote document store for drafts.
//!
//! Records are keyed by user and draft id. Writes are upserts that merge the
//! draft's top-level fields into whatever the record already holds, then set
//! a server-assigned `updatedAt`. Fields the local draft does not carry are
//! left untouched; nested values are replaced, not merged.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use vakalath_core::{Draft, DraftId};

use crate::SyncError;

/// Top-level field holding the server's write time.
pub const SERVER_UPDATED_AT: &str = "updatedAt";

/// Listing entry for a user's remote drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: DraftId,
    pub title: String,
    pub current_step: u8,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait RemoteDraftStore: Send + Sync {
    /// Merge `draft` into the user's record, returning the server update time.
    async fn upsert_draft(&self, user_id: &str, draft: &Draft) -> Result<DateTime<Utc>, SyncError>;

    async fn fetch_draft(&self, user_id: &str, id: DraftId) -> Result<Option<Draft>, SyncError>;

    /// The user's drafts, most recently updated first.
    async fn list_drafts(&self, user_id: &str) -> Result<Vec<DraftSummary>, SyncError>;
}

/// Shallow top-level merge of `incoming` into `record`.
pub fn merge_record(record: &mut Map<String, Value>, incoming: Map<String, Value>, at: DateTime<Utc>) {
    for (key, value) in incoming {
        record.insert(key, value);
    }
    record.insert(SERVER_UPDATED_AT.to_string(), Value::String(at.to_rfc3339()));
}

/// Serialize a draft as a top-level JSON object.
pub fn draft_object(draft: &Draft) -> Result<Map<String, Value>, SyncError> {
    match serde_json::to_value(draft)? {
        Value::Object(map) => Ok(map),
        other => Err(SyncError::Rejected(format!(
            "draft serialized to non-object {other}"
        ))),
    }
}

/// A completed write, as seen by [`MemoryRemoteStore`].
#[derive(Debug, Clone)]
pub struct RemoteWrite {
    pub user_id: String,
    pub draft: Draft,
    /// Completion time on the tokio clock.
    pub at: tokio::time::Instant,
}

/// In-process remote store.
///
/// Can simulate latency and failures so callers' status handling can be
/// exercised without a server.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    records: Mutex<HashMap<(String, DraftId), Map<String, Value>>>,
    writes: Mutex<Vec<RemoteWrite>>,
    failure: Mutex<Option<String>>,
    latency: Mutex<Duration>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *lock(&self.failure) = message.map(str::to_string);
    }

    /// Delay each write by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.latency) = latency;
    }

    pub fn writes(&self) -> Vec<RemoteWrite> {
        lock(&self.writes).clone()
    }

    pub fn write_count(&self) -> usize {
        lock(&self.writes).len()
    }

    /// Raw stored record.
    pub fn record(&self, user_id: &str, id: DraftId) -> Option<Map<String, Value>> {
        lock(&self.records)
            .get(&(user_id.to_string(), id))
            .cloned()
    }

    /// Seed a raw record, e.g. one written by another client.
    pub fn insert_record(&self, user_id: &str, id: DraftId, record: Map<String, Value>) {
        lock(&self.records).insert((user_id.to_string(), id), record);
    }
}

#[async_trait]
impl RemoteDraftStore for MemoryRemoteStore {
    async fn upsert_draft(&self, user_id: &str, draft: &Draft) -> Result<DateTime<Utc>, SyncError> {
        let latency = *lock(&self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = lock(&self.failure).clone() {
            return Err(SyncError::Rejected(message));
        }

        let incoming = draft_object(draft)?;
        let at = Utc::now();
        {
            let mut records = lock(&self.records);
            let record = records
                .entry((user_id.to_string(), draft.id))
                .or_default();
            merge_record(record, incoming, at);
        }
        lock(&self.writes).push(RemoteWrite {
            user_id: user_id.to_string(),
            draft: draft.clone(),
            at: tokio::time::Instant::now(),
        });
        debug!(user_id, draft_id = %draft.id, "memory remote write");
        Ok(at)
    }

    async fn fetch_draft(&self, user_id: &str, id: DraftId) -> Result<Option<Draft>, SyncError> {
        let Some(record) = self.record(user_id, id) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(Value::Object(record))?))
    }

    async fn list_drafts(&self, user_id: &str) -> Result<Vec<DraftSummary>, SyncError> {
        let records: Vec<Map<String, Value>> = lock(&self.records)
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|(_, record)| record.clone())
            .collect();

        let mut summaries = Vec::with_capacity(records.len());
        for record in records {
            let updated_at = record
                .get(SERVER_UPDATED_AT)
                .and_then(Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc));
            let draft: Draft = serde_json::from_value(Value::Object(record))?;
            summaries.push(DraftSummary {
                id: draft.id,
                title: draft.case_title(),
                current_step: draft.metadata.current_step,
                updated_at: updated_at.unwrap_or(draft.metadata.updated_at),
            });
        }
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}
