//! Remote sync for Vakalath drafts: a debounced writer to the user's remote
//! document store, plus the session wiring that ties it to the local store.

pub mod auth;
pub mod config;
mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod remote;
pub mod scheduler;
pub mod session;

pub use auth::{AuthProvider, SharedAuth, StaticAuth};
pub use config::{DEFAULT_DEBOUNCE, SyncConfig};
pub use error::SyncError;
#[cfg(feature = "http")]
pub use http::HttpRemoteStore;
pub use remote::{DraftSummary, MemoryRemoteStore, RemoteDraftStore};
pub use scheduler::{RemoteSyncScheduler, SchedulerHandle, SyncWorker};
pub use session::DraftSession;
