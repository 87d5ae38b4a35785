use thiserror::Error;
use vakalath_core::DraftId;
use vakalath_store::StoreError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid remote URL: {0}")]
    InvalidUrl(String),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("remote store rejected write: {0}")]
    Rejected(String),

    #[error("no signed-in user")]
    MissingUser,

    #[error("no active draft")]
    NoActiveDraft,

    #[error("draft {0} not found")]
    NotFound(DraftId),

    #[error("draft store has been dropped")]
    StoreClosed,

    #[error("local storage: {0}")]
    Local(#[from] StoreError),
}
