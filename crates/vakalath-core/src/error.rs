use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no active draft")]
    NoActiveDraft,

    #[error("invalid wizard step: {0}")]
    InvalidStep(u8),
}
