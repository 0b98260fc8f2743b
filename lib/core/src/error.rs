use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Insufficient candidates: {0}")]
    InsufficientCandidates(String),

    #[error("Computation inconsistency: {0}")]
    Inconsistency(String),

    #[error("Candidate source error: {0}")]
    Source(String),

    #[error("Profile store error: {0}")]
    Profile(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
