use thiserror::Error;

use crate::domain::{RepoError, RepoRetrieveError};

pub type MatchResult<T> = Result<T, MatchError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not enough available players: {available} available, {required} required")]
    InsufficientPlayers { available: usize, required: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl MatchError {
    pub fn invalid_state<T, R>(msg: T) -> MatchResult<R>
    where
        T: Into<String>,
    {
        Err(MatchError::InvalidState(msg.into()))
    }

    pub fn not_found<T, R>(msg: T) -> MatchResult<R>
    where
        T: Into<String>,
    {
        Err(MatchError::NotFound(msg.into()))
    }

    pub fn forbidden<T, R>(msg: T) -> MatchResult<R>
    where
        T: Into<String>,
    {
        Err(MatchError::Forbidden(msg.into()))
    }

    pub fn conflict<T, R>(msg: T) -> MatchResult<R>
    where
        T: Into<String>,
    {
        Err(MatchError::Conflict(msg.into()))
    }

    /// Maps a lookup failure, naming the missing resource on `NotFound`.
    pub fn from_retrieve(err: RepoRetrieveError, missing: &str) -> MatchError {
        match err {
            RepoRetrieveError::NotFound => MatchError::NotFound(missing.to_string()),
            RepoRetrieveError::StorageError(e) => MatchError::Storage(e),
        }
    }
}

impl From<RepoError> for MatchError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::StorageError(e) => MatchError::Storage(e),
        }
    }
}
