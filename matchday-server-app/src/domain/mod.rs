pub mod actor;
pub mod availability;
pub mod draft;
pub mod error;
pub mod lock;
pub mod r#match;
pub mod team;
pub mod team_generation;

use crate::domain::{
    availability::AvailabilityRepository,
    r#match::MatchRepository,
    team::{TeamPlayerRepository, TeamRepository},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(pub uuid::Uuid);

impl MatchId {
    pub fn new() -> Self {
        MatchId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub uuid::Uuid);

impl TeamId {
    pub fn new() -> Self {
        TeamId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    pub fn new() -> Self {
        UserId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommunityId(pub uuid::Uuid);

impl CommunityId {
    pub fn new() -> Self {
        CommunityId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for CommunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

/// Everything a use case needs to read and write the roster of a match.
/// Adapters usually implement all four repositories on one store.
pub trait MatchStore:
    MatchRepository + AvailabilityRepository + TeamRepository + TeamPlayerRepository + Send + Sync
{
}

impl<T> MatchStore for T where
    T: MatchRepository
        + AvailabilityRepository
        + TeamRepository
        + TeamPlayerRepository
        + Send
        + Sync
{
}

#[derive(Debug)]
pub enum RepoError {
    StorageError(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum RepoRetrieveError {
    NotFound,
    StorageError(String),
}

impl std::fmt::Display for RepoRetrieveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoRetrieveError::NotFound => write!(f, "Resource not found"),
            RepoRetrieveError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}
