use chrono::{DateTime, Utc};

use crate::domain::{MatchId, RepoError, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    Available,
    NotAvailable,
    Selected,
    Reserve,
}

impl AvailabilityStatus {
    /// Selected and reserve players are owned by the draft until they are
    /// removed from their team.
    pub fn is_assigned(&self) -> bool {
        matches!(self, AvailabilityStatus::Selected | AvailabilityStatus::Reserve)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "AVAILABLE",
            AvailabilityStatus::NotAvailable => "NOT_AVAILABLE",
            AvailabilityStatus::Selected => "SELECTED",
            AvailabilityStatus::Reserve => "RESERVE",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Availability {
    pub match_id: MatchId,
    pub user_id: UserId,
    pub status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Availability {
    pub fn new(match_id: MatchId, user_id: UserId, status: AvailabilityStatus) -> Self {
        let now = Utc::now();
        Self {
            match_id,
            user_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: AvailabilityStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// One availability per (match, user). Listings come back in the order the
/// availabilities were first saved.
#[async_trait::async_trait]
pub trait AvailabilityRepository {
    async fn find_availability(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<Option<Availability>, RepoError>;
    async fn find_available_players(&self, match_id: MatchId)
    -> Result<Vec<Availability>, RepoError>;
    async fn find_availabilities_by_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<Availability>, RepoError>;
    async fn save_availability(&self, availability: &Availability) -> Result<(), RepoError>;
    async fn delete_availability(&self, match_id: MatchId, user_id: UserId)
    -> Result<(), RepoError>;
}
