use chrono::{DateTime, Utc};

use crate::domain::{
    CommunityId, MatchId, RepoError, RepoRetrieveError, TeamId, UserId,
    draft::{DraftAdvance, DraftState},
    error::{MatchError, MatchResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Upcoming,
    RegistrationOpen,
    RegistrationClosed,
    TeamsSelected,
    TeamsManuallySelected,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "UPCOMING",
            MatchStatus::RegistrationOpen => "REGISTRATION_OPEN",
            MatchStatus::RegistrationClosed => "REGISTRATION_CLOSED",
            MatchStatus::TeamsSelected => "TEAMS_SELECTED",
            MatchStatus::TeamsManuallySelected => "TEAMS_MANUALLY_SELECTED",
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn has_teams(&self) -> bool {
        matches!(
            self,
            MatchStatus::TeamsSelected | MatchStatus::TeamsManuallySelected
        )
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub community_id: CommunityId,
    pub created_by: UserId,
    pub title: String,
    pub description: String,
    pub match_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub players_per_team: u32,
    pub is_auto_selection: bool,
    pub status: MatchStatus,
    pub draft: DraftState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn ensure_can_generate_teams(&self) -> MatchResult<()> {
        if self.status != MatchStatus::RegistrationOpen {
            return MatchError::invalid_state(format!(
                "Teams can only be generated while registration is open (match is {})",
                self.status
            ));
        }
        Ok(())
    }

    pub fn ensure_roster_editable(&self) -> MatchResult<()> {
        if !self.status.has_teams() {
            return MatchError::invalid_state(format!(
                "Team rosters can only change after teams are generated and before the match starts (match is {})",
                self.status
            ));
        }
        Ok(())
    }

    pub fn ensure_editable(&self) -> MatchResult<()> {
        if matches!(self.status, MatchStatus::InProgress | MatchStatus::Completed) {
            return MatchError::invalid_state("Cannot update match that is in progress or completed");
        }
        Ok(())
    }

    pub fn ensure_deletable(&self) -> MatchResult<()> {
        if self.status == MatchStatus::InProgress {
            return MatchError::invalid_state("Cannot delete match that is in progress");
        }
        Ok(())
    }

    pub fn ensure_accepts_availability(&self, now: DateTime<Utc>) -> MatchResult<()> {
        if matches!(
            self.status,
            MatchStatus::InProgress | MatchStatus::Completed | MatchStatus::Cancelled
        ) {
            return MatchError::invalid_state(format!(
                "Cannot change availability for a match that is {}",
                self.status
            ));
        }
        if now > self.registration_deadline {
            return MatchError::invalid_state("Registration deadline has passed");
        }
        Ok(())
    }

    /// First availability on an upcoming match opens registration.
    pub fn open_registration(&mut self) {
        if self.status == MatchStatus::Upcoming {
            self.status = MatchStatus::RegistrationOpen;
        }
    }

    pub fn reopen_registration(&mut self) -> MatchResult<()> {
        if !matches!(
            self.status,
            MatchStatus::RegistrationClosed
                | MatchStatus::TeamsSelected
                | MatchStatus::TeamsManuallySelected
        ) {
            return MatchError::invalid_state(format!(
                "Registration can only be reopened before the match starts (match is {})",
                self.status
            ));
        }
        self.draft.reset();
        self.status = MatchStatus::RegistrationOpen;
        Ok(())
    }

    pub fn start(&mut self) -> MatchResult<()> {
        if self.status != MatchStatus::TeamsSelected {
            return MatchError::invalid_state("Match must have teams selected before starting");
        }
        self.status = MatchStatus::InProgress;
        Ok(())
    }

    pub fn complete(&mut self) -> MatchResult<()> {
        if self.status != MatchStatus::InProgress {
            return MatchError::invalid_state("Match must be in progress to complete");
        }
        self.status = MatchStatus::Completed;
        Ok(())
    }

    pub fn cancel(&mut self) -> MatchResult<()> {
        match self.status {
            MatchStatus::InProgress => {
                MatchError::invalid_state("Cannot cancel match that is in progress")
            }
            MatchStatus::Completed => {
                MatchError::invalid_state("Cannot cancel match that is completed")
            }
            _ => {
                self.draft.reset();
                self.status = MatchStatus::Cancelled;
                Ok(())
            }
        }
    }

    pub fn begin_manual_draft(&mut self, order: Vec<TeamId>) {
        self.draft = DraftState::begin(order);
        self.status = MatchStatus::TeamsManuallySelected;
    }

    /// Advances the manual draft; finishing it settles the teams.
    pub fn advance_draft(
        &mut self,
        just_picked: TeamId,
        roster_size: impl Fn(TeamId) -> usize,
    ) -> DraftAdvance {
        let outcome = self
            .draft
            .advance(just_picked, self.players_per_team, roster_size);
        if outcome == DraftAdvance::Completed {
            self.status = MatchStatus::TeamsSelected;
        }
        outcome
    }
}

#[async_trait::async_trait]
pub trait MatchRepository {
    async fn get_match(&self, match_id: MatchId) -> Result<Match, RepoRetrieveError>;
    /// Inserts or replaces the match.
    async fn save_match(&self, r#match: &Match) -> Result<(), RepoError>;
    /// Removes the match with its teams, team players and availabilities.
    async fn delete_match(&self, match_id: MatchId) -> Result<(), RepoError>;
}
