use chrono::{DateTime, Utc};

use crate::domain::{
    MatchId, TeamId, UserId,
    availability::{Availability, AvailabilityStatus},
    draft::DraftState,
    r#match::{Match, MatchStatus},
    team::{Team, TeamAvailabilityStatus},
};

pub mod create;
pub mod delete;
pub mod get;
pub mod update;

#[derive(Clone, Debug)]
pub struct MatchView {
    pub r#match: Match,
    pub teams: Vec<TeamView>,
    pub availabilities: Vec<AvailabilityView>,
}

impl MatchView {
    pub fn status(&self) -> MatchStatus {
        self.r#match.status
    }

    pub fn draft(&self) -> &DraftState {
        &self.r#match.draft
    }

    pub fn reserve_team(&self) -> Option<&TeamView> {
        self.teams.iter().find(|team| team.is_reserve)
    }

    pub fn team(&self, team_id: TeamId) -> Option<&TeamView> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    pub fn users_with_status(&self, status: AvailabilityStatus) -> Vec<UserId> {
        self.availabilities
            .iter()
            .filter(|availability| availability.status == status)
            .map(|availability| availability.user_id)
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct TeamView {
    pub id: TeamId,
    pub match_id: MatchId,
    pub name: String,
    pub color: String,
    pub captain: Option<UserId>,
    pub is_reserve: bool,
    pub players: Vec<TeamPlayerView>,
}

impl TeamView {
    pub fn from_team(team: Team, players: Vec<TeamPlayerView>) -> Self {
        Self {
            is_reserve: team.is_reserve(),
            id: team.id,
            match_id: team.match_id,
            name: team.name,
            color: team.color,
            captain: team.captain,
            players,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TeamPlayerView {
    pub user_id: UserId,
    pub is_captain: bool,
    pub status: TeamAvailabilityStatus,
}

#[derive(Clone, Debug)]
pub struct AvailabilityView {
    pub user_id: UserId,
    pub status: AvailabilityStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<Availability> for AvailabilityView {
    fn from(availability: Availability) -> Self {
        Self {
            user_id: availability.user_id,
            status: availability.status,
            updated_at: availability.updated_at,
        }
    }
}
