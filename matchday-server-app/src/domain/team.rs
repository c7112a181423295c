use chrono::{DateTime, Utc};

use crate::domain::{MatchId, RepoError, RepoRetrieveError, TeamId, UserId};

pub const RESERVE_TEAM_NAME: &str = "Reserve Team";

const TEAM_COLORS: [&str; 26] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#F7CAC9", "#F7819F",
    "#92A8D1", "#A2D2FF", "#B1E19B", "#FFFFC7", "#F7A35C", "#FF6B6B", "#4ECDC4", "#45B7D1",
    "#96CEB4", "#FFEAA7", "#DDA0DD", "#F7CAC9", "#F7819F", "#92A8D1", "#A2D2FF", "#B1E19B",
    "#FFFFC7", "#F7A35C",
];

pub fn team_color(team_index: usize) -> &'static str {
    TEAM_COLORS[team_index % TEAM_COLORS.len()]
}

/// "Team A" for index 0, "Team Z" for 25, then "Team AA", "Team AB", ...
pub fn team_name(team_index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = team_index + 1;
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    let suffix: String = letters.into_iter().rev().collect();
    format!("Team {}", suffix)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub match_id: MatchId,
    pub name: String,
    pub color: String,
    pub captain: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(match_id: MatchId, name: String, color: &str) -> Self {
        Self {
            id: TeamId::new(),
            match_id,
            name,
            color: color.to_string(),
            captain: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_reserve(&self) -> bool {
        self.name == RESERVE_TEAM_NAME
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TeamAvailabilityStatus {
    Selected,
    Reserve,
}

impl TeamAvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamAvailabilityStatus::Selected => "SELECTED",
            TeamAvailabilityStatus::Reserve => "RESERVE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TeamPlayer {
    pub team_id: TeamId,
    pub match_id: MatchId,
    pub user_id: UserId,
    pub is_captain: bool,
    pub status: TeamAvailabilityStatus,
    pub created_at: DateTime<Utc>,
}

impl TeamPlayer {
    pub fn selected(team: &Team, user_id: UserId, is_captain: bool) -> Self {
        Self {
            team_id: team.id,
            match_id: team.match_id,
            user_id,
            is_captain,
            status: TeamAvailabilityStatus::Selected,
            created_at: Utc::now(),
        }
    }

    pub fn reserve(team: &Team, user_id: UserId) -> Self {
        Self {
            team_id: team.id,
            match_id: team.match_id,
            user_id,
            is_captain: false,
            status: TeamAvailabilityStatus::Reserve,
            created_at: Utc::now(),
        }
    }
}

/// Teams of a match are listed in creation order.
#[async_trait::async_trait]
pub trait TeamRepository {
    async fn get_team(&self, team_id: TeamId) -> Result<Team, RepoRetrieveError>;
    async fn find_teams_by_match(&self, match_id: MatchId) -> Result<Vec<Team>, RepoError>;
    async fn find_team_by_name(
        &self,
        match_id: MatchId,
        name: &str,
    ) -> Result<Option<Team>, RepoError>;
    async fn save_team(&self, team: &Team) -> Result<(), RepoError>;
    /// Removes every team of the match together with its players.
    async fn delete_teams_by_match(&self, match_id: MatchId) -> Result<(), RepoError>;
}

/// A user appears at most once per match; implementations key players by
/// (team, user) and list a team's players in the order they joined.
#[async_trait::async_trait]
pub trait TeamPlayerRepository {
    async fn find_team_player(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamPlayer>, RepoError>;
    async fn find_team_player_in_match(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<Option<TeamPlayer>, RepoError>;
    async fn find_team_players(&self, team_id: TeamId) -> Result<Vec<TeamPlayer>, RepoError>;
    async fn count_team_players(&self, team_id: TeamId) -> Result<usize, RepoError>;
    async fn find_team_captain(&self, team_id: TeamId) -> Result<Option<TeamPlayer>, RepoError>;
    async fn save_team_player(&self, player: &TeamPlayer) -> Result<(), RepoError>;
    async fn delete_team_player(&self, team_id: TeamId, user_id: UserId) -> Result<(), RepoError>;
    async fn delete_team_players(&self, team_id: TeamId) -> Result<(), RepoError>;
}
