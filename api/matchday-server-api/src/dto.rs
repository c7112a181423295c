use chrono::{DateTime, Utc};
use matchday_server_app::{
    domain::{CommunityId, availability::Availability, r#match::Match, team::Team},
    workflow::match_event::{
        AvailabilityView, MatchView, TeamPlayerView, TeamView, create::NewMatch,
        update::MatchUpdate,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub community_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub match_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub players_per_team: u32,
    #[serde(default)]
    pub is_auto_selection: bool,
}

impl From<CreateMatchRequest> for NewMatch {
    fn from(req: CreateMatchRequest) -> Self {
        NewMatch {
            community_id: CommunityId(req.community_id),
            title: req.title,
            description: req.description,
            match_date: req.match_date,
            registration_deadline: req.registration_deadline,
            players_per_team: req.players_per_team,
            is_auto_selection: req.is_auto_selection,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub match_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub players_per_team: Option<u32>,
    pub is_auto_selection: Option<bool>,
}

impl From<UpdateMatchRequest> for MatchUpdate {
    fn from(req: UpdateMatchRequest) -> Self {
        MatchUpdate {
            title: req.title,
            description: req.description,
            match_date: req.match_date,
            registration_deadline: req.registration_deadline,
            players_per_team: req.players_per_team,
            is_auto_selection: req.is_auto_selection,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: Uuid,
    pub community_id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    pub description: String,
    pub match_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub players_per_team: u32,
    pub is_auto_selection: bool,
    pub status: &'static str,
    pub draft_in_progress: bool,
    pub manual_draft_order: Vec<Uuid>,
    pub manual_draft_index: usize,
    pub current_picking_team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id.0,
            community_id: m.community_id.0,
            created_by: m.created_by.0,
            title: m.title,
            description: m.description,
            match_date: m.match_date,
            registration_deadline: m.registration_deadline,
            players_per_team: m.players_per_team,
            is_auto_selection: m.is_auto_selection,
            status: m.status.as_str(),
            draft_in_progress: m.draft.in_progress,
            manual_draft_order: m.draft.order.iter().map(|team_id| team_id.0).collect(),
            manual_draft_index: m.draft.index,
            current_picking_team_id: m.draft.current_picking_team.map(|team_id| team_id.0),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlayerResponse {
    pub user_id: Uuid,
    pub is_captain: bool,
    pub status: &'static str,
}

impl From<TeamPlayerView> for TeamPlayerResponse {
    fn from(player: TeamPlayerView) -> Self {
        Self {
            user_id: player.user_id.0,
            is_captain: player.is_captain,
            status: player.status.as_str(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub match_id: Uuid,
    pub name: String,
    pub color: String,
    pub captain_id: Option<Uuid>,
    pub is_reserve: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<TeamPlayerResponse>>,
}

impl From<TeamView> for TeamResponse {
    fn from(team: TeamView) -> Self {
        Self {
            id: team.id.0,
            match_id: team.match_id.0,
            name: team.name,
            color: team.color,
            captain_id: team.captain.map(|user_id| user_id.0),
            is_reserve: team.is_reserve,
            players: Some(team.players.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            is_reserve: team.is_reserve(),
            id: team.id.0,
            match_id: team.match_id.0,
            name: team.name,
            color: team.color,
            captain_id: team.captain.map(|user_id| user_id.0),
            players: None,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub user_id: Uuid,
    pub status: &'static str,
    pub updated_at: DateTime<Utc>,
}

impl From<AvailabilityView> for AvailabilityResponse {
    fn from(view: AvailabilityView) -> Self {
        Self {
            user_id: view.user_id.0,
            status: view.status.as_str(),
            updated_at: view.updated_at,
        }
    }
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        AvailabilityView::from(availability).into()
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetailResponse {
    #[serde(flatten)]
    pub r#match: MatchResponse,
    pub teams: Vec<TeamResponse>,
    pub availabilities: Vec<AvailabilityResponse>,
}

impl From<MatchView> for MatchDetailResponse {
    fn from(view: MatchView) -> Self {
        Self {
            r#match: view.r#match.into(),
            teams: view.teams.into_iter().map(Into::into).collect(),
            availabilities: view.availabilities.into_iter().map(Into::into).collect(),
        }
    }
}
