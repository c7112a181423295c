use axum::{
    Json,
    extract::{Path, State},
};
use matchday_server_app::domain::{MatchId, TeamId, UserId};
use uuid::Uuid;

use crate::{
    AppState,
    auth::Auth,
    dto::{MatchResponse, TeamResponse},
    error::ApiError,
};

pub async fn generate_teams(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let updated = state
        .app
        .draft_generate_teams_use_case
        .generate_teams(&actor, MatchId(match_id))
        .await?;
    Ok(Json(updated.into()))
}

pub async fn select_player(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path((match_id, team_id, user_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<MatchResponse>, ApiError> {
    let updated = state
        .app
        .draft_select_player_use_case
        .select_player(&actor, MatchId(match_id), TeamId(team_id), UserId(user_id))
        .await?;
    Ok(Json(updated.into()))
}

pub async fn remove_player(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path((match_id, team_id, user_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<MatchResponse>, ApiError> {
    let updated = state
        .app
        .draft_remove_player_use_case
        .remove_player(&actor, MatchId(match_id), TeamId(team_id), UserId(user_id))
        .await?;
    Ok(Json(updated.into()))
}

pub async fn assign_captain(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = state
        .app
        .draft_assign_captain_use_case
        .assign_captain(&actor, TeamId(team_id), UserId(user_id))
        .await?;
    Ok(Json(team.into()))
}
