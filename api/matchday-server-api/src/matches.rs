use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use matchday_server_app::domain::MatchId;
use uuid::Uuid;

use crate::{
    AppState,
    auth::Auth,
    dto::{
        AvailabilityRequest, AvailabilityResponse, CreateMatchRequest, MatchDetailResponse,
        MatchResponse, UpdateMatchRequest,
    },
    error::ApiError,
};

pub async fn create_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let created = state
        .app
        .match_create_use_case
        .create_match(&actor, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchDetailResponse>, ApiError> {
    let view = state
        .app
        .match_get_use_case
        .get_match(&actor, MatchId(match_id))
        .await?;
    Ok(Json(view.into()))
}

pub async fn update_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let updated = state
        .app
        .match_update_use_case
        .update_match(&actor, MatchId(match_id), req.into())
        .await?;
    Ok(Json(updated.into()))
}

pub async fn delete_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .match_delete_use_case
        .delete_match(&actor, MatchId(match_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_availability(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let availability = state
        .app
        .availability_mark_use_case
        .mark_availability(&actor, MatchId(match_id), req.is_available)
        .await?;
    Ok(Json(availability.into()))
}

pub async fn remove_availability(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .availability_remove_use_case
        .remove_availability(&actor, MatchId(match_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn start_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let started = state
        .app
        .match_start_use_case
        .start_match(&actor, MatchId(match_id))
        .await?;
    Ok(Json(started.into()))
}

pub async fn complete_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let completed = state
        .app
        .match_complete_use_case
        .complete_match(&actor, MatchId(match_id))
        .await?;
    Ok(Json(completed.into()))
}

pub async fn cancel_match(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let cancelled = state
        .app
        .match_cancel_use_case
        .cancel_match(&actor, MatchId(match_id))
        .await?;
    Ok(Json(cancelled.into()))
}

pub async fn reopen_registration(
    Auth(actor): Auth,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchResponse>, ApiError> {
    let reopened = state
        .app
        .match_reopen_registration_use_case
        .reopen_registration(&actor, MatchId(match_id))
        .await?;
    Ok(Json(reopened.into()))
}
