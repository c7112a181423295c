use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use matchday_server_app::Application;

use crate::auth::JwtKeys;

mod auth;
mod dto;
mod error;
mod matches;
mod teams;

pub use auth::Claims;
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(app: Arc<Application>, jwt_secret: &str) -> Self {
        Self {
            app,
            keys: Arc::new(JwtKeys::new(jwt_secret.as_bytes())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let matches = Router::new()
        .route("/matches", post(matches::create_match))
        .route(
            "/matches/{match_id}",
            get(matches::get_match)
                .patch(matches::update_match)
                .delete(matches::delete_match),
        )
        .route(
            "/matches/{match_id}/availability",
            post(matches::mark_availability).delete(matches::remove_availability),
        )
        .route(
            "/matches/{match_id}/generate-teams",
            post(teams::generate_teams),
        )
        .route(
            "/matches/{match_id}/teams/{team_id}/players/{user_id}",
            post(teams::select_player).delete(teams::remove_player),
        )
        .route(
            "/teams/{team_id}/captain/{user_id}",
            post(teams::assign_captain),
        )
        .route("/matches/{match_id}/start", post(matches::start_match))
        .route("/matches/{match_id}/complete", post(matches::complete_match))
        .route("/matches/{match_id}/cancel", post(matches::cancel_match))
        .route(
            "/matches/{match_id}/reopen-registration",
            post(matches::reopen_registration),
        );

    Router::new().nest("/v1", matches).with_state(state)
}

pub async fn serve(
    state: AppState,
    host: &str,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    log::info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
