use std::sync::Arc;

use crate::{
    domain::{MatchId, MatchStore, actor::Actor, error::MatchResult, lock::MatchLockService},
    workflow::{
        load_match,
        match_event::{MatchView, TeamPlayerView, TeamView},
    },
};

#[async_trait::async_trait]
pub trait GetMatchUseCase {
    async fn get_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<MatchView>;
}

pub struct GetMatchUseCaseImpl<S: MatchStore, L: MatchLockService> {
    store: Arc<S>,
    lock_service: Arc<L>,
}

impl<S: MatchStore, L: MatchLockService> GetMatchUseCaseImpl<S, L> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>) -> Self {
        Self {
            store,
            lock_service,
        }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static, L: MatchLockService + Send + Sync + 'static> GetMatchUseCase
    for GetMatchUseCaseImpl<S, L>
{
    async fn get_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<MatchView> {
        let _guard = self.lock_service.lock_match(match_id).await;
        let store = self.store.as_ref();

        let r#match = load_match(store, match_id).await?;
        log::debug!("{} reads match {}", actor.user_id, match_id);

        let mut teams = Vec::new();
        for team in store.find_teams_by_match(match_id).await? {
            let players = store
                .find_team_players(team.id)
                .await?
                .into_iter()
                .map(|player| TeamPlayerView {
                    user_id: player.user_id,
                    is_captain: player.is_captain,
                    status: player.status,
                })
                .collect();
            teams.push(TeamView::from_team(team, players));
        }
        let availabilities = store
            .find_availabilities_by_match(match_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(MatchView {
            r#match,
            teams,
            availabilities,
        })
    }
}
