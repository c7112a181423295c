use std::sync::Arc;

use crate::{
    domain::{
        MatchId, MatchStore,
        actor::Actor,
        error::{MatchError, MatchResult},
        lock::MatchLockService,
    },
    workflow::load_match,
};

#[async_trait::async_trait]
pub trait RemoveAvailabilityUseCase {
    async fn remove_availability(&self, actor: &Actor, match_id: MatchId) -> MatchResult<()>;
}

pub struct RemoveAvailabilityUseCaseImpl<S: MatchStore, L: MatchLockService> {
    store: Arc<S>,
    lock_service: Arc<L>,
}

impl<S: MatchStore, L: MatchLockService> RemoveAvailabilityUseCaseImpl<S, L> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>) -> Self {
        Self {
            store,
            lock_service,
        }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static, L: MatchLockService + Send + Sync + 'static>
    RemoveAvailabilityUseCase for RemoveAvailabilityUseCaseImpl<S, L>
{
    async fn remove_availability(&self, actor: &Actor, match_id: MatchId) -> MatchResult<()> {
        let _guard = self.lock_service.lock_match(match_id).await;
        let store = self.store.as_ref();

        load_match(store, match_id).await?;

        if store
            .find_availability(match_id, actor.user_id)
            .await?
            .is_none()
        {
            return MatchError::not_found("Availability not found");
        }
        if store
            .find_team_player_in_match(match_id, actor.user_id)
            .await?
            .is_some()
        {
            return MatchError::conflict(
                "Cannot remove availability while assigned to a team for this match",
            );
        }

        store.delete_availability(match_id, actor.user_id).await?;
        log::debug!("Match {}: {} withdrew availability", match_id, actor.user_id);
        Ok(())
    }
}
