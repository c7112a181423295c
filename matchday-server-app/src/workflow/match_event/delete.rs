use std::sync::Arc;

use crate::{
    domain::{MatchId, MatchStore, actor::Actor, error::MatchResult, lock::MatchLockService},
    workflow::load_match,
};

#[async_trait::async_trait]
pub trait DeleteMatchUseCase {
    async fn delete_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<()>;
}

pub struct DeleteMatchUseCaseImpl<S: MatchStore, L: MatchLockService> {
    store: Arc<S>,
    lock_service: Arc<L>,
}

impl<S: MatchStore, L: MatchLockService> DeleteMatchUseCaseImpl<S, L> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>) -> Self {
        Self {
            store,
            lock_service,
        }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static, L: MatchLockService + Send + Sync + 'static> DeleteMatchUseCase
    for DeleteMatchUseCaseImpl<S, L>
{
    async fn delete_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<()> {
        {
            let _guard = self.lock_service.lock_match(match_id).await;

            let r#match = load_match(self.store.as_ref(), match_id).await?;
            actor.ensure_can_manage(r#match.community_id)?;
            r#match.ensure_deletable()?;
            self.store.delete_match(match_id).await?;
        }
        self.lock_service.forget_match(match_id);
        log::info!("Match {} deleted by {}", match_id, actor.user_id);
        Ok(())
    }
}
