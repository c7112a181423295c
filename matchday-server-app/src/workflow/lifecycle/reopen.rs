use std::sync::Arc;

use crate::{
    domain::{
        MatchId, MatchStore, actor::Actor, error::MatchResult, lock::MatchLockService,
        r#match::Match,
    },
    workflow::load_match,
};

/// Sends a match back to open registration. Existing teams stay until the
/// next generation replaces them.
#[async_trait::async_trait]
pub trait ReopenRegistrationUseCase {
    async fn reopen_registration(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match>;
}

pub struct ReopenRegistrationUseCaseImpl<S: MatchStore, L: MatchLockService> {
    store: Arc<S>,
    lock_service: Arc<L>,
}

impl<S: MatchStore, L: MatchLockService> ReopenRegistrationUseCaseImpl<S, L> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>) -> Self {
        Self {
            store,
            lock_service,
        }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static, L: MatchLockService + Send + Sync + 'static>
    ReopenRegistrationUseCase for ReopenRegistrationUseCaseImpl<S, L>
{
    async fn reopen_registration(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match> {
        let _guard = self.lock_service.lock_match(match_id).await;

        let mut r#match = load_match(self.store.as_ref(), match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        let previous = r#match.status;
        r#match.reopen_registration()?;
        r#match.touch();
        self.store.save_match(&r#match).await?;
        log::info!(
            "Match {}: registration reopened (was {})",
            match_id,
            previous
        );

        Ok(r#match)
    }
}
