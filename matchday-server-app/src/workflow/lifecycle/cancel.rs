use std::sync::Arc;

use crate::{
    domain::{
        MatchId, MatchStore, actor::Actor, error::MatchResult, lock::MatchLockService,
        r#match::Match,
    },
    ports::notification::{NotificationKind, PushNotification, PushNotificationPort},
    workflow::{load_match, notify_best_effort, team_members},
};

#[async_trait::async_trait]
pub trait CancelMatchUseCase {
    async fn cancel_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match>;
}

pub struct CancelMatchUseCaseImpl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> {
    store: Arc<S>,
    lock_service: Arc<L>,
    push_port: Arc<P>,
}

impl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> CancelMatchUseCaseImpl<S, L, P> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>, push_port: Arc<P>) -> Self {
        Self {
            store,
            lock_service,
            push_port,
        }
    }
}

#[async_trait::async_trait]
impl<
    S: MatchStore + 'static,
    L: MatchLockService + Send + Sync + 'static,
    P: PushNotificationPort + Send + Sync + 'static,
> CancelMatchUseCase for CancelMatchUseCaseImpl<S, L, P>
{
    async fn cancel_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match> {
        let guard = self.lock_service.lock_match(match_id).await;
        let store = self.store.as_ref();

        let mut r#match = load_match(store, match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        r#match.cancel()?;

        // recipients are read before the write so a failed read cancels nothing
        let mut recipients = team_members(store, match_id).await?;
        recipients.extend(
            store
                .find_availabilities_by_match(match_id)
                .await?
                .into_iter()
                .map(|availability| availability.user_id),
        );

        r#match.touch();
        store.save_match(&r#match).await?;
        log::info!("Match {} cancelled by {}", match_id, actor.user_id);
        drop(guard);
        notify_best_effort(
            self.push_port.as_ref(),
            &recipients,
            PushNotification::new(
                NotificationKind::MatchCancelled,
                "Match Cancelled",
                format!("{} has been cancelled", r#match.title),
            )
            .with_match(match_id, &r#match.title),
        )
        .await;

        Ok(r#match)
    }
}
