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
pub trait StartMatchUseCase {
    async fn start_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match>;
}

pub struct StartMatchUseCaseImpl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> {
    store: Arc<S>,
    lock_service: Arc<L>,
    push_port: Arc<P>,
}

impl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> StartMatchUseCaseImpl<S, L, P> {
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
> StartMatchUseCase for StartMatchUseCaseImpl<S, L, P>
{
    async fn start_match(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match> {
        let guard = self.lock_service.lock_match(match_id).await;

        let mut r#match = load_match(self.store.as_ref(), match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        r#match.start()?;
        let players = team_members(self.store.as_ref(), match_id).await?;
        r#match.touch();
        self.store.save_match(&r#match).await?;
        log::info!("Match {} started", match_id);

        drop(guard);
        notify_best_effort(
            self.push_port.as_ref(),
            &players,
            PushNotification::new(
                NotificationKind::MatchStarted,
                "Match Started!",
                format!("{} has started", r#match.title),
            )
            .with_match(match_id, &r#match.title),
        )
        .await;

        Ok(r#match)
    }
}
