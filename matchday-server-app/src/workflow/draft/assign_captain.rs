use std::sync::Arc;

use crate::{
    domain::{
        MatchStore, TeamId, UserId,
        actor::Actor,
        error::{MatchError, MatchResult},
        lock::MatchLockService,
        team::Team,
    },
    ports::notification::{NotificationKind, PushNotification, PushNotificationPort},
    workflow::{load_match, load_team, notify_best_effort},
};

#[async_trait::async_trait]
pub trait AssignCaptainUseCase {
    async fn assign_captain(
        &self,
        actor: &Actor,
        team_id: TeamId,
        user_id: UserId,
    ) -> MatchResult<Team>;
}

pub struct AssignCaptainUseCaseImpl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> {
    store: Arc<S>,
    lock_service: Arc<L>,
    push_port: Arc<P>,
}

impl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> AssignCaptainUseCaseImpl<S, L, P> {
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
> AssignCaptainUseCase for AssignCaptainUseCaseImpl<S, L, P>
{
    async fn assign_captain(
        &self,
        actor: &Actor,
        team_id: TeamId,
        user_id: UserId,
    ) -> MatchResult<Team> {
        let store = self.store.as_ref();
        let match_id = load_team(store, team_id).await?.match_id;
        let guard = self.lock_service.lock_match(match_id).await;

        // reload under the lock, a regeneration may have replaced the team
        let mut team = load_team(store, team_id).await?;
        let r#match = load_match(store, match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        if r#match.status.is_finished() {
            return MatchError::invalid_state(format!(
                "Cannot assign a captain for a match that is {}",
                r#match.status
            ));
        }

        let Some(mut player) = store.find_team_player(team_id, user_id).await? else {
            return MatchError::not_found("Player not found in team");
        };

        if let Some(mut previous) = store.find_team_captain(team_id).await? {
            if previous.user_id != user_id {
                previous.is_captain = false;
                store.save_team_player(&previous).await?;
            }
        }
        player.is_captain = true;
        store.save_team_player(&player).await?;
        team.captain = Some(user_id);
        store.save_team(&team).await?;
        log::info!("Match {}: {} is now captain of {}", match_id, user_id, team.name);

        drop(guard);
        notify_best_effort(
            self.push_port.as_ref(),
            &[user_id],
            PushNotification::new(
                NotificationKind::CaptainAssigned,
                "You're Now a Captain!",
                format!("You are now the captain of {} in {}", team.name, r#match.title),
            )
            .with_match(match_id, &r#match.title)
            .with_team(team_id, &team.name),
        )
        .await;

        Ok(team)
    }
}
