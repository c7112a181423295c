use std::sync::Arc;

use crate::{
    domain::{
        MatchId, MatchStore, TeamId, UserId,
        actor::Actor,
        availability::AvailabilityStatus,
        error::{MatchError, MatchResult},
        lock::MatchLockService,
        r#match::Match,
    },
    ports::notification::{NotificationKind, PushNotification, PushNotificationPort},
    workflow::{draft::ensure_team_in_match, load_match, load_team, notify_best_effort},
};

/// Takes a player off a team and makes them available again. The draft turn
/// is left where it is, even if the team falls below full strength after the
/// draft has moved past it.
#[async_trait::async_trait]
pub trait RemovePlayerUseCase {
    async fn remove_player(
        &self,
        actor: &Actor,
        match_id: MatchId,
        team_id: TeamId,
        user_id: UserId,
    ) -> MatchResult<Match>;
}

pub struct RemovePlayerUseCaseImpl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> {
    store: Arc<S>,
    lock_service: Arc<L>,
    push_port: Arc<P>,
}

impl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> RemovePlayerUseCaseImpl<S, L, P> {
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
> RemovePlayerUseCase for RemovePlayerUseCaseImpl<S, L, P>
{
    async fn remove_player(
        &self,
        actor: &Actor,
        match_id: MatchId,
        team_id: TeamId,
        user_id: UserId,
    ) -> MatchResult<Match> {
        let guard = self.lock_service.lock_match(match_id).await;
        let store = self.store.as_ref();

        let mut r#match = load_match(store, match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        let mut team = load_team(store, team_id).await?;
        ensure_team_in_match(&team, &r#match)?;
        r#match.ensure_roster_editable()?;

        let Some(player) = store.find_team_player(team_id, user_id).await? else {
            return MatchError::not_found("Player not found in team");
        };
        if player.is_captain && r#match.draft.in_progress {
            return MatchError::conflict("Cannot remove a team captain while the draft is in progress");
        }
        let Some(mut availability) = store.find_availability(match_id, user_id).await? else {
            return MatchError::not_found("Availability not found");
        };

        store.delete_team_player(team_id, user_id).await?;
        if team.captain == Some(user_id) {
            team.captain = None;
            store.save_team(&team).await?;
        }
        availability.set_status(AvailabilityStatus::Available);
        store.save_availability(&availability).await?;

        r#match.touch();
        store.save_match(&r#match).await?;
        log::info!(
            "Match {}: {} removed from {} by {}",
            match_id,
            user_id,
            team.name,
            actor.user_id
        );

        drop(guard);
        notify_best_effort(
            self.push_port.as_ref(),
            &[user_id],
            PushNotification::new(
                NotificationKind::PlayerRemoved,
                "Removed from Team",
                format!("You have been removed from {} in {}", team.name, r#match.title),
            )
            .with_match(match_id, &r#match.title)
            .with_team(team_id, &team.name),
        )
        .await;

        Ok(r#match)
    }
}
