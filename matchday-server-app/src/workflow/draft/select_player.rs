use std::sync::Arc;

use crate::{
    domain::{
        MatchId, MatchStore, TeamId, UserId,
        actor::Actor,
        availability::AvailabilityStatus,
        error::{MatchError, MatchResult},
        lock::MatchLockService,
        r#match::Match,
        team::TeamPlayer,
    },
    ports::notification::{NotificationKind, PushNotification, PushNotificationPort},
    workflow::{
        draft::{advance_draft, ensure_team_in_match},
        load_match, load_team, notify_best_effort,
    },
};

#[async_trait::async_trait]
pub trait SelectPlayerUseCase {
    async fn select_player(
        &self,
        actor: &Actor,
        match_id: MatchId,
        team_id: TeamId,
        user_id: UserId,
    ) -> MatchResult<Match>;
}

pub struct SelectPlayerUseCaseImpl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> {
    store: Arc<S>,
    lock_service: Arc<L>,
    push_port: Arc<P>,
}

impl<S: MatchStore, L: MatchLockService, P: PushNotificationPort> SelectPlayerUseCaseImpl<S, L, P> {
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
> SelectPlayerUseCase for SelectPlayerUseCaseImpl<S, L, P>
{
    async fn select_player(
        &self,
        actor: &Actor,
        match_id: MatchId,
        team_id: TeamId,
        user_id: UserId,
    ) -> MatchResult<Match> {
        let guard = self.lock_service.lock_match(match_id).await;
        let store = self.store.as_ref();

        let mut r#match = load_match(store, match_id).await?;
        let team = load_team(store, team_id).await?;
        ensure_team_in_match(&team, &r#match)?;
        if team.is_reserve() {
            return MatchError::conflict("Players cannot be picked into the reserve team");
        }
        r#match.ensure_roster_editable()?;

        if r#match.is_auto_selection {
            actor.ensure_can_manage(r#match.community_id)?;
        } else {
            if !r#match.draft.in_progress {
                return MatchError::invalid_state("Manual draft is not in progress for this match");
            }
            if !r#match.draft.is_turn_of(team_id) {
                return MatchError::forbidden("It is not this team's turn to pick");
            }
            let captain = store.find_team_captain(team_id).await?;
            if captain.map(|c| c.user_id) != Some(actor.user_id) {
                return MatchError::forbidden(
                    "Only the current captain can select players during the draft",
                );
            }
        }

        let Some(mut availability) = store.find_availability(match_id, user_id).await? else {
            return MatchError::not_found("User has not marked availability for this match");
        };
        if availability.status != AvailabilityStatus::Available {
            return MatchError::conflict("User is not available for this match");
        }
        if store.count_team_players(team_id).await? >= r#match.players_per_team as usize {
            return MatchError::conflict("Team is full");
        }
        if store
            .find_team_player_in_match(match_id, user_id)
            .await?
            .is_some()
        {
            return MatchError::conflict("User is already in a team for this match");
        }

        store
            .save_team_player(&TeamPlayer::selected(&team, user_id, false))
            .await?;
        availability.set_status(AvailabilityStatus::Selected);
        store.save_availability(&availability).await?;
        log::info!(
            "Match {}: {} selected for {} by {}",
            match_id,
            user_id,
            team.name,
            actor.user_id
        );

        if !r#match.is_auto_selection {
            advance_draft(store, &mut r#match, team_id).await?;
        }
        r#match.touch();
        store.save_match(&r#match).await?;

        drop(guard);
        notify_best_effort(
            self.push_port.as_ref(),
            &[user_id],
            PushNotification::new(
                NotificationKind::PlayerSelected,
                "You've Been Selected!",
                format!(
                    "You have been selected for {} in {}",
                    team.name, r#match.title
                ),
            )
            .with_match(match_id, &r#match.title)
            .with_team(team_id, &team.name),
        )
        .await;

        Ok(r#match)
    }
}
