use std::{collections::HashMap, sync::Arc};

use crate::{
    domain::{
        MatchId, MatchStore, UserId,
        actor::Actor,
        availability::{Availability, AvailabilityStatus},
        error::MatchResult,
        lock::MatchLockService,
        r#match::{Match, MatchStatus},
        team::{Team, TeamPlayer},
        team_generation::{
            AutoTeamPlan, ManualDraftPlan, PlannedTeam, plan_auto_teams, plan_manual_draft,
        },
    },
    ports::{
        notification::{NotificationKind, PushNotification, PushNotificationPort},
        random::RandomPort,
    },
    workflow::{draft::advance_draft, load_match, notify_best_effort},
};

enum GenerationPlan {
    Auto(AutoTeamPlan),
    Manual(ManualDraftPlan),
}

#[async_trait::async_trait]
pub trait GenerateTeamsUseCase {
    async fn generate_teams(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match>;
}

pub struct GenerateTeamsUseCaseImpl<
    S: MatchStore,
    L: MatchLockService,
    P: PushNotificationPort,
    R: RandomPort,
> {
    store: Arc<S>,
    lock_service: Arc<L>,
    push_port: Arc<P>,
    random: Arc<R>,
}

impl<S: MatchStore, L: MatchLockService, P: PushNotificationPort, R: RandomPort>
    GenerateTeamsUseCaseImpl<S, L, P, R>
{
    pub fn new(store: Arc<S>, lock_service: Arc<L>, push_port: Arc<P>, random: Arc<R>) -> Self {
        Self {
            store,
            lock_service,
            push_port,
            random,
        }
    }

    async fn create_team(
        &self,
        match_id: MatchId,
        planned: &PlannedTeam,
        availabilities: &mut HashMap<UserId, Availability>,
    ) -> MatchResult<Team> {
        let mut team = Team::new(match_id, planned.name.clone(), planned.color);
        team.captain = planned.captain();
        self.store.save_team(&team).await?;

        for (position, user_id) in planned.players.iter().enumerate() {
            let player = TeamPlayer::selected(&team, *user_id, position == 0);
            self.store.save_team_player(&player).await?;
            self.set_availability(availabilities, *user_id, AvailabilityStatus::Selected)
                .await?;
        }
        Ok(team)
    }

    async fn set_availability(
        &self,
        availabilities: &mut HashMap<UserId, Availability>,
        user_id: UserId,
        status: AvailabilityStatus,
    ) -> MatchResult<()> {
        if let Some(availability) = availabilities.get_mut(&user_id) {
            availability.set_status(status);
            self.store.save_availability(availability).await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<
    S: MatchStore + 'static,
    L: MatchLockService + Send + Sync + 'static,
    P: PushNotificationPort + Send + Sync + 'static,
    R: RandomPort + Send + Sync + 'static,
> GenerateTeamsUseCase for GenerateTeamsUseCaseImpl<S, L, P, R>
{
    async fn generate_teams(&self, actor: &Actor, match_id: MatchId) -> MatchResult<Match> {
        let guard = self.lock_service.lock_match(match_id).await;

        let mut r#match = load_match(self.store.as_ref(), match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        r#match.ensure_can_generate_teams()?;

        // players placed by an earlier generation go back into the pool
        let mut availabilities: HashMap<UserId, Availability> = HashMap::new();
        let mut pool = Vec::new();
        for availability in self.store.find_availabilities_by_match(match_id).await? {
            if availability.status == AvailabilityStatus::Available
                || availability.status.is_assigned()
            {
                pool.push(availability.user_id);
                availabilities.insert(availability.user_id, availability);
            }
        }

        let plan = if r#match.is_auto_selection {
            GenerationPlan::Auto(plan_auto_teams(
                pool,
                r#match.players_per_team,
                self.random.as_ref(),
            )?)
        } else {
            GenerationPlan::Manual(plan_manual_draft(
                pool,
                r#match.players_per_team,
                self.random.as_ref(),
            )?)
        };

        for availability in availabilities.values_mut() {
            if availability.status.is_assigned() {
                availability.set_status(AvailabilityStatus::Available);
                self.store.save_availability(availability).await?;
            }
        }
        self.store.delete_teams_by_match(match_id).await?;
        r#match.draft.reset();

        let mut placed = Vec::new();
        match plan {
            GenerationPlan::Auto(plan) => {
                for planned in &plan.teams {
                    self.create_team(match_id, planned, &mut availabilities)
                        .await?;
                    placed.extend(planned.players.iter().copied());
                }
                if let Some(reserve) = &plan.reserve {
                    let team = Team::new(match_id, reserve.name.clone(), reserve.color);
                    self.store.save_team(&team).await?;
                    for user_id in &reserve.players {
                        self.store
                            .save_team_player(&TeamPlayer::reserve(&team, *user_id))
                            .await?;
                        self.set_availability(
                            &mut availabilities,
                            *user_id,
                            AvailabilityStatus::Reserve,
                        )
                        .await?;
                    }
                    placed.extend(reserve.players.iter().copied());
                }
                r#match.status = MatchStatus::TeamsSelected;
                log::info!(
                    "Match {}: generated {} teams automatically ({} in reserve)",
                    match_id,
                    plan.teams.len(),
                    plan.reserve.as_ref().map(|r| r.players.len()).unwrap_or(0)
                );
            }
            GenerationPlan::Manual(plan) => {
                let mut order = Vec::with_capacity(plan.teams.len());
                for planned in &plan.teams {
                    let team = self
                        .create_team(match_id, planned, &mut availabilities)
                        .await?;
                    order.push(team.id);
                    placed.extend(planned.players.iter().copied());
                }
                let team_count = order.len();
                let last_seeded = order.last().copied();
                r#match.begin_manual_draft(order);
                // with one player per team the captains already fill every team
                if r#match.players_per_team == 1 {
                    if let Some(team_id) = last_seeded {
                        advance_draft(self.store.as_ref(), &mut r#match, team_id).await?;
                    }
                }
                log::info!(
                    "Match {}: seeded {} captains for manual draft, {} players undrafted",
                    match_id,
                    team_count,
                    plan.undrafted.len()
                );
            }
        }

        r#match.touch();
        self.store.save_match(&r#match).await?;

        drop(guard);
        notify_best_effort(
            self.push_port.as_ref(),
            &placed,
            PushNotification::new(
                NotificationKind::TeamsGenerated,
                "Teams Generated",
                format!("Teams have been generated for {}", r#match.title),
            )
            .with_match(match_id, &r#match.title),
        )
        .await;

        Ok(r#match)
    }
}
