use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    domain::{
        MatchId, MatchStore,
        actor::Actor,
        error::{MatchError, MatchResult},
        lock::MatchLockService,
        r#match::Match,
    },
    workflow::{load_match, match_event::create::check_dates},
};

/// Fields left as `None` keep their current value.
#[derive(Clone, Debug, Default, Validate)]
pub struct MatchUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub match_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    #[validate(range(min = 1))]
    pub players_per_team: Option<u32>,
    pub is_auto_selection: Option<bool>,
}

impl MatchUpdate {
    fn changes_team_shape(&self, r#match: &Match) -> bool {
        self.players_per_team
            .is_some_and(|size| size != r#match.players_per_team)
            || self
                .is_auto_selection
                .is_some_and(|auto| auto != r#match.is_auto_selection)
    }
}

#[async_trait::async_trait]
pub trait UpdateMatchUseCase {
    async fn update_match(
        &self,
        actor: &Actor,
        match_id: MatchId,
        update: MatchUpdate,
    ) -> MatchResult<Match>;
}

pub struct UpdateMatchUseCaseImpl<S: MatchStore, L: MatchLockService> {
    store: Arc<S>,
    lock_service: Arc<L>,
}

impl<S: MatchStore, L: MatchLockService> UpdateMatchUseCaseImpl<S, L> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>) -> Self {
        Self {
            store,
            lock_service,
        }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static, L: MatchLockService + Send + Sync + 'static> UpdateMatchUseCase
    for UpdateMatchUseCaseImpl<S, L>
{
    async fn update_match(
        &self,
        actor: &Actor,
        match_id: MatchId,
        update: MatchUpdate,
    ) -> MatchResult<Match> {
        let _guard = self.lock_service.lock_match(match_id).await;

        let mut r#match = load_match(self.store.as_ref(), match_id).await?;
        actor.ensure_can_manage(r#match.community_id)?;
        r#match.ensure_editable()?;
        if let Err(e) = update.validate() {
            return Err(MatchError::InvalidInput(e.to_string()));
        }
        if r#match.status.has_teams() && update.changes_team_shape(&r#match) {
            return MatchError::invalid_state(
                "Cannot change team size or selection mode after teams have been generated",
            );
        }

        let match_date = update.match_date.unwrap_or(r#match.match_date);
        let registration_deadline = update
            .registration_deadline
            .unwrap_or(r#match.registration_deadline);
        check_dates(match_date, registration_deadline)?;

        if let Some(title) = update.title {
            r#match.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            r#match.description = description;
        }
        r#match.match_date = match_date;
        r#match.registration_deadline = registration_deadline;
        if let Some(size) = update.players_per_team {
            r#match.players_per_team = size;
        }
        if let Some(auto) = update.is_auto_selection {
            r#match.is_auto_selection = auto;
        }
        r#match.touch();
        self.store.save_match(&r#match).await?;
        log::info!("Match {} updated by {}", match_id, actor.user_id);

        Ok(r#match)
    }
}
