use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::{
    CommunityId, MatchId, MatchStore,
    actor::Actor,
    draft::DraftState,
    error::{MatchError, MatchResult},
    r#match::{Match, MatchStatus},
};

#[derive(Clone, Debug, Validate)]
pub struct NewMatch {
    pub community_id: CommunityId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: String,
    pub match_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub players_per_team: u32,
    pub is_auto_selection: bool,
}

pub(crate) fn check_dates(
    match_date: DateTime<Utc>,
    registration_deadline: DateTime<Utc>,
) -> MatchResult<()> {
    if match_date <= registration_deadline {
        return Err(MatchError::InvalidInput(
            "Match date must be after the registration deadline".to_string(),
        ));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait CreateMatchUseCase {
    async fn create_match(&self, actor: &Actor, new_match: NewMatch) -> MatchResult<Match>;
}

pub struct CreateMatchUseCaseImpl<S: MatchStore> {
    store: Arc<S>,
}

impl<S: MatchStore> CreateMatchUseCaseImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static> CreateMatchUseCase for CreateMatchUseCaseImpl<S> {
    async fn create_match(&self, actor: &Actor, new_match: NewMatch) -> MatchResult<Match> {
        actor.ensure_can_manage(new_match.community_id)?;
        if let Err(e) = new_match.validate() {
            return Err(MatchError::InvalidInput(e.to_string()));
        }
        let now = Utc::now();
        if new_match.registration_deadline <= now {
            return Err(MatchError::InvalidInput(
                "Registration deadline must be in the future".to_string(),
            ));
        }
        check_dates(new_match.match_date, new_match.registration_deadline)?;

        let r#match = Match {
            id: MatchId::new(),
            community_id: new_match.community_id,
            created_by: actor.user_id,
            title: new_match.title.trim().to_string(),
            description: new_match.description,
            match_date: new_match.match_date,
            registration_deadline: new_match.registration_deadline,
            players_per_team: new_match.players_per_team,
            is_auto_selection: new_match.is_auto_selection,
            status: MatchStatus::Upcoming,
            draft: DraftState::default(),
            created_at: now,
            updated_at: now,
        };
        self.store.save_match(&r#match).await?;
        log::info!(
            "Match {} created in community {} by {}",
            r#match.id,
            r#match.community_id,
            actor.user_id
        );
        Ok(r#match)
    }
}
