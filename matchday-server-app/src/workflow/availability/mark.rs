use std::sync::Arc;

use chrono::Utc;

use crate::{
    domain::{
        MatchId, MatchStore,
        actor::Actor,
        availability::{Availability, AvailabilityStatus},
        error::{MatchError, MatchResult},
        lock::MatchLockService,
    },
    workflow::load_match,
};

#[async_trait::async_trait]
pub trait MarkAvailabilityUseCase {
    async fn mark_availability(
        &self,
        actor: &Actor,
        match_id: MatchId,
        is_available: bool,
    ) -> MatchResult<Availability>;
}

pub struct MarkAvailabilityUseCaseImpl<S: MatchStore, L: MatchLockService> {
    store: Arc<S>,
    lock_service: Arc<L>,
}

impl<S: MatchStore, L: MatchLockService> MarkAvailabilityUseCaseImpl<S, L> {
    pub fn new(store: Arc<S>, lock_service: Arc<L>) -> Self {
        Self {
            store,
            lock_service,
        }
    }
}

#[async_trait::async_trait]
impl<S: MatchStore + 'static, L: MatchLockService + Send + Sync + 'static>
    MarkAvailabilityUseCase for MarkAvailabilityUseCaseImpl<S, L>
{
    async fn mark_availability(
        &self,
        actor: &Actor,
        match_id: MatchId,
        is_available: bool,
    ) -> MatchResult<Availability> {
        let _guard = self.lock_service.lock_match(match_id).await;
        let store = self.store.as_ref();

        let mut r#match = load_match(store, match_id).await?;
        r#match.ensure_accepts_availability(Utc::now())?;

        let status = if is_available {
            AvailabilityStatus::Available
        } else {
            AvailabilityStatus::NotAvailable
        };
        let availability = match store.find_availability(match_id, actor.user_id).await? {
            Some(existing) if existing.status.is_assigned() => {
                return MatchError::conflict(format!(
                    "Availability cannot change while the user is {}",
                    existing.status
                ));
            }
            Some(mut existing) => {
                existing.set_status(status);
                existing
            }
            None => Availability::new(match_id, actor.user_id, status),
        };
        store.save_availability(&availability).await?;

        let previous = r#match.status;
        r#match.open_registration();
        if r#match.status != previous {
            r#match.touch();
            store.save_match(&r#match).await?;
            log::info!("Match {}: registration opened", match_id);
        }
        log::debug!(
            "Match {}: {} marked {}",
            match_id,
            actor.user_id,
            availability.status
        );

        Ok(availability)
    }
}
