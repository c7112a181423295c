use std::sync::Arc;

use crate::{
    domain::{MatchStore, lock::MatchLockServiceImpl},
    ports::{notification::PushNotificationPort, random::RandomPort},
    workflow::{
        availability::{
            mark::{MarkAvailabilityUseCase, MarkAvailabilityUseCaseImpl},
            remove::{RemoveAvailabilityUseCase, RemoveAvailabilityUseCaseImpl},
        },
        draft::{
            assign_captain::{AssignCaptainUseCase, AssignCaptainUseCaseImpl},
            generate_teams::{GenerateTeamsUseCase, GenerateTeamsUseCaseImpl},
            remove_player::{RemovePlayerUseCase, RemovePlayerUseCaseImpl},
            select_player::{SelectPlayerUseCase, SelectPlayerUseCaseImpl},
        },
        lifecycle::{
            cancel::{CancelMatchUseCase, CancelMatchUseCaseImpl},
            complete::{CompleteMatchUseCase, CompleteMatchUseCaseImpl},
            reopen::{ReopenRegistrationUseCase, ReopenRegistrationUseCaseImpl},
            start::{StartMatchUseCase, StartMatchUseCaseImpl},
        },
        match_event::{
            create::{CreateMatchUseCase, CreateMatchUseCaseImpl},
            delete::{DeleteMatchUseCase, DeleteMatchUseCaseImpl},
            get::{GetMatchUseCase, GetMatchUseCaseImpl},
            update::{UpdateMatchUseCase, UpdateMatchUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

pub struct Application {
    pub match_create_use_case: Box<dyn CreateMatchUseCase + Send + Sync + 'static>,
    pub match_get_use_case: Box<dyn GetMatchUseCase + Send + Sync + 'static>,
    pub match_update_use_case: Box<dyn UpdateMatchUseCase + Send + Sync + 'static>,
    pub match_delete_use_case: Box<dyn DeleteMatchUseCase + Send + Sync + 'static>,

    pub availability_mark_use_case: Box<dyn MarkAvailabilityUseCase + Send + Sync + 'static>,
    pub availability_remove_use_case: Box<dyn RemoveAvailabilityUseCase + Send + Sync + 'static>,

    pub draft_generate_teams_use_case: Box<dyn GenerateTeamsUseCase + Send + Sync + 'static>,
    pub draft_select_player_use_case: Box<dyn SelectPlayerUseCase + Send + Sync + 'static>,
    pub draft_remove_player_use_case: Box<dyn RemovePlayerUseCase + Send + Sync + 'static>,
    pub draft_assign_captain_use_case: Box<dyn AssignCaptainUseCase + Send + Sync + 'static>,

    pub match_start_use_case: Box<dyn StartMatchUseCase + Send + Sync + 'static>,
    pub match_complete_use_case: Box<dyn CompleteMatchUseCase + Send + Sync + 'static>,
    pub match_cancel_use_case: Box<dyn CancelMatchUseCase + Send + Sync + 'static>,
    pub match_reopen_registration_use_case:
        Box<dyn ReopenRegistrationUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    S: MatchStore + 'static,
    P: PushNotificationPort + Send + Sync + 'static,
    R: RandomPort + Send + Sync + 'static,
>(
    store: Arc<S>,
    push_port: Arc<P>,
    random: Arc<R>,
) -> Application {
    let lock_service = Arc::new(MatchLockServiceImpl::new());

    Application {
        match_create_use_case: Box::new(CreateMatchUseCaseImpl::new(store.clone())),
        match_get_use_case: Box::new(GetMatchUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
        )),
        match_update_use_case: Box::new(UpdateMatchUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
        )),
        match_delete_use_case: Box::new(DeleteMatchUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
        )),

        availability_mark_use_case: Box::new(MarkAvailabilityUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
        )),
        availability_remove_use_case: Box::new(RemoveAvailabilityUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
        )),

        draft_generate_teams_use_case: Box::new(GenerateTeamsUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
            random.clone(),
        )),
        draft_select_player_use_case: Box::new(SelectPlayerUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
        )),
        draft_remove_player_use_case: Box::new(RemovePlayerUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
        )),
        draft_assign_captain_use_case: Box::new(AssignCaptainUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
        )),

        match_start_use_case: Box::new(StartMatchUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
        )),
        match_complete_use_case: Box::new(CompleteMatchUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
        )),
        match_cancel_use_case: Box::new(CancelMatchUseCaseImpl::new(
            store.clone(),
            lock_service.clone(),
            push_port.clone(),
        )),
        match_reopen_registration_use_case: Box::new(ReopenRegistrationUseCaseImpl::new(
            store,
            lock_service,
        )),
    }
}
