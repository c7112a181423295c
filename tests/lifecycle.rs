mod common;

use std::{
    collections::HashSet,
    sync::{Arc, atomic::Ordering},
};

use chrono::{Duration, Utc};
use common::{FlakyStore, Harness, RecordingPush};
use matchday_server_app::{
    build_application,
    domain::{
        CommunityId, UserId,
        actor::{Actor, ActorRole},
        availability::AvailabilityStatus,
        error::MatchError,
        r#match::{MatchRepository, MatchStatus},
    },
    ports::{notification::NotificationKind, random::SeededRandom},
    workflow::match_event::update::MatchUpdate,
};

fn no_changes() -> MatchUpdate {
    MatchUpdate {
        title: None,
        description: None,
        match_date: None,
        registration_deadline: None,
        players_per_team: None,
        is_auto_selection: None,
    }
}

#[tokio::test]
async fn start_and_complete_follow_the_lifecycle() {
    let (harness, push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    assert_eq!(r#match.status, MatchStatus::Upcoming);

    let start = &harness.app.match_start_use_case;
    assert!(matches!(
        start.start_match(&harness.manager, r#match.id).await,
        Err(MatchError::InvalidState(..))
    ));

    let players = harness.add_players(r#match.id, 4).await;
    assert_eq!(
        harness.view(r#match.id).await.status(),
        MatchStatus::RegistrationOpen
    );
    assert!(matches!(
        harness
            .app
            .match_complete_use_case
            .complete_match(&harness.manager, r#match.id)
            .await,
        Err(MatchError::InvalidState(..))
    ));

    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();
    let started = start.start_match(&harness.manager, r#match.id).await.unwrap();
    assert_eq!(started.status, MatchStatus::InProgress);

    // availability is frozen once the match runs
    let result = harness
        .app
        .availability_mark_use_case
        .mark_availability(&Actor::new(UserId::new()), r#match.id, true)
        .await;
    assert!(matches!(result, Err(MatchError::InvalidState(..))));

    let completed = harness
        .app
        .match_complete_use_case
        .complete_match(&harness.manager, r#match.id)
        .await
        .unwrap();
    assert_eq!(completed.status, MatchStatus::Completed);

    let started_recipients: HashSet<UserId> = push
        .recipients_of(NotificationKind::MatchStarted)
        .into_iter()
        .collect();
    assert_eq!(started_recipients, players.iter().copied().collect());
    assert_eq!(push.recipients_of(NotificationKind::MatchCompleted).len(), 4);
}

#[tokio::test]
async fn start_rejected_while_manual_draft_runs() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, false).await;
    harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    let result = harness
        .app
        .match_start_use_case
        .start_match(&harness.manager, r#match.id)
        .await;
    assert!(matches!(result, Err(MatchError::InvalidState(..))));
}

#[tokio::test]
async fn cancel_notifies_everyone_who_responded() {
    let (harness, push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    let mut responders = harness.add_players(r#match.id, 3).await;
    let absent = UserId::new();
    harness
        .app
        .availability_mark_use_case
        .mark_availability(&Actor::new(absent), r#match.id, false)
        .await
        .unwrap();
    responders.push(absent);

    let cancelled = harness
        .app
        .match_cancel_use_case
        .cancel_match(&harness.manager, r#match.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, MatchStatus::Cancelled);

    let recipients: HashSet<UserId> = push
        .recipients_of(NotificationKind::MatchCancelled)
        .into_iter()
        .collect();
    assert_eq!(recipients, responders.into_iter().collect());

    let result = harness
        .app
        .availability_mark_use_case
        .mark_availability(&Actor::new(UserId::new()), r#match.id, true)
        .await;
    assert!(matches!(result, Err(MatchError::InvalidState(..))));
}

#[tokio::test]
async fn in_progress_match_cannot_be_cancelled_deleted_or_updated() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();
    harness
        .app
        .match_start_use_case
        .start_match(&harness.manager, r#match.id)
        .await
        .unwrap();

    assert!(matches!(
        harness
            .app
            .match_cancel_use_case
            .cancel_match(&harness.manager, r#match.id)
            .await,
        Err(MatchError::InvalidState(..))
    ));
    assert!(matches!(
        harness
            .app
            .match_delete_use_case
            .delete_match(&harness.manager, r#match.id)
            .await,
        Err(MatchError::InvalidState(..))
    ));
    let update = MatchUpdate {
        title: Some("Moved indoors".to_string()),
        ..no_changes()
    };
    assert!(matches!(
        harness
            .app
            .match_update_use_case
            .update_match(&harness.manager, r#match.id, update)
            .await,
        Err(MatchError::InvalidState(..))
    ));
}

#[tokio::test]
async fn delete_removes_match_and_roster() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    harness
        .app
        .match_delete_use_case
        .delete_match(&harness.manager, r#match.id)
        .await
        .unwrap();

    let result = harness
        .app
        .match_get_use_case
        .get_match(&harness.manager, r#match.id)
        .await;
    assert!(matches!(result, Err(MatchError::NotFound(..))));
}

#[tokio::test]
async fn managers_are_scoped_to_their_community() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    harness.add_players(r#match.id, 4).await;

    let outsider = Actor::new(UserId::new()).with_role(ActorRole::CommunityManager(CommunityId::new()));
    let result = harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&outsider, r#match.id)
        .await;
    assert!(matches!(result, Err(MatchError::Forbidden(..))));

    let result = harness
        .app
        .match_create_use_case
        .create_match(&outsider, harness.new_match(2, true))
        .await;
    assert!(matches!(result, Err(MatchError::Forbidden(..))));

    let admin = Actor::new(UserId::new()).with_role(ActorRole::Admin);
    let generated = harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&admin, r#match.id)
        .await
        .unwrap();
    assert_eq!(generated.status, MatchStatus::TeamsSelected);
}

#[tokio::test]
async fn create_and_update_validate_dates() {
    let (harness, _push) = Harness::new();

    let mut new_match = harness.new_match(5, true);
    new_match.match_date = new_match.registration_deadline - Duration::hours(1);
    let result = harness
        .app
        .match_create_use_case
        .create_match(&harness.manager, new_match)
        .await;
    assert!(matches!(result, Err(MatchError::InvalidInput(..))));

    let r#match = harness.create_match(5, true).await;
    let update = MatchUpdate {
        registration_deadline: Some(r#match.match_date + Duration::hours(1)),
        ..no_changes()
    };
    let result = harness
        .app
        .match_update_use_case
        .update_match(&harness.manager, r#match.id, update)
        .await;
    assert!(matches!(result, Err(MatchError::InvalidInput(..))));

    let update = MatchUpdate {
        title: Some("Friday Night Football".to_string()),
        match_date: Some(Utc::now() + Duration::days(5)),
        ..no_changes()
    };
    let updated = harness
        .app
        .match_update_use_case
        .update_match(&harness.manager, r#match.id, update)
        .await
        .unwrap();
    assert_eq!(updated.title, "Friday Night Football");
}

#[tokio::test]
async fn team_shape_is_fixed_once_teams_exist() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    let update = MatchUpdate {
        players_per_team: Some(3),
        ..no_changes()
    };
    let result = harness
        .app
        .match_update_use_case
        .update_match(&harness.manager, r#match.id, update)
        .await;
    assert!(matches!(result, Err(MatchError::InvalidState(..))));
}

#[tokio::test]
async fn availability_is_locked_while_on_a_team() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    let players = harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    let player = Actor::new(players[0]);
    assert!(matches!(
        harness
            .app
            .availability_mark_use_case
            .mark_availability(&player, r#match.id, false)
            .await,
        Err(MatchError::Conflict(..))
    ));
    assert!(matches!(
        harness
            .app
            .availability_remove_use_case
            .remove_availability(&player, r#match.id)
            .await,
        Err(MatchError::Conflict(..))
    ));
    assert!(matches!(
        harness
            .app
            .availability_remove_use_case
            .remove_availability(&Actor::new(UserId::new()), r#match.id)
            .await,
        Err(MatchError::NotFound(..))
    ));
}

#[tokio::test]
async fn removed_player_returns_to_pool() {
    let (harness, push) = Harness::new();
    let r#match = harness.create_match(2, true).await;
    harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    let view = harness.view(r#match.id).await;
    let team = &view.teams[0];
    let player = team.players.iter().find(|p| !p.is_captain).unwrap().user_id;

    harness
        .app
        .draft_remove_player_use_case
        .remove_player(&harness.manager, r#match.id, team.id, player)
        .await
        .unwrap();

    let view = harness.view(r#match.id).await;
    assert_eq!(view.team(team.id).unwrap().players.len(), 1);
    assert_eq!(
        view.users_with_status(AvailabilityStatus::Available),
        vec![player]
    );
    assert_eq!(push.recipients_of(NotificationKind::PlayerRemoved), vec![player]);

    let result = harness
        .app
        .draft_remove_player_use_case
        .remove_player(&harness.manager, r#match.id, team.id, player)
        .await;
    assert!(matches!(result, Err(MatchError::NotFound(..))));
}

#[tokio::test]
async fn captain_cannot_be_removed_mid_draft() {
    let (harness, _push) = Harness::new();
    let r#match = harness.create_match(2, false).await;
    harness.add_players(r#match.id, 4).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    let view = harness.view(r#match.id).await;
    let team = &view.teams[0];
    let result = harness
        .app
        .draft_remove_player_use_case
        .remove_player(
            &harness.manager,
            r#match.id,
            team.id,
            team.captain.unwrap(),
        )
        .await;
    assert!(matches!(result, Err(MatchError::Conflict(..))));
}

#[tokio::test]
async fn assigning_a_captain_moves_the_armband() {
    let (harness, push) = Harness::new();
    let r#match = harness.create_match(3, true).await;
    harness.add_players(r#match.id, 6).await;
    harness
        .app
        .draft_generate_teams_use_case
        .generate_teams(&harness.manager, r#match.id)
        .await
        .unwrap();

    let view = harness.view(r#match.id).await;
    let team = &view.teams[0];
    let previous = team.captain.unwrap();
    let next = team.players.iter().find(|p| !p.is_captain).unwrap().user_id;

    let updated = harness
        .app
        .draft_assign_captain_use_case
        .assign_captain(&harness.manager, team.id, next)
        .await
        .unwrap();
    assert_eq!(updated.captain, Some(next));

    let view = harness.view(r#match.id).await;
    let team = view.team(team.id).unwrap();
    let captains: Vec<UserId> = team
        .players
        .iter()
        .filter(|p| p.is_captain)
        .map(|p| p.user_id)
        .collect();
    assert_eq!(captains, vec![next]);
    assert_ne!(next, previous);
    assert_eq!(push.recipients_of(NotificationKind::CaptainAssigned), vec![next]);

    let result = harness
        .app
        .draft_assign_captain_use_case
        .assign_captain(&harness.manager, team.id, UserId::new())
        .await;
    assert!(matches!(result, Err(MatchError::NotFound(..))));
}

#[tokio::test]
async fn failed_recipient_lookup_leaves_match_uncancelled() {
    let store = Arc::new(FlakyStore::default());
    let push = Arc::new(RecordingPush::default());
    let app = build_application(store.clone(), push.clone(), Arc::new(SeededRandom::new(9)));

    let template = Harness::new().0;
    let community = template.community_id;
    let manager = template.manager.clone();
    let r#match = app
        .match_create_use_case
        .create_match(&manager, template.new_match(2, true))
        .await
        .unwrap();
    app.availability_mark_use_case
        .mark_availability(&Actor::new(UserId::new()), r#match.id, true)
        .await
        .unwrap();

    store.fail_listings.store(true, Ordering::SeqCst);
    let result = app.match_cancel_use_case.cancel_match(&manager, r#match.id).await;
    assert!(matches!(result, Err(MatchError::Storage(..))));

    let stored = store.get_match(r#match.id).await.unwrap();
    assert_eq!(stored.status, MatchStatus::RegistrationOpen);
    assert_eq!(stored.community_id, community);
    assert!(push.recipients_of(NotificationKind::MatchCancelled).is_empty());

    store.fail_listings.store(false, Ordering::SeqCst);
    let cancelled = app
        .match_cancel_use_case
        .cancel_match(&manager, r#match.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, MatchStatus::Cancelled);
}
