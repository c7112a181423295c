use std::collections::BTreeSet;

use crate::{
    domain::{
        MatchId, MatchStore, TeamId, UserId,
        error::{MatchError, MatchResult},
        r#match::Match,
        team::Team,
    },
    ports::notification::{PushNotification, PushNotificationPort},
};

pub mod availability;
pub mod draft;
pub mod lifecycle;
pub mod match_event;

pub(crate) async fn load_match<S: MatchStore + ?Sized>(
    store: &S,
    match_id: MatchId,
) -> MatchResult<Match> {
    store
        .get_match(match_id)
        .await
        .map_err(|e| MatchError::from_retrieve(e, "Match not found"))
}

pub(crate) async fn load_team<S: MatchStore + ?Sized>(
    store: &S,
    team_id: TeamId,
) -> MatchResult<Team> {
    store
        .get_team(team_id)
        .await
        .map_err(|e| MatchError::from_retrieve(e, "Team not found"))
}

/// Every user on any team of the match, reserve included.
pub(crate) async fn team_members<S: MatchStore + ?Sized>(
    store: &S,
    match_id: MatchId,
) -> MatchResult<Vec<UserId>> {
    let mut members = Vec::new();
    for team in store.find_teams_by_match(match_id).await? {
        for player in store.find_team_players(team.id).await? {
            members.push(player.user_id);
        }
    }
    Ok(members)
}

/// Push delivery never decides the outcome of an operation.
pub(crate) async fn notify_best_effort<P: PushNotificationPort + Send + Sync + ?Sized>(
    push: &P,
    user_ids: &[UserId],
    notification: PushNotification,
) {
    let recipients: Vec<UserId> = user_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if recipients.is_empty() {
        return;
    }
    if let Err(e) = push.notify_users(&recipients, &notification).await {
        log::warn!(
            "Failed to deliver {} notification to {} users: {}",
            notification.kind.as_str(),
            recipients.len(),
            e
        );
    }
}
