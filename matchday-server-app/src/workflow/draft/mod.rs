use std::collections::HashMap;

use crate::domain::{
    MatchStore, TeamId, UserId,
    availability::AvailabilityStatus,
    draft::DraftAdvance,
    error::{MatchError, MatchResult},
    r#match::Match,
    team::{RESERVE_TEAM_NAME, Team, TeamPlayer, team_color},
};

pub mod assign_captain;
pub mod generate_teams;
pub mod remove_player;
pub mod select_player;

/// Hands the turn to the next team with room. When every team is full the
/// draft ends and the leftover available players go to the reserve team.
/// The caller persists `r#match`.
pub(crate) async fn advance_draft<S: MatchStore + ?Sized>(
    store: &S,
    r#match: &mut Match,
    just_picked: TeamId,
) -> MatchResult<DraftAdvance> {
    let mut roster_sizes = HashMap::new();
    for team_id in &r#match.draft.order {
        roster_sizes.insert(*team_id, store.count_team_players(*team_id).await?);
    }

    // a team missing from the store cannot take a pick
    let outcome = r#match.advance_draft(just_picked, |team_id| {
        roster_sizes.get(&team_id).copied().unwrap_or(usize::MAX)
    });

    match outcome {
        DraftAdvance::NextPicker(team_id) => {
            log::debug!("Match {}: team {} picks next", r#match.id, team_id);
        }
        DraftAdvance::Completed => {
            let reserve = assign_reserve_team(store, r#match).await?;
            log::info!(
                "Match {}: draft completed, {} players in reserve",
                r#match.id,
                reserve.map(|(_, players)| players.len()).unwrap_or(0)
            );
        }
        DraftAdvance::Reset => {
            log::warn!(
                "Match {}: draft order was unusable, draft state cleared",
                r#match.id
            );
        }
    }
    Ok(outcome)
}

/// Makes the reserve team hold its current members plus every player still
/// marked available. Returns the reserve team and its members, or `None` when
/// nobody is left over.
pub(crate) async fn assign_reserve_team<S: MatchStore + ?Sized>(
    store: &S,
    r#match: &Match,
) -> MatchResult<Option<(Team, Vec<UserId>)>> {
    let existing = store
        .find_team_by_name(r#match.id, RESERVE_TEAM_NAME)
        .await?;

    let mut members = Vec::new();
    if let Some(team) = &existing {
        for player in store.find_team_players(team.id).await? {
            members.push(player.user_id);
        }
    }
    let mut leftover = Vec::new();
    for availability in store.find_available_players(r#match.id).await? {
        if !members.contains(&availability.user_id) {
            members.push(availability.user_id);
            leftover.push(availability);
        }
    }

    if members.is_empty() {
        return Ok(None);
    }

    let team = match existing {
        Some(team) => team,
        None => {
            let regular_teams = store
                .find_teams_by_match(r#match.id)
                .await?
                .iter()
                .filter(|team| !team.is_reserve())
                .count();
            let team = Team::new(
                r#match.id,
                RESERVE_TEAM_NAME.to_string(),
                team_color(regular_teams),
            );
            store.save_team(&team).await?;
            team
        }
    };

    store.delete_team_players(team.id).await?;
    for user_id in &members {
        store
            .save_team_player(&TeamPlayer::reserve(&team, *user_id))
            .await?;
    }
    for mut availability in leftover {
        availability.set_status(AvailabilityStatus::Reserve);
        store.save_availability(&availability).await?;
    }

    Ok(Some((team, members)))
}

pub(crate) fn ensure_team_in_match(team: &Team, r#match: &Match) -> MatchResult<()> {
    if team.match_id != r#match.id {
        return MatchError::forbidden("Team does not belong to this match");
    }
    Ok(())
}
