use crate::{
    domain::{
        UserId,
        error::{MatchError, MatchResult},
        team::{RESERVE_TEAM_NAME, team_color, team_name},
    },
    ports::random::RandomPort,
};

/// A team as it will be created. The first player, when present, captains it.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedTeam {
    pub name: String,
    pub color: &'static str,
    pub players: Vec<UserId>,
}

impl PlannedTeam {
    fn new(index: usize, players: Vec<UserId>) -> Self {
        Self {
            name: team_name(index),
            color: team_color(index),
            players,
        }
    }

    pub fn captain(&self) -> Option<UserId> {
        self.players.first().copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AutoTeamPlan {
    pub teams: Vec<PlannedTeam>,
    pub reserve: Option<PlannedTeam>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ManualDraftPlan {
    /// Each team holds only its captain.
    pub teams: Vec<PlannedTeam>,
    pub undrafted: Vec<UserId>,
}

pub fn ensure_enough_players(available: usize, players_per_team: u32) -> MatchResult<()> {
    if players_per_team == 0 {
        return MatchError::invalid_state("Players per team must be at least 1");
    }
    let required = 2 * players_per_team as usize;
    if available < required {
        return Err(MatchError::InsufficientPlayers {
            available,
            required,
        });
    }
    Ok(())
}

pub fn plan_auto_teams<R: RandomPort + ?Sized>(
    mut players: Vec<UserId>,
    players_per_team: u32,
    random: &R,
) -> MatchResult<AutoTeamPlan> {
    ensure_enough_players(players.len(), players_per_team)?;
    random.shuffle_users(&mut players);

    let size = players_per_team as usize;
    let full_teams = players.len() / size;
    let leftover = players.split_off(full_teams * size);

    let teams = players
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| PlannedTeam::new(index, chunk.to_vec()))
        .collect();

    let reserve = (!leftover.is_empty()).then(|| PlannedTeam {
        name: RESERVE_TEAM_NAME.to_string(),
        color: team_color(full_teams),
        players: leftover,
    });

    Ok(AutoTeamPlan { teams, reserve })
}

pub fn plan_manual_draft<R: RandomPort + ?Sized>(
    mut pool: Vec<UserId>,
    players_per_team: u32,
    random: &R,
) -> MatchResult<ManualDraftPlan> {
    ensure_enough_players(pool.len(), players_per_team)?;

    let num_teams = pool.len() / players_per_team as usize;
    if num_teams < 2 {
        return MatchError::invalid_state("Manual drafting requires at least two teams");
    }

    let mut teams = Vec::with_capacity(num_teams);
    for index in 0..num_teams {
        let captain = pool.remove(random.choose_index(pool.len()));
        teams.push(PlannedTeam::new(index, vec![captain]));
    }

    Ok(ManualDraftPlan {
        teams,
        undrafted: pool,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::ports::random::SeededRandom;

    use super::*;

    fn users(n: usize) -> Vec<UserId> {
        (0..n).map(|_| UserId::new()).collect()
    }

    #[test]
    fn test_not_enough_players() {
        let random = SeededRandom::new(1);
        assert_eq!(
            plan_auto_teams(users(9), 5, &random),
            Err(MatchError::InsufficientPlayers {
                available: 9,
                required: 10
            })
        );
        assert!(matches!(
            plan_manual_draft(users(3), 2, &random),
            Err(MatchError::InsufficientPlayers { .. })
        ));
    }

    #[test]
    fn test_zero_team_size_rejected() {
        let random = SeededRandom::new(1);
        assert!(matches!(
            plan_auto_teams(users(4), 0, &random),
            Err(MatchError::InvalidState(..))
        ));
    }

    #[test]
    fn test_auto_twelve_players_teams_of_five() {
        let random = SeededRandom::new(7);
        let players = users(12);
        let plan = plan_auto_teams(players.clone(), 5, &random).unwrap();

        assert_eq!(plan.teams.len(), 2);
        assert!(plan.teams.iter().all(|t| t.players.len() == 5));
        assert_eq!(plan.teams[0].name, "Team A");
        assert_eq!(plan.teams[1].name, "Team B");
        assert_eq!(plan.teams[0].color, team_color(0));

        let reserve = plan.reserve.expect("two players left over");
        assert_eq!(reserve.name, RESERVE_TEAM_NAME);
        assert_eq!(reserve.players.len(), 2);
        assert_eq!(reserve.color, team_color(2));

        let assigned: HashSet<UserId> = plan
            .teams
            .iter()
            .chain(std::iter::once(&reserve))
            .flat_map(|t| t.players.iter().copied())
            .collect();
        assert_eq!(assigned, players.into_iter().collect());
    }

    #[test]
    fn test_auto_exact_fit_has_no_reserve() {
        let random = SeededRandom::new(3);
        let plan = plan_auto_teams(users(12), 4, &random).unwrap();
        assert_eq!(plan.teams.len(), 3);
        assert!(plan.reserve.is_none());
    }

    #[test]
    fn test_auto_counts_over_sizes() {
        let random = SeededRandom::new(11);
        for n in 2..30 {
            for k in 1..=(n / 2) as u32 {
                let plan = plan_auto_teams(users(n), k, &random).unwrap();
                assert_eq!(plan.teams.len(), n / k as usize);
                assert_eq!(plan.reserve.is_some(), n % k as usize > 0);
            }
        }
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let players = users(10);
        let a = plan_auto_teams(players.clone(), 5, &SeededRandom::new(42)).unwrap();
        let b = plan_auto_teams(players, 5, &SeededRandom::new(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_manual_seeds_one_captain_per_team() {
        let random = SeededRandom::new(5);
        let players = users(12);
        let plan = plan_manual_draft(players.clone(), 5, &random).unwrap();

        assert_eq!(plan.teams.len(), 2);
        assert!(plan.teams.iter().all(|t| t.players.len() == 1));
        assert_eq!(plan.undrafted.len(), 10);

        let mut all: Vec<UserId> = plan
            .teams
            .iter()
            .filter_map(|t| t.captain())
            .chain(plan.undrafted.iter().copied())
            .collect();
        all.sort();
        let mut expected = players;
        expected.sort();
        assert_eq!(all, expected);
    }
}
