use std::collections::HashMap;

use matchday_server_app::domain::{
    MatchId, RepoError, RepoRetrieveError, TeamId, UserId,
    availability::{Availability, AvailabilityRepository, AvailabilityStatus},
    r#match::{Match, MatchRepository},
    team::{Team, TeamPlayer, TeamPlayerRepository, TeamRepository},
};
use parking_lot::RwLock;

/// Rows remember when they were first inserted so listings keep that order.
struct Row<T> {
    seq: u64,
    value: T,
}

#[derive(Default)]
struct StoreState {
    next_seq: u64,
    matches: HashMap<MatchId, Match>,
    availabilities: HashMap<(MatchId, UserId), Row<Availability>>,
    teams: HashMap<TeamId, Row<Team>>,
    team_players: HashMap<(TeamId, UserId), Row<TeamPlayer>>,
}

impl StoreState {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn remove_teams_of(&mut self, match_id: MatchId) -> usize {
        let team_ids: Vec<TeamId> = self
            .teams
            .values()
            .filter(|row| row.value.match_id == match_id)
            .map(|row| row.value.id)
            .collect();
        self.team_players
            .retain(|(team_id, _), _| !team_ids.contains(team_id));
        for team_id in &team_ids {
            self.teams.remove(team_id);
        }
        team_ids.len()
    }
}

fn ordered<T: Clone>(mut rows: Vec<&Row<T>>) -> Vec<T> {
    rows.sort_by_key(|row| row.seq);
    rows.into_iter().map(|row| row.value.clone()).collect()
}

/// Keeps every match, team, team player and availability in process memory.
#[derive(Default)]
pub struct InMemoryMatchStore {
    state: RwLock<StoreState>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }
}

#[async_trait::async_trait]
impl MatchRepository for InMemoryMatchStore {
    async fn get_match(&self, match_id: MatchId) -> Result<Match, RepoRetrieveError> {
        self.state
            .read()
            .matches
            .get(&match_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn save_match(&self, r#match: &Match) -> Result<(), RepoError> {
        self.state
            .write()
            .matches
            .insert(r#match.id, r#match.clone());
        Ok(())
    }

    async fn delete_match(&self, match_id: MatchId) -> Result<(), RepoError> {
        let mut state = self.state.write();
        if state.matches.remove(&match_id).is_none() {
            return Ok(());
        }
        let teams = state.remove_teams_of(match_id);
        state
            .availabilities
            .retain(|(availability_match, _), _| *availability_match != match_id);
        log::debug!("Deleted match {} with {} teams", match_id, teams);
        Ok(())
    }
}

#[async_trait::async_trait]
impl AvailabilityRepository for InMemoryMatchStore {
    async fn find_availability(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<Option<Availability>, RepoError> {
        Ok(self
            .state
            .read()
            .availabilities
            .get(&(match_id, user_id))
            .map(|row| row.value.clone()))
    }

    async fn find_available_players(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<Availability>, RepoError> {
        let state = self.state.read();
        Ok(ordered(
            state
                .availabilities
                .values()
                .filter(|row| {
                    row.value.match_id == match_id
                        && row.value.status == AvailabilityStatus::Available
                })
                .collect(),
        ))
    }

    async fn find_availabilities_by_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<Availability>, RepoError> {
        let state = self.state.read();
        Ok(ordered(
            state
                .availabilities
                .values()
                .filter(|row| row.value.match_id == match_id)
                .collect(),
        ))
    }

    async fn save_availability(&self, availability: &Availability) -> Result<(), RepoError> {
        let mut state = self.state.write();
        if !state.matches.contains_key(&availability.match_id) {
            return Err(RepoError::StorageError(format!(
                "availability references unknown match {}",
                availability.match_id
            )));
        }
        let key = (availability.match_id, availability.user_id);
        let seq = match state.availabilities.get(&key) {
            Some(row) => row.seq,
            None => state.next_seq(),
        };
        state.availabilities.insert(
            key,
            Row {
                seq,
                value: availability.clone(),
            },
        );
        Ok(())
    }

    async fn delete_availability(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<(), RepoError> {
        self.state
            .write()
            .availabilities
            .remove(&(match_id, user_id));
        Ok(())
    }
}

#[async_trait::async_trait]
impl TeamRepository for InMemoryMatchStore {
    async fn get_team(&self, team_id: TeamId) -> Result<Team, RepoRetrieveError> {
        self.state
            .read()
            .teams
            .get(&team_id)
            .map(|row| row.value.clone())
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn find_teams_by_match(&self, match_id: MatchId) -> Result<Vec<Team>, RepoError> {
        let state = self.state.read();
        Ok(ordered(
            state
                .teams
                .values()
                .filter(|row| row.value.match_id == match_id)
                .collect(),
        ))
    }

    async fn find_team_by_name(
        &self,
        match_id: MatchId,
        name: &str,
    ) -> Result<Option<Team>, RepoError> {
        Ok(self
            .state
            .read()
            .teams
            .values()
            .find(|row| row.value.match_id == match_id && row.value.name == name)
            .map(|row| row.value.clone()))
    }

    async fn save_team(&self, team: &Team) -> Result<(), RepoError> {
        let mut state = self.state.write();
        if !state.matches.contains_key(&team.match_id) {
            return Err(RepoError::StorageError(format!(
                "team references unknown match {}",
                team.match_id
            )));
        }
        let seq = match state.teams.get(&team.id) {
            Some(row) => row.seq,
            None => state.next_seq(),
        };
        state.teams.insert(
            team.id,
            Row {
                seq,
                value: team.clone(),
            },
        );
        Ok(())
    }

    async fn delete_teams_by_match(&self, match_id: MatchId) -> Result<(), RepoError> {
        self.state.write().remove_teams_of(match_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl TeamPlayerRepository for InMemoryMatchStore {
    async fn find_team_player(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamPlayer>, RepoError> {
        Ok(self
            .state
            .read()
            .team_players
            .get(&(team_id, user_id))
            .map(|row| row.value.clone()))
    }

    async fn find_team_player_in_match(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<Option<TeamPlayer>, RepoError> {
        Ok(self
            .state
            .read()
            .team_players
            .values()
            .find(|row| row.value.match_id == match_id && row.value.user_id == user_id)
            .map(|row| row.value.clone()))
    }

    async fn find_team_players(&self, team_id: TeamId) -> Result<Vec<TeamPlayer>, RepoError> {
        let state = self.state.read();
        Ok(ordered(
            state
                .team_players
                .values()
                .filter(|row| row.value.team_id == team_id)
                .collect(),
        ))
    }

    async fn count_team_players(&self, team_id: TeamId) -> Result<usize, RepoError> {
        Ok(self
            .state
            .read()
            .team_players
            .keys()
            .filter(|(player_team, _)| *player_team == team_id)
            .count())
    }

    async fn find_team_captain(&self, team_id: TeamId) -> Result<Option<TeamPlayer>, RepoError> {
        Ok(self
            .state
            .read()
            .team_players
            .values()
            .find(|row| row.value.team_id == team_id && row.value.is_captain)
            .map(|row| row.value.clone()))
    }

    async fn save_team_player(&self, player: &TeamPlayer) -> Result<(), RepoError> {
        let mut state = self.state.write();
        if !state.teams.contains_key(&player.team_id) {
            return Err(RepoError::StorageError(format!(
                "team player references unknown team {}",
                player.team_id
            )));
        }
        let on_other_team = state.team_players.values().any(|row| {
            row.value.match_id == player.match_id
                && row.value.user_id == player.user_id
                && row.value.team_id != player.team_id
        });
        if on_other_team {
            return Err(RepoError::StorageError(format!(
                "user {} already belongs to a team of match {}",
                player.user_id, player.match_id
            )));
        }
        let key = (player.team_id, player.user_id);
        let seq = match state.team_players.get(&key) {
            Some(row) => row.seq,
            None => state.next_seq(),
        };
        state.team_players.insert(
            key,
            Row {
                seq,
                value: player.clone(),
            },
        );
        Ok(())
    }

    async fn delete_team_player(&self, team_id: TeamId, user_id: UserId) -> Result<(), RepoError> {
        self.state.write().team_players.remove(&(team_id, user_id));
        Ok(())
    }

    async fn delete_team_players(&self, team_id: TeamId) -> Result<(), RepoError> {
        self.state
            .write()
            .team_players
            .retain(|(player_team, _), _| *player_team != team_id);
        Ok(())
    }
}
