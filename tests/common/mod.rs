#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use chrono::{Duration, Utc};
use matchday_persistence_memory::InMemoryMatchStore;
use matchday_server_app::{
    Application, build_application,
    domain::{
        CommunityId, MatchId, RepoError, RepoRetrieveError, TeamId, UserId,
        actor::{Actor, ActorRole},
        availability::{Availability, AvailabilityRepository},
        r#match::{Match, MatchRepository},
        team::{Team, TeamPlayer, TeamPlayerRepository, TeamRepository},
    },
    ports::{
        notification::{NotificationError, NotificationKind, PushNotification, PushNotificationPort},
        random::SeededRandom,
    },
    workflow::match_event::{MatchView, create::NewMatch},
};
use parking_lot::Mutex;

#[derive(Default)]
pub struct RecordingPush {
    sent: Mutex<Vec<(UserId, PushNotification)>>,
}

impl RecordingPush {
    pub fn recipients_of(&self, kind: NotificationKind) -> Vec<UserId> {
        self.sent
            .lock()
            .iter()
            .filter(|(_, notification)| notification.kind == kind)
            .map(|(user_id, _)| *user_id)
            .collect()
    }
}

#[async_trait::async_trait]
impl PushNotificationPort for RecordingPush {
    async fn notify_user(
        &self,
        user_id: UserId,
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        self.sent.lock().push((user_id, notification.clone()));
        Ok(())
    }
}

pub struct FailingPush;

#[async_trait::async_trait]
impl PushNotificationPort for FailingPush {
    async fn notify_user(
        &self,
        _user_id: UserId,
        _notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected(503))
    }
}

/// Takes its time delivering, like a push gateway close to its timeout.
pub struct SlowPush(pub std::time::Duration);

#[async_trait::async_trait]
impl PushNotificationPort for SlowPush {
    async fn notify_user(
        &self,
        _user_id: UserId,
        _notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

pub struct Harness {
    pub app: Application,
    pub store: Arc<InMemoryMatchStore>,
    pub community_id: CommunityId,
    pub manager: Actor,
}

impl Harness {
    pub fn with_push<P: PushNotificationPort + Send + Sync + 'static>(push: Arc<P>) -> Self {
        let store = Arc::new(InMemoryMatchStore::new());
        let community_id = CommunityId::new();
        let manager = Actor::new(UserId::new()).with_role(ActorRole::CommunityManager(community_id));
        let app = build_application(store.clone(), push, Arc::new(SeededRandom::new(2024)));
        Self {
            app,
            store,
            community_id,
            manager,
        }
    }

    pub fn new() -> (Self, Arc<RecordingPush>) {
        let push = Arc::new(RecordingPush::default());
        (Self::with_push(push.clone()), push)
    }

    pub fn new_match(&self, players_per_team: u32, is_auto_selection: bool) -> NewMatch {
        let now = Utc::now();
        NewMatch {
            community_id: self.community_id,
            title: "Thursday Night Football".to_string(),
            description: "Astro pitch behind the leisure centre".to_string(),
            match_date: now + Duration::days(3),
            registration_deadline: now + Duration::days(2),
            players_per_team,
            is_auto_selection,
        }
    }

    pub async fn create_match(&self, players_per_team: u32, is_auto_selection: bool) -> Match {
        self.app
            .match_create_use_case
            .create_match(
                &self.manager,
                self.new_match(players_per_team, is_auto_selection),
            )
            .await
            .unwrap()
    }

    /// Creates `count` users and marks each of them available.
    pub async fn add_players(&self, match_id: MatchId, count: usize) -> Vec<UserId> {
        let mut users = Vec::with_capacity(count);
        for _ in 0..count {
            let user_id = UserId::new();
            self.app
                .availability_mark_use_case
                .mark_availability(&Actor::new(user_id), match_id, true)
                .await
                .unwrap();
            users.push(user_id);
        }
        users
    }

    pub async fn view(&self, match_id: MatchId) -> MatchView {
        self.app
            .match_get_use_case
            .get_match(&self.manager, match_id)
            .await
            .unwrap()
    }
}

/// Wraps the in-memory store; listing a match's availabilities fails while
/// `fail_listings` is set.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryMatchStore,
    pub fail_listings: AtomicBool,
}

#[async_trait::async_trait]
impl MatchRepository for FlakyStore {
    async fn get_match(&self, match_id: MatchId) -> Result<Match, RepoRetrieveError> {
        self.inner.get_match(match_id).await
    }
    async fn save_match(&self, r#match: &Match) -> Result<(), RepoError> {
        self.inner.save_match(r#match).await
    }
    async fn delete_match(&self, match_id: MatchId) -> Result<(), RepoError> {
        self.inner.delete_match(match_id).await
    }
}

#[async_trait::async_trait]
impl AvailabilityRepository for FlakyStore {
    async fn find_availability(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<Option<Availability>, RepoError> {
        self.inner.find_availability(match_id, user_id).await
    }
    async fn find_available_players(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<Availability>, RepoError> {
        self.inner.find_available_players(match_id).await
    }
    async fn find_availabilities_by_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<Availability>, RepoError> {
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(RepoError::StorageError("connection reset".to_string()));
        }
        self.inner.find_availabilities_by_match(match_id).await
    }
    async fn save_availability(&self, availability: &Availability) -> Result<(), RepoError> {
        self.inner.save_availability(availability).await
    }
    async fn delete_availability(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<(), RepoError> {
        self.inner.delete_availability(match_id, user_id).await
    }
}

#[async_trait::async_trait]
impl TeamRepository for FlakyStore {
    async fn get_team(&self, team_id: TeamId) -> Result<Team, RepoRetrieveError> {
        self.inner.get_team(team_id).await
    }
    async fn find_teams_by_match(&self, match_id: MatchId) -> Result<Vec<Team>, RepoError> {
        self.inner.find_teams_by_match(match_id).await
    }
    async fn find_team_by_name(
        &self,
        match_id: MatchId,
        name: &str,
    ) -> Result<Option<Team>, RepoError> {
        self.inner.find_team_by_name(match_id, name).await
    }
    async fn save_team(&self, team: &Team) -> Result<(), RepoError> {
        self.inner.save_team(team).await
    }
    async fn delete_teams_by_match(&self, match_id: MatchId) -> Result<(), RepoError> {
        self.inner.delete_teams_by_match(match_id).await
    }
}

#[async_trait::async_trait]
impl TeamPlayerRepository for FlakyStore {
    async fn find_team_player(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamPlayer>, RepoError> {
        self.inner.find_team_player(team_id, user_id).await
    }
    async fn find_team_player_in_match(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<Option<TeamPlayer>, RepoError> {
        self.inner.find_team_player_in_match(match_id, user_id).await
    }
    async fn find_team_players(&self, team_id: TeamId) -> Result<Vec<TeamPlayer>, RepoError> {
        self.inner.find_team_players(team_id).await
    }
    async fn count_team_players(&self, team_id: TeamId) -> Result<usize, RepoError> {
        self.inner.count_team_players(team_id).await
    }
    async fn find_team_captain(&self, team_id: TeamId) -> Result<Option<TeamPlayer>, RepoError> {
        self.inner.find_team_captain(team_id).await
    }
    async fn save_team_player(&self, player: &TeamPlayer) -> Result<(), RepoError> {
        self.inner.save_team_player(player).await
    }
    async fn delete_team_player(&self, team_id: TeamId, user_id: UserId) -> Result<(), RepoError> {
        self.inner.delete_team_player(team_id, user_id).await
    }
    async fn delete_team_players(&self, team_id: TeamId) -> Result<(), RepoError> {
        self.inner.delete_team_players(team_id).await
    }
}
