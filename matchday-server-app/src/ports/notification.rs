use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{MatchId, TeamId, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    PlayerSelected,
    PlayerRemoved,
    CaptainAssigned,
    TeamsGenerated,
    MatchStarted,
    MatchCompleted,
    MatchCancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PlayerSelected => "PLAYER_SELECTED",
            NotificationKind::PlayerRemoved => "PLAYER_REMOVED",
            NotificationKind::CaptainAssigned => "CAPTAIN_ASSIGNED",
            NotificationKind::TeamsGenerated => "TEAMS_GENERATED",
            NotificationKind::MatchStarted => "MATCH_STARTED",
            NotificationKind::MatchCompleted => "MATCH_COMPLETED",
            NotificationKind::MatchCancelled => "MATCH_CANCELLED",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PushNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
}

impl PushNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        let mut data = BTreeMap::new();
        data.insert("type".to_string(), kind.as_str().to_string());
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            data,
        }
    }

    pub fn with_match(mut self, match_id: MatchId, title: &str) -> Self {
        self.data.insert("matchId".to_string(), match_id.to_string());
        self.data.insert("matchTitle".to_string(), title.to_string());
        self
    }

    pub fn with_team(mut self, team_id: TeamId, name: &str) -> Self {
        self.data.insert("teamId".to_string(), team_id.to_string());
        self.data.insert("teamName".to_string(), name.to_string());
        self
    }
}

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("push delivery failed: {0}")]
    Delivery(String),
    #[error("push endpoint rejected notification with status {0}")]
    Rejected(u16),
}

#[async_trait::async_trait]
pub trait PushNotificationPort {
    async fn notify_user(
        &self,
        user_id: UserId,
        notification: &PushNotification,
    ) -> Result<(), NotificationError>;

    async fn notify_users(
        &self,
        user_ids: &[UserId],
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        let sends = user_ids
            .iter()
            .map(|user_id| self.notify_user(*user_id, notification));
        let results = futures::future::join_all(sends).await;
        // every user gets a delivery attempt; the last failure is reported
        results.into_iter().filter_map(Result::err).last().map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FlakyPush {
        refused: UserId,
        delivered: Mutex<Vec<UserId>>,
    }

    #[async_trait::async_trait]
    impl PushNotificationPort for FlakyPush {
        async fn notify_user(
            &self,
            user_id: UserId,
            _notification: &PushNotification,
        ) -> Result<(), NotificationError> {
            if user_id == self.refused {
                return Err(NotificationError::Rejected(410));
            }
            self.delivered.lock().unwrap().push(user_id);
            Ok(())
        }
    }

    #[test]
    fn test_match_and_team_data_keys() {
        let match_id = MatchId::new();
        let team_id = TeamId::new();
        let notification = PushNotification::new(NotificationKind::PlayerSelected, "t", "b")
            .with_match(match_id, "Sunday League")
            .with_team(team_id, "Team A");

        assert_eq!(notification.data["type"], "PLAYER_SELECTED");
        assert_eq!(notification.data["matchId"], match_id.to_string());
        assert_eq!(notification.data["matchTitle"], "Sunday League");
        assert_eq!(notification.data["teamId"], team_id.to_string());
        assert_eq!(notification.data["teamName"], "Team A");
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_rest() {
        let refused = UserId::new();
        let others = [UserId::new(), UserId::new()];
        let push = FlakyPush {
            refused,
            delivered: Mutex::new(Vec::new()),
        };
        let notification = PushNotification::new(NotificationKind::MatchStarted, "t", "b");

        let result = push
            .notify_users(&[others[0], refused, others[1]], &notification)
            .await;
        assert!(matches!(result, Err(NotificationError::Rejected(410))));
        assert_eq!(*push.delivered.lock().unwrap(), others.to_vec());
    }
}
