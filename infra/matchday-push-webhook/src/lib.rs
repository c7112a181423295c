use std::{collections::BTreeMap, time::Duration};

use matchday_server_app::{
    domain::UserId,
    ports::notification::{NotificationError, PushNotification, PushNotificationPort},
};
use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    user_ids: Vec<String>,
    title: &'a str,
    body: &'a str,
    data: &'a BTreeMap<String, String>,
}

impl<'a> WebhookPayload<'a> {
    fn new(user_ids: &[UserId], notification: &'a PushNotification) -> Self {
        Self {
            user_ids: user_ids.iter().map(|id| id.to_string()).collect(),
            title: &notification.title,
            body: &notification.body,
            data: &notification.data,
        }
    }
}

/// Hands notifications to an external push gateway as JSON over HTTP.
pub struct WebhookPushAdapter {
    client: reqwest::Client,
    url: String,
}

impl WebhookPushAdapter {
    pub fn new(url: impl Into<String>) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn post(
        &self,
        user_ids: &[UserId],
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload::new(user_ids, notification))
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;
        if !response.status().is_success() {
            return Err(NotificationError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PushNotificationPort for WebhookPushAdapter {
    async fn notify_user(
        &self,
        user_id: UserId,
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        self.post(&[user_id], notification).await
    }

    async fn notify_users(
        &self,
        user_ids: &[UserId],
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        self.post(user_ids, notification).await
    }
}

/// Used when no push gateway is configured.
pub struct LogPushAdapter;

#[async_trait::async_trait]
impl PushNotificationPort for LogPushAdapter {
    async fn notify_user(
        &self,
        user_id: UserId,
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        log::info!(
            "Push to {}: {} ({})",
            user_id,
            notification.title,
            notification.kind.as_str()
        );
        Ok(())
    }
}

pub enum PushAdapter {
    Webhook(WebhookPushAdapter),
    Log(LogPushAdapter),
}

impl PushAdapter {
    pub fn from_url(url: Option<&str>) -> Result<Self, NotificationError> {
        match url {
            Some(url) => Ok(PushAdapter::Webhook(WebhookPushAdapter::new(url)?)),
            None => Ok(PushAdapter::Log(LogPushAdapter)),
        }
    }
}

#[async_trait::async_trait]
impl PushNotificationPort for PushAdapter {
    async fn notify_user(
        &self,
        user_id: UserId,
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        match self {
            PushAdapter::Webhook(adapter) => adapter.notify_user(user_id, notification).await,
            PushAdapter::Log(adapter) => adapter.notify_user(user_id, notification).await,
        }
    }

    async fn notify_users(
        &self,
        user_ids: &[UserId],
        notification: &PushNotification,
    ) -> Result<(), NotificationError> {
        match self {
            PushAdapter::Webhook(adapter) => adapter.notify_users(user_ids, notification).await,
            PushAdapter::Log(adapter) => adapter.notify_users(user_ids, notification).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use matchday_server_app::{
        domain::{MatchId, TeamId},
        ports::notification::NotificationKind,
    };

    use super::*;

    #[test]
    fn test_payload_shape() {
        let match_id = MatchId::new();
        let team_id = TeamId::new();
        let user = UserId::new();
        let notification = PushNotification::new(
            NotificationKind::PlayerSelected,
            "You've Been Selected!",
            "You have been selected for Team A in Friday kickabout",
        )
        .with_match(match_id, "Friday kickabout")
        .with_team(team_id, "Team A");

        let value = serde_json::to_value(WebhookPayload::new(&[user], &notification)).unwrap();
        assert_eq!(value["userIds"][0], user.to_string());
        assert_eq!(value["title"], "You've Been Selected!");
        assert_eq!(value["data"]["type"], "PLAYER_SELECTED");
        assert_eq!(value["data"]["matchId"], match_id.to_string());
        assert_eq!(value["data"]["teamId"], team_id.to_string());
        assert_eq!(value["data"]["teamName"], "Team A");
    }

    #[tokio::test]
    async fn test_unreachable_webhook_reports_delivery_error() {
        let adapter = PushAdapter::from_url(Some("http://127.0.0.1:9/push")).unwrap();
        let notification =
            PushNotification::new(NotificationKind::MatchStarted, "Match Started!", "kick-off");
        let result = adapter.notify_user(UserId::new(), &notification).await;
        assert!(matches!(result, Err(NotificationError::Delivery(..))));
    }

    #[tokio::test]
    async fn test_log_adapter_always_succeeds() {
        let adapter = PushAdapter::from_url(None).unwrap();
        let notification =
            PushNotification::new(NotificationKind::MatchCancelled, "Match Cancelled", "rain");
        assert!(
            adapter
                .notify_users(&[UserId::new(), UserId::new()], &notification)
                .await
                .is_ok()
        );
    }
}
