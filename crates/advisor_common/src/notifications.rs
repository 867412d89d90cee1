//! Dashboard notifications built from the top-ranked recommendations.

use crate::config::MAX_NOTIFICATIONS;
use crate::engine::RecommendationEngine;
use crate::profile::UserProfile;
use crate::types::{Priority, Recommendation, RecommendationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub priority: Priority,
    pub action_url: String,
    pub timestamp: DateTime<Utc>,
}

/// Dashboard route for a recommendation type
pub fn action_url_for(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Expert => "/dashboard/book-consultation",
        RecommendationKind::Service => "/services",
        RecommendationKind::Content => "/resources",
        RecommendationKind::Strategy => "/dashboard/strategy",
        _ => "/dashboard",
    }
}

impl SmartNotification {
    pub fn from_recommendation(rec: &Recommendation, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: rec.title.clone(),
            message: rec.description.clone(),
            kind: NotificationKind::Recommendation,
            priority: rec.priority,
            action_url: action_url_for(rec.kind()).to_string(),
            timestamp,
        }
    }
}

pub struct SmartNotificationEngine {
    engine: RecommendationEngine,
}

impl SmartNotificationEngine {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// At most `notification_limit` (never above 3) notifications, in rank order
    pub async fn generate_smart_notifications(&self, profile: &UserProfile) -> Vec<SmartNotification> {
        let limit = self
            .engine
            .config()
            .notification_limit
            .min(MAX_NOTIFICATIONS);
        let now = self.engine.clock().now();
        let recs = self.engine.generate_all_at(profile, None, now).await;

        let notifications: Vec<SmartNotification> = recs
            .iter()
            .take(limit)
            .map(|r| SmartNotification::from_recommendation(r, now))
            .collect();

        debug!(
            profile = %profile.id,
            available = recs.len(),
            sent = notifications.len(),
            "smart notifications"
        );
        notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_url_table() {
        assert_eq!(action_url_for(RecommendationKind::Expert), "/dashboard/book-consultation");
        assert_eq!(action_url_for(RecommendationKind::Service), "/services");
        assert_eq!(action_url_for(RecommendationKind::Content), "/resources");
        assert_eq!(action_url_for(RecommendationKind::Strategy), "/dashboard/strategy");
        assert_eq!(action_url_for(RecommendationKind::Timing), "/dashboard");
    }

    #[test]
    fn notification_serializes_type_field() {
        let n = SmartNotification {
            id: "n1".to_string(),
            title: "t".to_string(),
            message: "m".to_string(),
            kind: NotificationKind::Recommendation,
            priority: Priority::High,
            action_url: "/services".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "recommendation");
        assert_eq!(json["priority"], "high");
    }
}
