//! Tests for dashboard notifications built from ranked recommendations.

use advisor_common::providers::FakeExpertDirectory;
use advisor_common::{
    action_url_for, EngineConfig, Expert, FixedClock, FixedMarketSignal, NotificationKind,
    RecommendationEngine, SmartNotificationEngine, UserProfile,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn notifier(config: EngineConfig, month: u32) -> SmartNotificationEngine {
    let now = Utc.with_ymd_and_hms(2026, month, 20, 15, 0, 0).unwrap();
    let experts = vec![Expert {
        id: "e1".to_string(),
        name: "Expert One".to_string(),
        industries: vec!["Finance".to_string()],
        rating: 4.9,
        available: true,
    }];
    SmartNotificationEngine::new(
        RecommendationEngine::builder()
            .experts(Arc::new(FakeExpertDirectory::returning(experts)))
            .market(Arc::new(FixedMarketSignal::favorable(0.9)))
            .clock(Arc::new(FixedClock(now)))
            .config(config)
            .build(),
    )
}

fn rich_profile() -> UserProfile {
    let mut profile = UserProfile::new("u-rich");
    profile.industry = Some("Finance".to_string());
    profile.company_size = Some("scale-up".to_string());
    profile.budget = Some(40000.0);
    profile
}

#[tokio::test]
async fn at_most_three_in_rank_order() {
    let notifier = notifier(EngineConfig::default(), 11);
    let profile = rich_profile();

    let notifications = notifier.generate_smart_notifications(&profile).await;
    let ranked = notifier
        .engine()
        .generate_all_recommendations(&profile, None)
        .await;

    assert_eq!(notifications.len(), 3);
    for (n, r) in notifications.iter().zip(ranked.iter()) {
        assert_eq!(n.title, r.title);
        assert_eq!(n.message, r.description);
        assert_eq!(n.priority, r.priority);
        assert_eq!(n.action_url, action_url_for(r.kind()));
        assert_eq!(n.kind, NotificationKind::Recommendation);
        assert_eq!(n.timestamp, Utc.with_ymd_and_hms(2026, 11, 20, 15, 0, 0).unwrap());
    }
}

#[tokio::test]
async fn action_urls_match_table() {
    let notifications = notifier(EngineConfig::default(), 11)
        .generate_smart_notifications(&rich_profile())
        .await;
    let allowed = [
        "/dashboard/book-consultation",
        "/services",
        "/resources",
        "/dashboard/strategy",
        "/dashboard",
    ];
    assert!(notifications
        .iter()
        .all(|n| allowed.contains(&n.action_url.as_str())));
    // Top three for this profile: market timing (0.90), risk (0.87), expert match (0.85)
    assert_eq!(notifications[0].action_url, "/dashboard");
    assert_eq!(notifications[1].action_url, "/dashboard/strategy");
    assert_eq!(notifications[2].action_url, "/dashboard/book-consultation");
}

#[tokio::test]
async fn limit_is_configurable_but_capped() {
    let one = EngineConfig {
        notification_limit: 1,
        ..EngineConfig::default()
    };
    let n = notifier(one, 3).generate_smart_notifications(&rich_profile()).await;
    assert_eq!(n.len(), 1);

    let many = EngineConfig {
        notification_limit: 50,
        ..EngineConfig::default()
    };
    let n = notifier(many, 3).generate_smart_notifications(&rich_profile()).await;
    assert_eq!(n.len(), 3);
}

#[tokio::test]
async fn notification_ids_are_unique() {
    let n = notifier(EngineConfig::default(), 3)
        .generate_smart_notifications(&UserProfile::new("sparse"))
        .await;
    assert_eq!(n.len(), 3);
    assert_ne!(n[0].id, n[1].id);
    assert_ne!(n[1].id, n[2].id);
}
