//! Recommendation engine
//!
//! Maps a client profile to a ranked list of expert, service, content, timing
//! and strategy recommendations. Every rule is a fixed lookup; no operation
//! fails. A provider that errors or times out only drops the recommendation
//! that depended on it.

use crate::catalog;
use crate::config::EngineConfig;
use crate::error::ProviderError;
use crate::profile::UserProfile;
use crate::providers::{
    Clock, ExpertDirectory, MarketSignal, SimulatedExpertDirectory, SimulatedMarketSignal,
    SystemClock,
};
use crate::types::{
    Priority, Recommendation, RecommendationMetadata, ServiceBasis, TimingWindow,
};
use chrono::{DateTime, Datelike, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Order by priority rank descending, then confidence descending.
/// Stable: equal keys keep generation order.
pub fn sort_recommendations(recs: &mut [Recommendation]) {
    recs.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `<prefix>-<millis>`; one instant is read per batch and passed down
fn stamp_id(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", prefix, now.timestamp_millis())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

pub struct RecommendationEngine {
    experts: Arc<dyn ExpertDirectory>,
    market: Arc<dyn MarketSignal>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

/// Injects providers; anything left unset gets the simulated default
#[derive(Default)]
pub struct RecommendationEngineBuilder {
    experts: Option<Arc<dyn ExpertDirectory>>,
    market: Option<Arc<dyn MarketSignal>>,
    clock: Option<Arc<dyn Clock>>,
    config: Option<EngineConfig>,
}

impl RecommendationEngineBuilder {
    pub fn experts(mut self, experts: Arc<dyn ExpertDirectory>) -> Self {
        self.experts = Some(experts);
        self
    }

    pub fn market(mut self, market: Arc<dyn MarketSignal>) -> Self {
        self.market = Some(market);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> RecommendationEngine {
        let config = self.config.unwrap_or_default().normalized();
        let retention = config.expert_retention;
        RecommendationEngine {
            experts: self
                .experts
                .unwrap_or_else(|| Arc::new(SimulatedExpertDirectory::new(retention))),
            market: self.market.unwrap_or_else(|| Arc::new(SimulatedMarketSignal)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config,
        }
    }
}

impl RecommendationEngine {
    pub fn builder() -> RecommendationEngineBuilder {
        RecommendationEngineBuilder::default()
    }

    /// Engine with the randomized placeholder providers and default config
    pub fn simulated() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Await a provider call under the configured timeout. `None` on failure.
    async fn bounded<T, F>(&self, source: &str, call: F) -> Option<T>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let limit = self.config.provider_timeout();
        let err = match tokio::time::timeout(limit, call).await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(e)) => e,
            Err(_) => ProviderError::Timeout(limit),
        };
        warn!(source, error = %err, "provider failed, omitting recommendation");
        None
    }

    /// Expert matches by industry and by experience level
    pub async fn recommend_experts(
        &self,
        profile: &UserProfile,
        consultation_type: Option<&str>,
    ) -> Vec<Recommendation> {
        self.experts_at(profile, consultation_type, self.clock.now()).await
    }

    /// Next steps from consultation history and services within budget
    pub async fn recommend_services(&self, profile: &UserProfile) -> Vec<Recommendation> {
        self.services_at(profile, self.clock.now()).await
    }

    /// Industry reading and a learning path for the experience level
    pub async fn recommend_content(&self, profile: &UserProfile) -> Vec<Recommendation> {
        self.content_at(profile, self.clock.now()).await
    }

    /// Market window and Q4 planning
    pub async fn recommend_timing(&self, profile: &UserProfile) -> Vec<Recommendation> {
        self.timing_at(profile, self.clock.now()).await
    }

    /// Company-size strategy and risk mitigation
    pub async fn generate_strategic_recommendations(
        &self,
        profile: &UserProfile,
    ) -> Vec<Recommendation> {
        self.strategy_at(profile, self.clock.now()).await
    }

    /// Run all generators concurrently and rank the combined output
    pub async fn generate_all_recommendations(
        &self,
        profile: &UserProfile,
        consultation_type: Option<&str>,
    ) -> Vec<Recommendation> {
        self.generate_all_at(profile, consultation_type, self.clock.now())
            .await
    }

    /// Same as `generate_all_recommendations`, with ids and the Q4 check
    /// taken from `now` instead of the clock
    pub async fn generate_all_at(
        &self,
        profile: &UserProfile,
        consultation_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let (experts, services, content, timing, strategy) = tokio::join!(
            self.experts_at(profile, consultation_type, now),
            self.services_at(profile, now),
            self.content_at(profile, now),
            self.timing_at(profile, now),
            self.strategy_at(profile, now)
        );

        let mut all: Vec<Recommendation> = experts
            .into_iter()
            .chain(services)
            .chain(content)
            .chain(timing)
            .chain(strategy)
            .collect();
        sort_recommendations(&mut all);

        info!(profile = %profile.id, count = all.len(), "generated recommendations");
        all
    }

    async fn experts_at(
        &self,
        profile: &UserProfile,
        consultation_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let level = profile.experience_level();
        let consultation_type = consultation_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let confidence = &self.config.confidence;

        if let Some(industry) = profile.industry() {
            let experts = self
                .bounded("expert_directory", self.experts.by_industry(industry))
                .await
                .unwrap_or_default();

            if !experts.is_empty() {
                let focus = consultation_type
                    .as_deref()
                    .map(|t| format!(" for {} consultations", t))
                    .unwrap_or_default();
                recs.push(Recommendation {
                    id: stamp_id("expert-industry", now),
                    title: format!("Top {} Experts Available", industry),
                    description: format!(
                        "We found {} specializing in {}{} who match your profile.",
                        plural(experts.len(), "expert", "experts"),
                        industry,
                        focus
                    ),
                    confidence: confidence.industry_experts,
                    reasoning: vec![
                        format!("Specialized experience in {}", industry),
                        "Highly rated by clients with similar profiles".to_string(),
                        format!("{} available for booking", plural(experts.len(), "expert", "experts")),
                    ],
                    actionable: true,
                    priority: Priority::High,
                    metadata: RecommendationMetadata::Expert {
                        industry: Some(industry.to_string()),
                        experience_level: level,
                        expert_ids: experts.iter().map(|e| e.id.clone()).collect(),
                        consultation_type: consultation_type.clone(),
                    },
                });
            }
        }

        recs.push(Recommendation {
            id: stamp_id("expert-level", now),
            title: format!("{} Level Expert Matching", level),
            description: format!(
                "Consultants who regularly guide {} clients through blockchain projects.",
                level.label().to_lowercase()
            ),
            confidence: confidence.experience_experts,
            reasoning: vec![
                format!("Your experience level: {}", level),
                "Explanations pitched at the right technical depth".to_string(),
                "Onboarding pace matched to your background".to_string(),
            ],
            actionable: true,
            priority: Priority::Medium,
            metadata: RecommendationMetadata::Expert {
                industry: None,
                experience_level: level,
                expert_ids: Vec::new(),
                consultation_type,
            },
        });

        debug!(profile = %profile.id, count = recs.len(), "expert recommendations");
        recs
    }

    async fn services_at(&self, profile: &UserProfile, now: DateTime<Utc>) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let confidence = &self.config.confidence;

        if let Some((topic, occurrences)) = profile.most_frequent_topic() {
            let steps = catalog::next_steps_for(&topic);
            let cited: Vec<&str> = steps.iter().take(2).copied().collect();
            let average = profile.average_rating_for(&topic).unwrap_or(0.0);

            recs.push(Recommendation {
                id: stamp_id("service-history", now),
                title: "Recommended Next Steps".to_string(),
                description: format!(
                    "Based on your {} consultations, consider {}.",
                    topic,
                    cited.join(" and ")
                ),
                confidence: confidence.history_services,
                reasoning: vec![
                    format!(
                        "{} on {}",
                        plural(occurrences, "past consultation", "past consultations"),
                        topic
                    ),
                    format!("Average rating {:.1}", average),
                    "Natural progression from your previous engagements".to_string(),
                ],
                actionable: true,
                priority: Priority::High,
                metadata: RecommendationMetadata::Service {
                    basis: ServiceBasis::History { topic, occurrences },
                    services: strings(steps),
                },
            });
        }

        if let (Some(amount), Some(tier)) = (profile.budget, profile.budget_tier()) {
            let services = catalog::budget_services(tier);
            recs.push(Recommendation {
                id: stamp_id("service-budget", now),
                title: "Services Within Your Budget".to_string(),
                description: format!(
                    "Engagements suited to a budget of ${:.0}: {}.",
                    amount,
                    services.join(", ")
                ),
                confidence: confidence.budget_services,
                reasoning: vec![
                    "Matched to your budget range".to_string(),
                    "Highest value engagements for the spend".to_string(),
                ],
                actionable: true,
                priority: Priority::Medium,
                metadata: RecommendationMetadata::Service {
                    basis: ServiceBasis::Budget { tier, amount },
                    services: strings(services),
                },
            });
        }

        debug!(profile = %profile.id, count = recs.len(), "service recommendations");
        recs
    }

    async fn content_at(&self, profile: &UserProfile, now: DateTime<Utc>) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let confidence = &self.config.confidence;

        if let Some(industry) = profile.industry() {
            recs.push(Recommendation {
                id: stamp_id("content-industry", now),
                title: format!("{} Industry Insights", industry),
                description: format!(
                    "Curated research and case studies for {} blockchain projects.",
                    industry
                ),
                confidence: confidence.industry_content,
                reasoning: vec![
                    format!("Relevant to your work in {}", industry),
                    "Updated with recent market developments".to_string(),
                ],
                actionable: false,
                priority: Priority::Low,
                metadata: RecommendationMetadata::Content {
                    industry: Some(industry.to_string()),
                    experience_level: None,
                    resources: catalog::industry_content(industry),
                },
            });
        }

        let level = profile.experience_level();
        let path = catalog::learning_path(level);
        recs.push(Recommendation {
            id: stamp_id("content-learning", now),
            title: format!("{} Learning Path", level),
            description: format!(
                "Start with {}, then continue with {}.",
                path[0],
                path[1..].join(" and ")
            ),
            confidence: confidence.learning_path,
            reasoning: vec![
                format!("Sequenced for {} clients", level.label().to_lowercase()),
                "Builds on concepts from your consultations".to_string(),
            ],
            actionable: true,
            priority: Priority::Medium,
            metadata: RecommendationMetadata::Content {
                industry: None,
                experience_level: Some(level),
                resources: strings(path),
            },
        });

        debug!(profile = %profile.id, count = recs.len(), "content recommendations");
        recs
    }

    async fn timing_at(&self, profile: &UserProfile, now: DateTime<Utc>) -> Vec<Recommendation> {
        let mut recs = Vec::new();

        if let Some(conditions) = self.bounded("market_signal", self.market.current()).await {
            if conditions.favorable {
                let market_confidence = if conditions.confidence.is_finite() {
                    conditions.confidence.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                recs.push(Recommendation {
                    id: stamp_id("timing-market", now),
                    title: "Favorable Market Window".to_string(),
                    description: "Current market conditions favor launching or expanding blockchain initiatives.".to_string(),
                    confidence: market_confidence,
                    reasoning: strings(catalog::MARKET_REASONING),
                    actionable: true,
                    priority: Priority::High,
                    metadata: RecommendationMetadata::Timing {
                        signal: TimingWindow::MarketConditions { market_confidence },
                    },
                });
            }
        }

        let month0 = now.month0();
        if catalog::is_q4(month0) {
            recs.push(Recommendation {
                id: stamp_id("timing-q4", now),
                title: "Q4 Planning Opportunity".to_string(),
                description: "Year-end is the moment to lock in next year's blockchain roadmap and budget.".to_string(),
                confidence: self.config.confidence.q4_planning,
                reasoning: strings(catalog::Q4_REASONING),
                actionable: true,
                priority: Priority::Medium,
                metadata: RecommendationMetadata::Timing {
                    signal: TimingWindow::QuarterPlanning { month: month0 + 1 },
                },
            });
        }

        debug!(profile = %profile.id, count = recs.len(), "timing recommendations");
        recs
    }

    async fn strategy_at(&self, profile: &UserProfile, now: DateTime<Utc>) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let confidence = &self.config.confidence;

        if let Some(size) = profile.company_size() {
            let template = catalog::strategy_for(size);
            let mut reasoning = vec![format!("Tailored to {} organizations", size)];
            reasoning.extend(template.focus_areas.iter().map(|f| format!("Focus: {}", f)));
            recs.push(Recommendation {
                id: stamp_id("strategy-company", now),
                title: template.title.to_string(),
                description: template.description.to_string(),
                confidence: confidence.company_strategy,
                reasoning,
                actionable: true,
                priority: Priority::High,
                metadata: RecommendationMetadata::Strategy {
                    company_size: Some(size),
                    focus_areas: strings(template.focus_areas),
                },
            });
        }

        recs.push(Recommendation {
            id: stamp_id("strategy-risk", now),
            title: "Risk Mitigation Plan".to_string(),
            description: "Review your exposure to technical, regulatory and market risk before the next milestone.".to_string(),
            confidence: confidence.risk_mitigation,
            reasoning: catalog::RISK_CATEGORIES
                .iter()
                .map(|r| format!("Assess {}", r.to_lowercase()))
                .collect(),
            actionable: true,
            priority: Priority::High,
            metadata: RecommendationMetadata::Strategy {
                company_size: None,
                focus_areas: strings(catalog::RISK_CATEGORIES),
            },
        });

        debug!(profile = %profile.id, count = recs.len(), "strategy recommendations");
        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{FakeExpertDirectory, FixedClock, FixedMarketSignal};
    use crate::types::RecommendationKind;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn engine_in_month(month: u32) -> RecommendationEngine {
        let now = Utc.with_ymd_and_hms(2026, month, 15, 12, 0, 0).unwrap();
        RecommendationEngine::builder()
            .experts(Arc::new(FakeExpertDirectory::empty()))
            .market(Arc::new(FixedMarketSignal::unfavorable()))
            .clock(Arc::new(FixedClock(now)))
            .build()
    }

    fn rec(priority: Priority, confidence: f64, id: &str) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            confidence,
            reasoning: Vec::new(),
            actionable: true,
            priority,
            metadata: RecommendationMetadata::Strategy {
                company_size: None,
                focus_areas: Vec::new(),
            },
        }
    }

    #[test]
    fn sort_priority_then_confidence() {
        let mut recs = vec![
            rec(Priority::Low, 0.99, "a"),
            rec(Priority::High, 0.5, "b"),
            rec(Priority::Urgent, 0.1, "c"),
            rec(Priority::High, 0.9, "d"),
        ];
        sort_recommendations(&mut recs);
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut recs = vec![rec(Priority::Medium, 0.5, "first"), rec(Priority::Medium, 0.5, "second")];
        sort_recommendations(&mut recs);
        assert_eq!(recs[0].id, "first");
    }

    #[tokio::test]
    async fn q4_only_in_october_through_december() {
        let profile = UserProfile::new("u1");
        for (month, expected) in [(9, 0), (10, 1), (11, 1), (12, 1), (1, 0)] {
            let timing = engine_in_month(month).recommend_timing(&profile).await;
            assert_eq!(timing.len(), expected, "month {}", month);
        }
    }

    /// Moves forward 1 ms on every read
    struct TickingClock {
        start: DateTime<Utc>,
        reads: AtomicI64,
    }

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<Utc> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            self.start + chrono::Duration::milliseconds(n)
        }
    }

    #[tokio::test]
    async fn ids_share_call_timestamp() {
        // 23:59:59.999 on Sep 30: the second read lands in October
        let start = Utc.with_ymd_and_hms(2026, 9, 30, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        let engine = RecommendationEngine::builder()
            .experts(Arc::new(FakeExpertDirectory::empty()))
            .market(Arc::new(FixedMarketSignal::unfavorable()))
            .clock(Arc::new(TickingClock {
                start,
                reads: AtomicI64::new(0),
            }))
            .build();

        let recs = engine.generate_all_recommendations(&UserProfile::new("u1"), None).await;
        let millis = start.timestamp_millis().to_string();
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.id.ends_with(&millis)), "{:?}", recs);
        assert!(recs.iter().all(|r| r.title != "Q4 Planning Opportunity"));
    }

    #[tokio::test]
    async fn learning_path_follows_experience() {
        let mut profile = UserProfile::new("u1");
        profile.experience = Some("Expert".to_string());
        let content = engine_in_month(3).recommend_content(&profile).await;
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].kind(), RecommendationKind::Content);
        assert_eq!(content[0].title, "Advanced Learning Path");
    }

    #[tokio::test]
    async fn unknown_company_size_uses_startup_strategy() {
        let mut profile = UserProfile::new("u1");
        profile.company_size = Some("unclear".to_string());
        let strategy = engine_in_month(3)
            .generate_strategic_recommendations(&profile)
            .await;
        assert_eq!(strategy.len(), 2);
        assert_eq!(strategy[0].title, "Lean Blockchain Adoption");
        assert_eq!(strategy[1].title, "Risk Mitigation Plan");
    }
}
