//! Shared types and engine for the consulting advisor.
//!
//! Rule-based recommendations for client dashboards: expert matches, service
//! upsells, content, timing and strategy, ranked by priority then confidence.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod notifications;
pub mod profile;
pub mod providers;
pub mod render;
pub mod types;

pub use config::{AdvisorConfig, ColorMode, ConfidenceConfig, EngineConfig, OutputConfig};
pub use engine::{sort_recommendations, RecommendationEngine, RecommendationEngineBuilder};
pub use error::{AdvisorError, ProviderError};
pub use notifications::{action_url_for, NotificationKind, SmartNotification, SmartNotificationEngine};
pub use profile::{BudgetTier, CompanySize, ConsultationRecord, ExperienceLevel, UserProfile};
pub use providers::{
    Clock, Expert, ExpertDirectory, FileExpertDirectory, FixedClock, FixedMarketSignal,
    MarketConditions, MarketSignal, SimulatedExpertDirectory, SimulatedMarketSignal,
    StaticExpertDirectory, SystemClock,
};
pub use types::{
    Priority, Recommendation, RecommendationKind, RecommendationMetadata, ServiceBasis,
    TimingWindow,
};
