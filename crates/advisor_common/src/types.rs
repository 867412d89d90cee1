//! Recommendation model shared by the engine, notifications and renderers.

use crate::profile::{BudgetTier, CompanySize, ExperienceLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority level for recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl Priority {
    /// Numeric rank used for ordering (urgent=4 ... low=1)
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Expert,
    Service,
    Content,
    Timing,
    Strategy,
}

impl RecommendationKind {
    pub const ALL: [RecommendationKind; 5] = [
        RecommendationKind::Expert,
        RecommendationKind::Service,
        RecommendationKind::Content,
        RecommendationKind::Timing,
        RecommendationKind::Strategy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationKind::Expert => "expert",
            RecommendationKind::Service => "service",
            RecommendationKind::Content => "content",
            RecommendationKind::Timing => "timing",
            RecommendationKind::Strategy => "strategy",
        }
    }

    /// Parse a lowercase kind name ("expert", "service", ...)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a service recommendation was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ServiceBasis {
    /// Most frequent topic across past consultations
    History { topic: String, occurrences: usize },
    /// Budget bucket
    Budget { tier: BudgetTier, amount: f64 },
}

/// Which timing signal produced a timing recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "window", rename_all = "snake_case")]
pub enum TimingWindow {
    MarketConditions { market_confidence: f64 },
    QuarterPlanning { month: u32 },
}

/// Per-type payload. The variant is the recommendation's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecommendationMetadata {
    Expert {
        #[serde(skip_serializing_if = "Option::is_none")]
        industry: Option<String>,
        experience_level: ExperienceLevel,
        expert_ids: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        consultation_type: Option<String>,
    },
    Service {
        basis: ServiceBasis,
        services: Vec<String>,
    },
    Content {
        #[serde(skip_serializing_if = "Option::is_none")]
        industry: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        experience_level: Option<ExperienceLevel>,
        resources: Vec<String>,
    },
    Timing {
        signal: TimingWindow,
    },
    Strategy {
        #[serde(skip_serializing_if = "Option::is_none")]
        company_size: Option<CompanySize>,
        focus_areas: Vec<String>,
    },
}

impl RecommendationMetadata {
    pub fn kind(&self) -> RecommendationKind {
        match self {
            RecommendationMetadata::Expert { .. } => RecommendationKind::Expert,
            RecommendationMetadata::Service { .. } => RecommendationKind::Service,
            RecommendationMetadata::Content { .. } => RecommendationKind::Content,
            RecommendationMetadata::Timing { .. } => RecommendationKind::Timing,
            RecommendationMetadata::Strategy { .. } => RecommendationKind::Strategy,
        }
    }
}

/// A single ranked suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique within one generation call, not persisted
    pub id: String,
    pub title: String,
    pub description: String,
    /// Configured constant in [0, 1]
    pub confidence: f64,
    pub reasoning: Vec<String>,
    pub actionable: bool,
    pub priority: Priority,
    pub metadata: RecommendationMetadata,
}

impl Recommendation {
    pub fn kind(&self) -> RecommendationKind {
        self.metadata.kind()
    }

    /// Services listed by a service recommendation (empty for other kinds)
    pub fn services(&self) -> &[String] {
        match &self.metadata {
            RecommendationMetadata::Service { services, .. } => services,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_matches_table() {
        assert_eq!(Priority::Urgent.rank(), 4);
        assert_eq!(Priority::High.rank(), 3);
        assert_eq!(Priority::Medium.rank(), 2);
        assert_eq!(Priority::Low.rank(), 1);
        assert!(Priority::Urgent > Priority::Low);
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(RecommendationKind::parse("Expert"), Some(RecommendationKind::Expert));
        assert_eq!(RecommendationKind::parse(" timing "), Some(RecommendationKind::Timing));
        assert_eq!(RecommendationKind::parse("webinar"), None);
    }

    #[test]
    fn metadata_serializes_with_type_tag() {
        let meta = RecommendationMetadata::Timing {
            signal: TimingWindow::QuarterPlanning { month: 10 },
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["type"], "timing");
        assert_eq!(json["signal"]["window"], "quarter_planning");
    }
}
