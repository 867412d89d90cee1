//! Client profile supplied by the application layer.
//!
//! Profiles are read-only input to the engine. They can be loaded from the
//! JSON the web app exports (camelCase keys) or from hand-written YAML.

use crate::error::AdvisorError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A past consultation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: String,
    /// Topic tag, e.g. "tokenization" or "defi"
    #[serde(rename = "type", alias = "consultation_type")]
    pub consultation_type: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub date: DateTime<Utc>,
    #[serde(default, alias = "expertId")]
    pub expert_id: String,
}

/// Client profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, alias = "companySize", skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, alias = "consultationHistory")]
    pub consultation_history: Vec<ConsultationRecord>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: "client".to_string(),
            ..Self::default()
        }
    }

    /// Load a profile from a `.json`, `.yaml` or `.yml` file
    pub fn load_from(path: &Path) -> Result<Self, AdvisorError> {
        let raw = fs::read_to_string(path)?;
        match extension(path).as_deref() {
            Some("json") => Ok(serde_json::from_str(&raw)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&raw)?),
            other => Err(AdvisorError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Industry with surrounding whitespace removed; blank counts as unset
    pub fn industry(&self) -> Option<&str> {
        non_blank(self.industry.as_deref())
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        ExperienceLevel::classify(self.experience.as_deref())
    }

    pub fn company_size(&self) -> Option<CompanySize> {
        non_blank(self.company_size.as_deref()).map(CompanySize::classify)
    }

    pub fn budget_tier(&self) -> Option<BudgetTier> {
        self.budget.map(BudgetTier::from_amount)
    }

    /// Most frequent consultation topic and its count.
    ///
    /// Topics are compared trimmed and lowercased. Ties go to the topic seen
    /// first in history order.
    pub fn most_frequent_topic(&self) -> Option<(String, usize)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for record in &self.consultation_history {
            let topic = normalize_topic(&record.consultation_type);
            if topic.is_empty() {
                continue;
            }
            let count = counts.entry(topic.clone()).or_insert(0);
            if *count == 0 {
                order.push(topic);
            }
            *count += 1;
        }

        let mut best: Option<(String, usize)> = None;
        for topic in order {
            let count = counts[&topic];
            if best.as_ref().map_or(true, |(_, c)| count > *c) {
                best = Some((topic, count));
            }
        }
        best
    }

    /// Mean rating of the consultations on `topic` (normalized like
    /// `most_frequent_topic`). `None` when no record matches.
    pub fn average_rating_for(&self, topic: &str) -> Option<f64> {
        let topic = normalize_topic(topic);
        let (sum, n) = self
            .consultation_history
            .iter()
            .filter(|c| normalize_topic(&c.consultation_type) == topic)
            .fold((0.0, 0usize), |(sum, n), c| (sum + c.rating, n + 1));
        (n > 0).then(|| sum / n as f64)
    }
}

fn normalize_topic(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Client experience bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Keyword decision table, first row matching a whole word wins
const EXPERIENCE_TABLE: &[(&str, ExperienceLevel)] = &[
    ("expert", ExperienceLevel::Advanced),
    ("advanced", ExperienceLevel::Advanced),
    ("senior", ExperienceLevel::Advanced),
    ("professional", ExperienceLevel::Advanced),
    ("intermediate", ExperienceLevel::Intermediate),
    ("moderate", ExperienceLevel::Intermediate),
    ("some", ExperienceLevel::Intermediate),
    ("beginner", ExperienceLevel::Beginner),
    ("novice", ExperienceLevel::Beginner),
    ("new", ExperienceLevel::Beginner),
    ("none", ExperienceLevel::Beginner),
];

impl ExperienceLevel {
    /// Map free-text experience to a level. Unknown or missing → Beginner.
    pub fn classify(experience: Option<&str>) -> Self {
        let Some(raw) = experience else {
            return ExperienceLevel::Beginner;
        };
        let lowered = raw.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        EXPERIENCE_TABLE
            .iter()
            .find(|(keyword, _)| words.contains(keyword))
            .map(|(_, level)| *level)
            .unwrap_or(ExperienceLevel::Beginner)
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Company size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Startup,
    ScaleUp,
    Enterprise,
}

const COMPANY_SIZE_TABLE: &[(&str, CompanySize)] = &[
    ("enterprise", CompanySize::Enterprise),
    ("large", CompanySize::Enterprise),
    ("corporate", CompanySize::Enterprise),
    ("scale-up", CompanySize::ScaleUp),
    ("scaleup", CompanySize::ScaleUp),
    ("scale up", CompanySize::ScaleUp),
    ("growth", CompanySize::ScaleUp),
    ("medium", CompanySize::ScaleUp),
    ("mid", CompanySize::ScaleUp),
    ("startup", CompanySize::Startup),
    ("small", CompanySize::Startup),
    ("solo", CompanySize::Startup),
];

impl CompanySize {
    /// Map free-text company size to a bucket. Unknown → Startup.
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        COMPANY_SIZE_TABLE
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, size)| *size)
            .unwrap_or(CompanySize::Startup)
    }

    pub fn label(self) -> &'static str {
        match self {
            CompanySize::Startup => "Startup",
            CompanySize::ScaleUp => "Scale-up",
            CompanySize::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Budget bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// Below 5000
    Starter,
    /// Below 15000
    Growth,
    Premium,
}

impl BudgetTier {
    pub fn from_amount(amount: f64) -> Self {
        if amount < 5000.0 {
            BudgetTier::Starter
        } else if amount < 15000.0 {
            BudgetTier::Growth
        } else {
            BudgetTier::Premium
        }
    }
}
