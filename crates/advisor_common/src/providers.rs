//! Data provider abstractions
//!
//! The engine reads experts, market conditions and the current time through
//! these traits so that:
//! - Tests inject deterministic fakes
//! - Live data sources can replace the simulated ones without touching ranking
//!
//! Production wiring uses the `Simulated*` providers, which reproduce the
//! randomized placeholder behavior the dashboard has always shown.

use crate::error::{AdvisorError, ProviderError};
use crate::profile::extension;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Experts
// ============================================================================

/// A consultant that can be booked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub industries: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Expert {
    pub fn serves(&self, industry: &str) -> bool {
        let wanted = industry.trim();
        self.industries.iter().any(|i| i.eq_ignore_ascii_case(wanted))
    }
}

/// Lookup of experts by industry
#[async_trait]
pub trait ExpertDirectory: Send + Sync {
    /// Available experts serving `industry`. Empty when none match.
    async fn by_industry(&self, industry: &str) -> Result<Vec<Expert>, ProviderError>;
}

fn expert(id: &str, name: &str, industries: &[&str], rating: f64) -> Expert {
    Expert {
        id: id.to_string(),
        name: name.to_string(),
        industries: industries.iter().map(|s| s.to_string()).collect(),
        rating,
        available: true,
    }
}

/// Placeholder roster shown until the booking system exposes real data
pub fn placeholder_roster() -> Vec<Expert> {
    vec![
        expert("exp-001", "Dana Whitfield", &["DeFi", "Finance"], 4.9),
        expert("exp-002", "Ravi Menon", &["DeFi", "Gaming"], 4.7),
        expert("exp-003", "Lucia Ortega", &["Finance", "Real Estate"], 4.8),
        expert("exp-004", "Tomasz Nowak", &["Supply Chain", "Healthcare"], 4.6),
        expert("exp-005", "Amara Okafor", &["DeFi", "Healthcare"], 4.8),
        expert("exp-006", "Kenji Watanabe", &["Gaming", "Real Estate"], 4.5),
    ]
}

fn available_for(roster: &[Expert], industry: &str) -> Vec<Expert> {
    roster
        .iter()
        .filter(|e| e.available && e.serves(industry))
        .cloned()
        .collect()
}

/// Deterministic roster lookup
pub struct StaticExpertDirectory {
    roster: Vec<Expert>,
}

impl StaticExpertDirectory {
    pub fn new() -> Self {
        Self::with_roster(placeholder_roster())
    }

    pub fn with_roster(roster: Vec<Expert>) -> Self {
        Self { roster }
    }
}

impl Default for StaticExpertDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpertDirectory for StaticExpertDirectory {
    async fn by_industry(&self, industry: &str) -> Result<Vec<Expert>, ProviderError> {
        Ok(available_for(&self.roster, industry))
    }
}

/// Placeholder roster with each match kept with probability `retention`
pub struct SimulatedExpertDirectory {
    roster: Vec<Expert>,
    retention: f64,
}

impl SimulatedExpertDirectory {
    pub fn new(retention: f64) -> Self {
        Self {
            roster: placeholder_roster(),
            retention: retention.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl ExpertDirectory for SimulatedExpertDirectory {
    async fn by_industry(&self, industry: &str) -> Result<Vec<Expert>, ProviderError> {
        let matches = available_for(&self.roster, industry);
        let mut rng = rand::thread_rng();
        Ok(matches
            .into_iter()
            .filter(|_| rng.gen_bool(self.retention))
            .collect())
    }
}

/// Roster loaded from a JSON or YAML file (list of experts)
pub struct FileExpertDirectory {
    inner: StaticExpertDirectory,
}

impl FileExpertDirectory {
    pub fn load(path: &Path) -> Result<Self, AdvisorError> {
        let raw = fs::read_to_string(path)?;
        let roster: Vec<Expert> = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
            other => {
                return Err(AdvisorError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };
        validate_roster(&roster)?;
        Ok(Self {
            inner: StaticExpertDirectory::with_roster(roster),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.roster.is_empty()
    }
}

/// Every entry needs an id and at least one industry
fn validate_roster(roster: &[Expert]) -> Result<(), ProviderError> {
    for (i, e) in roster.iter().enumerate() {
        if e.id.trim().is_empty() {
            return Err(ProviderError::InvalidData(format!("roster entry {} has no id", i)));
        }
        if e.industries.iter().all(|ind| ind.trim().is_empty()) {
            return Err(ProviderError::InvalidData(format!(
                "expert {} lists no industries",
                e.id
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl ExpertDirectory for FileExpertDirectory {
    async fn by_industry(&self, industry: &str) -> Result<Vec<Expert>, ProviderError> {
        self.inner.by_industry(industry).await
    }
}

/// Pre-configured directory response for testing
pub struct FakeExpertDirectory {
    response: Result<Vec<Expert>, ProviderError>,
    delay: Option<std::time::Duration>,
}

impl FakeExpertDirectory {
    pub fn returning(experts: Vec<Expert>) -> Self {
        Self {
            response: Ok(experts),
            delay: None,
        }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            response: Err(ProviderError::Unavailable(reason.to_string())),
            delay: None,
        }
    }

    /// Sleep before answering (used to exercise timeouts)
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ExpertDirectory for FakeExpertDirectory {
    async fn by_industry(&self, _industry: &str) -> Result<Vec<Expert>, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

// ============================================================================
// Market conditions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub favorable: bool,
    pub confidence: f64,
}

#[async_trait]
pub trait MarketSignal: Send + Sync {
    async fn current(&self) -> Result<MarketConditions, ProviderError>;
}

/// Coin-flip market check with confidence in [0.6, 0.95)
pub struct SimulatedMarketSignal;

#[async_trait]
impl MarketSignal for SimulatedMarketSignal {
    async fn current(&self) -> Result<MarketConditions, ProviderError> {
        let mut rng = rand::thread_rng();
        Ok(MarketConditions {
            favorable: rng.gen_bool(0.5),
            confidence: rng.gen_range(0.6..0.95),
        })
    }
}

/// Fixed market response
pub struct FixedMarketSignal {
    response: Result<MarketConditions, ProviderError>,
    delay: Option<std::time::Duration>,
}

impl FixedMarketSignal {
    pub fn favorable(confidence: f64) -> Self {
        Self {
            response: Ok(MarketConditions {
                favorable: true,
                confidence,
            }),
            delay: None,
        }
    }

    pub fn unfavorable() -> Self {
        Self {
            response: Ok(MarketConditions {
                favorable: false,
                confidence: 0.0,
            }),
            delay: None,
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            response: Err(ProviderError::Unavailable(reason.to_string())),
            delay: None,
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl MarketSignal for FixedMarketSignal {
    async fn current(&self) -> Result<MarketConditions, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

// ============================================================================
// Clock
// ============================================================================

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
