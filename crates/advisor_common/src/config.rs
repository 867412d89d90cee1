//! Advisor configuration
//!
//! Config file: `$ADVISOR_CONFIG`, else `$XDG_CONFIG_HOME/advisor/config.toml`,
//! else `~/.config/advisor/config.toml`. A missing file means defaults.
//!
//! Confidence values are fixed per rule. They are configuration, not
//! measured probabilities.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound on dashboard notifications
pub const MAX_NOTIFICATIONS: usize = 3;

/// Confidence constant attached to each rule's recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub industry_experts: f64,
    pub experience_experts: f64,
    pub history_services: f64,
    pub budget_services: f64,
    pub industry_content: f64,
    pub learning_path: f64,
    pub q4_planning: f64,
    pub company_strategy: f64,
    pub risk_mitigation: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            industry_experts: 0.85,
            experience_experts: 0.78,
            history_services: 0.82,
            budget_services: 0.75,
            industry_content: 0.80,
            learning_path: 0.88,
            q4_planning: 0.90,
            company_strategy: 0.83,
            risk_mitigation: 0.87,
        }
    }
}

impl ConfidenceConfig {
    fn normalized(self) -> Self {
        let d = Self::default();
        Self {
            industry_experts: unit(self.industry_experts, d.industry_experts),
            experience_experts: unit(self.experience_experts, d.experience_experts),
            history_services: unit(self.history_services, d.history_services),
            budget_services: unit(self.budget_services, d.budget_services),
            industry_content: unit(self.industry_content, d.industry_content),
            learning_path: unit(self.learning_path, d.learning_path),
            q4_planning: unit(self.q4_planning, d.q4_planning),
            company_strategy: unit(self.company_strategy, d.company_strategy),
            risk_mitigation: unit(self.risk_mitigation, d.risk_mitigation),
        }
    }
}

/// Clamp to [0, 1]; non-finite values fall back to `default`
fn unit(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        default
    }
}

/// Engine behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bound on each provider call
    pub provider_timeout_ms: u64,
    /// Notifications kept from the ranked list (1..=3)
    pub notification_limit: usize,
    /// Keep probability per matching expert in the simulated directory
    pub expert_retention: f64,
    pub confidence: ConfidenceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: 2000,
            notification_limit: MAX_NOTIFICATIONS,
            expert_retention: 0.7,
            confidence: ConfidenceConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Clamp every field into its valid range
    pub fn normalized(self) -> Self {
        Self {
            provider_timeout_ms: self.provider_timeout_ms.max(1),
            notification_limit: self.notification_limit.clamp(1, MAX_NOTIFICATIONS),
            expert_retention: unit(self.expert_retention, 0.7),
            confidence: self.confidence.normalized(),
        }
    }
}

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
}

/// Main advisor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

impl AdvisorConfig {
    /// Default config path following the lookup order above
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("ADVISOR_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("advisor").join("config.toml"));
        }
        let home = std::env::var("HOME").context("Cannot determine home directory")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("advisor")
            .join("config.toml"))
    }

    /// Load from `path`, or from the default path when `None`.
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: AdvisorConfig = toml::from_str(content)?;
        config.engine = config.engine.normalized();
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AdvisorConfig::from_toml("").unwrap();
        assert_eq!(config, AdvisorConfig::default());
        assert_eq!(config.engine.confidence.industry_experts, 0.85);
        assert_eq!(config.engine.confidence.experience_experts, 0.78);
        assert_eq!(config.engine.notification_limit, 3);
    }

    #[test]
    fn partial_toml_overrides_and_clamps() {
        let config = AdvisorConfig::from_toml(
            r#"
            [engine]
            notification_limit = 10
            provider_timeout_ms = 0

            [engine.confidence]
            q4_planning = 1.7
            risk_mitigation = 0.5

            [output]
            color = "never"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.notification_limit, 3);
        assert_eq!(config.engine.provider_timeout_ms, 1);
        assert_eq!(config.engine.confidence.q4_planning, 1.0);
        assert_eq!(config.engine.confidence.risk_mitigation, 0.5);
        assert_eq!(config.engine.confidence.learning_path, 0.88);
        assert_eq!(config.output.color, ColorMode::Never);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdvisorConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AdvisorConfig::default());
    }

    #[test]
    fn bad_file_reports_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[engine").unwrap();
        let err = AdvisorConfig::load(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn round_trips_through_toml() {
        let text = AdvisorConfig::default().to_toml().unwrap();
        assert!(text.contains("provider_timeout_ms = 2000"));
        assert_eq!(AdvisorConfig::from_toml(&text).unwrap(), AdvisorConfig::default());
    }
}
