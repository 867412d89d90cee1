//! Command execution
//!
//! Each command returns the rendered output so tests can assert on it
//! without spawning the binary.

use crate::cli::{MarketMode, NotifyArgs, ProviderArgs, RecommendArgs};
use crate::output;
use advisor_common::render::{format_recommendations_markdown, format_recommendations_text};
use advisor_common::{
    AdvisorConfig, FileExpertDirectory, FixedMarketSignal, MarketSignal, RecommendationEngine,
    RecommendationKind, SimulatedMarketSignal, SmartNotificationEngine, UserProfile,
};
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Confidence reported by `--market favorable`
const FORCED_MARKET_CONFIDENCE: f64 = 0.8;

pub fn load_config(path: Option<&Path>) -> Result<AdvisorConfig> {
    AdvisorConfig::load(path)
}

fn load_profile(path: &Path) -> Result<UserProfile> {
    UserProfile::load_from(path)
        .with_context(|| format!("Failed to load profile: {}", path.display()))
}

/// Wire the engine from config and provider flags
pub fn build_engine(config: &AdvisorConfig, providers: &ProviderArgs) -> Result<RecommendationEngine> {
    let market: Arc<dyn MarketSignal> = match providers.market {
        MarketMode::Simulated => Arc::new(SimulatedMarketSignal),
        MarketMode::Favorable => Arc::new(FixedMarketSignal::favorable(FORCED_MARKET_CONFIDENCE)),
        MarketMode::Unfavorable => Arc::new(FixedMarketSignal::unfavorable()),
    };

    let mut builder = RecommendationEngine::builder()
        .config(config.engine.clone())
        .market(market);

    if let Some(path) = &providers.experts {
        let directory = FileExpertDirectory::load(path)
            .with_context(|| format!("Failed to load expert roster: {}", path.display()))?;
        info!(experts = directory.len(), path = %path.display(), "loaded expert roster");
        builder = builder.experts(Arc::new(directory));
    }

    Ok(builder.build())
}

pub async fn recommend(args: &RecommendArgs, config: &AdvisorConfig, color: bool) -> Result<String> {
    let kind = match args.kind.as_deref() {
        Some(raw) => match RecommendationKind::parse(raw) {
            Some(kind) => Some(kind),
            None => bail!(
                "Unknown recommendation kind '{}' (expected expert, service, content, timing or strategy)",
                raw
            ),
        },
        None => None,
    };

    let profile = load_profile(&args.profile)?;
    let engine = build_engine(config, &args.providers)?;

    let mut recs = engine
        .generate_all_recommendations(&profile, args.consultation_type.as_deref())
        .await;
    if let Some(kind) = kind {
        recs.retain(|r| r.kind() == kind);
    }
    debug!(count = recs.len(), "recommendations after filtering");

    if args.json {
        return serde_json::to_string_pretty(&recs).context("Failed to serialize recommendations");
    }
    if args.markdown {
        return Ok(format_recommendations_markdown(&recs));
    }
    if color {
        return Ok(output::colored_recommendations(&recs));
    }
    Ok(format_recommendations_text(&recs))
}

pub async fn notify(args: &NotifyArgs, config: &AdvisorConfig, color: bool) -> Result<String> {
    let profile = load_profile(&args.profile)?;
    let notifier = SmartNotificationEngine::new(build_engine(config, &args.providers)?);
    let notifications = notifier.generate_smart_notifications(&profile).await;

    if args.json {
        return serde_json::to_string_pretty(&notifications)
            .context("Failed to serialize notifications");
    }
    Ok(output::notifications(&notifications, color))
}

pub fn show_config(config: &AdvisorConfig, explicit: Option<&Path>, path_only: bool) -> Result<String> {
    if path_only {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => AdvisorConfig::default_path()?,
        };
        return Ok(path.display().to_string());
    }
    config.to_toml()
}
