//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Consulting advisor CLI
#[derive(Debug, Parser)]
#[command(name = "advisorctl")]
#[command(about = "Consulting Advisor - ranked recommendations for client profiles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config.toml (overrides $ADVISOR_CONFIG and defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print ranked recommendations for a profile
    Recommend(RecommendArgs),

    /// Print the dashboard notifications for a profile
    Notify(NotifyArgs),

    /// Show effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },
}

/// Market signal used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarketMode {
    /// Randomized placeholder signal
    Simulated,
    Favorable,
    Unfavorable,
}

#[derive(Debug, Clone, Args)]
pub struct ProviderArgs {
    /// Expert roster file (.json/.yaml); simulated roster when absent
    #[arg(long)]
    pub experts: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = MarketMode::Simulated)]
    pub market: MarketMode,
}

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    /// Profile file (.json/.yaml)
    #[arg(long)]
    pub profile: PathBuf,

    /// Consultation type hint for expert matching
    #[arg(long)]
    pub consultation_type: Option<String>,

    /// Only show one recommendation type (expert, service, content, timing, strategy)
    #[arg(long)]
    pub kind: Option<String>,

    /// Output JSON only
    #[arg(long, conflicts_with = "markdown")]
    pub json: bool,

    /// Output Markdown
    #[arg(long)]
    pub markdown: bool,

    #[command(flatten)]
    pub providers: ProviderArgs,
}

#[derive(Debug, Clone, Args)]
pub struct NotifyArgs {
    /// Profile file (.json/.yaml)
    #[arg(long)]
    pub profile: PathBuf,

    /// Output JSON only
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub providers: ProviderArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_recommend_flags() {
        let cli = Cli::try_parse_from([
            "advisorctl",
            "--verbose",
            "recommend",
            "--profile",
            "p.json",
            "--kind",
            "service",
            "--market",
            "favorable",
            "--json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Recommend(args) => {
                assert_eq!(args.kind.as_deref(), Some("service"));
                assert_eq!(args.providers.market, MarketMode::Favorable);
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn json_and_markdown_conflict() {
        let result = Cli::try_parse_from([
            "advisorctl", "recommend", "--profile", "p.json", "--json", "--markdown",
        ]);
        assert!(result.is_err());
    }
}
