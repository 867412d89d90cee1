//! Advisor Control - CLI front end for the recommendation engine
//!
//! Loads a client profile and prints ranked recommendations or the
//! dashboard notifications derived from them.

use advisorctl::cli::{Cli, Commands};
use advisorctl::{commands, logging, output};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    let color = output::use_color(config.output.color);

    let rendered = match cli.command {
        Commands::Recommend(args) => commands::recommend(&args, &config, color).await?,
        Commands::Notify(args) => commands::notify(&args, &config, color).await?,
        Commands::Config { path } => commands::show_config(&config, cli.config.as_deref(), path)?,
    };
    println!("{}", rendered);
    Ok(())
}
