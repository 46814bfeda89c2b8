mod backfill;
mod tags;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atlas-cli")]
#[command(about = "Atlas content site maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill in missing asset coordinates by geocoding their location tags
    BackfillLocations {
        /// Preview changes without writing to the content store
        #[arg(long)]
        dry_run: bool,
    },
    /// Print location tags grouped by country
    Tags,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = atlas_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::BackfillLocations { dry_run } => {
            backfill::run_backfill_command(&config, dry_run).await
        }
        Commands::Tags => tags::run_tags(&config).await,
    }
}
