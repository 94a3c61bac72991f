//! Bandhan dispute store entry point.
//!
//! Hydrates the store from the configured backend and prints a JSON report.
//!
//! # Usage
//!
//! ```bash
//! # Dispute statistics and engine counters
//! bandhan-disputes stats
//!
//! # One dispute, by opaque or human-readable ID
//! bandhan-disputes dispute BND-DISP-MH-2026-007
//!
//! # Disputes in a status
//! bandhan-disputes status under_review
//!
//! # Reputation record for a user
//! bandhan-disputes user seller-9
//! ```

use bandhan_common::{AppError, AppResult, Config, MetricsSnapshot, get_metrics};
use bandhan_core::{DisputeService, DisputeStats};
use bandhan_db::entities::DisputeStatus;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "bandhan-disputes")]
#[command(version)]
#[command(about = "Inspect the Bandhan dispute store")]
#[command(long_about = None)]
struct Cli {
    /// Report to print (defaults to `stats`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Commands {
    /// Dispute statistics and engine counters
    Stats,

    /// One dispute, by opaque or human-readable ID
    Dispute {
        /// Dispute ID
        id: String,
    },

    /// Disputes currently in a status
    Status {
        /// open, ai_analyzing, under_review, resolved, escalated or closed
        #[arg(value_parser = parse_status)]
        status: DisputeStatus,
    },

    /// Reputation record for a user
    User {
        /// User ID
        id: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    region: String,
    stats: DisputeStats,
    metrics: MetricsSnapshot,
}

fn parse_status(name: &str) -> Result<DisputeStatus, String> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|_| format!("unknown dispute status `{name}`"))
}

fn print_json(value: &impl Serialize) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands, config: &Config) -> AppResult<()> {
    let service = DisputeService::from_config(config).await?;

    match command {
        Commands::Stats => {
            let stats = service.dispute_stats().await?;
            info!(total = stats.total, "Store hydrated");
            print_json(&Report {
                region: config.disputes.region.to_uppercase(),
                stats,
                metrics: get_metrics().snapshot(),
            })
        }
        Commands::Dispute { id } => {
            let dispute = service
                .get_dispute(&id)
                .await?
                .ok_or(AppError::DisputeNotFound(id))?;
            print_json(&dispute)
        }
        Commands::Status { status } => {
            print_json(&service.get_disputes_by_status(status).await?)
        }
        Commands::User { id } => {
            let reputation = service
                .get_user_reputation(&id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("reputation record for {id}")))?;
            print_json(&reputation)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    bandhan_common::logging::init(&config.logging)?;

    info!(
        backend = ?config.storage.backend,
        region = %config.disputes.region,
        "Starting Bandhan dispute store..."
    );

    if let Err(e) = run(cli.command.unwrap_or(Commands::Stats), &config).await {
        e.log();
        return Err(e.into());
    }
    Ok(())
}
