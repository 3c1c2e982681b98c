use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kurir")]
#[command(about = "Delivery reporting toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Per-driver delivery totals for one day.
    Delivered(ReportArgs),
    /// Undelivered-task exceptions bucketed by reason.
    PendingSo(ReportArgs),
    /// Planned-versus-realized stop sequence reconciliation.
    RoVsReal(ReportArgs),
    /// Refresh the local driver reference file from the routing API.
    SyncDrivers(ReportArgs),
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Target date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Location code override; defaults to KURIR_LOCATION.
    #[arg(long)]
    location: Option<String>,
}

impl ReportArgs {
    fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = kurir_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Delivered(args) => {
            let ctx = commands::build_context(config, args.location.clone())?;
            commands::run_delivered(ctx, args.date()).await
        }
        Commands::PendingSo(args) => {
            let ctx = commands::build_context(config, args.location.clone())?;
            commands::run_pending_so(ctx, args.date()).await
        }
        Commands::RoVsReal(args) => {
            let ctx = commands::build_context(config, args.location.clone())?;
            commands::run_ro_vs_real(ctx, args.date()).await
        }
        Commands::SyncDrivers(args) => {
            let ctx = commands::build_context(config, args.location.clone())?;
            commands::run_sync_drivers(ctx, args.date()).await
        }
    }
}
