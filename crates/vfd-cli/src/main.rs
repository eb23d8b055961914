mod report;

use clap::{Parser, Subcommand};

use vfd_pipeline::FilterParams;
use vfd_supabase::Loader;

#[derive(Debug, Parser)]
#[command(name = "vfd-cli")]
#[command(about = "Video-feedback dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the feedback table once and report the snapshot status.
    Fetch,
    /// Print the filtered report: KPIs, topic and brand tables, daily series.
    Summary {
        /// Window in days (clamped to 1..=90).
        #[arg(long, default_value_t = vfd_pipeline::DEFAULT_WINDOW_DAYS)]
        days: u32,
        /// Brand allow-list entry; repeat to select several. None selects all.
        #[arg(long = "brand")]
        brands: Vec<String>,
        /// Category allow-list entry; repeat to select several. None selects all.
        #[arg(long = "category")]
        categories: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = vfd_core::load_app_config_from_env()?;
    let loader = Loader::from_config(&config);

    match cli.command {
        Commands::Fetch => report::run_fetch(&loader).await,
        Commands::Summary {
            days,
            brands,
            categories,
        } => {
            let params = FilterParams {
                window_days: days,
                brands,
                categories,
            };
            report::run_summary(&loader, &params).await;
        }
    }

    Ok(())
}
