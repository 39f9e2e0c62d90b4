//! Atmos CLI
//!
//! Command-line front end for the air-quality prediction service:
//! - Submit a reading and show the scored tier
//! - Show the dashboard (history table, summary, latest snapshot chart)
//! - Export or clear the local history

use anyhow::Context;
use atmos::config::{generate_default_config, Config, LoadedConfig, LoggingConfig};
use atmos::export::{self, ExportFormat};
use atmos::{
    Dashboard, FormInput, HistoryStore, HttpPredictionClient, JsonFileStore, NoCooldown,
    SubmissionController, SubmitOutcome, TerminalPresenter,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "atmos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Air-quality prediction client")]
#[command(long_about = "Atmos submits pollutant readings to an AQI prediction service,\nshows the severity tier and keeps a local history of recent predictions.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Prediction service URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a reading for scoring
    Predict {
        /// PM2.5 concentration
        #[arg(long)]
        pm25: Option<String>,
        /// PM10 concentration
        #[arg(long)]
        pm10: Option<String>,
        /// NO2 concentration
        #[arg(long)]
        no2: Option<String>,
        /// SO2 concentration
        #[arg(long)]
        so2: Option<String>,
        /// CO concentration
        #[arg(long)]
        co: Option<String>,
        /// O3 concentration
        #[arg(long)]
        o3: Option<String>,
    },

    /// Show history, summary and the latest pollutant snapshot
    Dashboard,

    /// List recorded predictions
    History {
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: ExportFormat,
    },

    /// Delete the prediction history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Check that the prediction service is up
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => LoadedConfig::from_file(Config::load_with_env(path)?, path),
        None => Config::load_first(&Config::default_paths()),
    };

    // The subscriber needs the configured level, so config problems are
    // reported once it is installed
    init_tracing(&loaded.config.logging);
    loaded.report();
    tracing::debug!("Atmos v{}", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.config;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let data_dir = config.history.data_path();
    let store: Rc<dyn HistoryStore> = Rc::new(JsonFileStore::new(&data_dir));

    match cli.command {
        Commands::Predict {
            pm25,
            pm10,
            no2,
            so2,
            co,
            o3,
        } => {
            let form: FormInput = [
                ("pm25", pm25),
                ("pm10", pm10),
                ("no2", no2),
                ("so2", so2),
                ("co", co),
                ("o3", o3),
            ]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();

            let api = HttpPredictionClient::new(&config.api)?;
            let controller = SubmissionController::new(
                Rc::new(api),
                store,
                Rc::new(TerminalPresenter::new()),
                // One submission per process, nothing to cool down for
                Rc::new(NoCooldown),
                config.submission.controller_config(),
            );

            if let SubmitOutcome::Failed(_) = controller.submit(&form).await {
                std::process::exit(1);
            }
        }

        Commands::Dashboard => {
            Dashboard::new(store, Rc::new(TerminalPresenter::new())).init();
        }

        Commands::History { format } => {
            let entries = store.load();
            match format {
                ExportFormat::Json => println!("{}", export::to_json(&entries)?),
                ExportFormat::Csv => print!("{}", export::to_csv(&entries)?),
                ExportFormat::Table => print!("{}", atmos::terminal::render_history_table(&entries)),
            }
        }

        Commands::Clear { yes } => {
            let presenter = Rc::new(TerminalPresenter::new().assume_yes(yes));
            let dashboard = Dashboard::new(store, presenter);
            if dashboard.clear_history()? {
                println!("History cleared");
            }
        }

        Commands::Status => {
            let client = HttpPredictionClient::new(&config.api)?;
            match client.status().await {
                Ok(status) => {
                    println!("Service: {}", client.base_url());
                    println!("Status: {}", status.status);
                    if !status.message.is_empty() {
                        println!("Message: {}", status.message);
                    }
                    println!(
                        "Model: {}",
                        if status.model_loaded { "loaded" } else { "missing" }
                    );
                }
                Err(e) => {
                    eprintln!("Service unreachable at {}: {}", client.base_url(), e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable
fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("atmos={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
