// Main entry point - Dependency injection, dataset generation and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::generation_service::GenerationService;
use crate::infrastructure::config::{load_app_config, load_widgets_config};
use crate::infrastructure::csv_repository::CsvDatasetRepository;
use crate::infrastructure::observations::{default_observations, load_observations};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_report, health_check, list_records, list_states, national_totals,
    state_records,
};

#[derive(Debug, Parser)]
#[command(
    name = "diabetes-monitor",
    version,
    about = "Interpolated state-level diabetes dataset and dashboard API"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interpolate every state and write the master CSV
    Generate {
        /// Output CSV file
        output: Option<PathBuf>,

        /// TOML file of [[observations]] to use instead of the built-in states
        #[arg(long)]
        observations: Option<PathBuf>,
    },

    /// Serve the dashboard API over a generated master CSV
    Serve {
        /// Master CSV to serve
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Listen address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let cli = Cli::parse();
    let app_config = load_app_config()?;

    match cli.command.unwrap_or(Command::Generate {
        output: None,
        observations: None,
    }) {
        Command::Generate {
            output,
            observations,
        } => {
            let output = output.unwrap_or(app_config.generation.output);
            let observations = match observations.or(app_config.generation.observations) {
                Some(path) => load_observations(&path)?,
                None => default_observations().context("Built-in observations are invalid")?,
            };

            let repository = Arc::new(CsvDatasetRepository::new(&output));
            let generation_service = GenerationService::new(repository);
            let dataset = generation_service.generate(&observations).await?;

            println!(
                "Master data generated: {} rows -> {}",
                dataset.len(),
                output.display()
            );
        }
        Command::Serve { dataset, addr } => {
            let dataset = dataset.unwrap_or(app_config.server.dataset);
            let addr: SocketAddr = addr
                .unwrap_or(app_config.server.addr)
                .parse()
                .context("Invalid listen address")?;

            // Create repository (infrastructure layer)
            let repository = Arc::new(CsvDatasetRepository::new(&dataset));

            // Create services (application layer)
            let widgets_config = load_widgets_config()?;
            let dashboard_service = DashboardService::load(repository, widgets_config)
                .await
                .with_context(|| format!("Cannot serve {}", dataset.display()))?;

            let state = Arc::new(AppState { dashboard_service });

            // Build router (presentation layer)
            let router = Router::new()
                .route("/healthz", get(health_check))
                .route("/states", get(list_states))
                .route("/states/:name/records", get(state_records))
                .route("/records", get(list_records))
                .route("/totals", get(national_totals))
                .route("/dashboard", get(get_dashboard))
                .route("/report", get(get_report))
                .layer(CompressionLayer::new())
                .layer(TraceLayer::new_for_http())
                .with_state(state);

            tracing::info!("Starting diabetes-monitor on {}", addr);
            axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;
        }
    }

    Ok(())
}
