#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod logging;
mod signals;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fiscal_registry::api::rest::routes;
use fiscal_registry::{AppService, Db};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Fiscal Registry Server - companies and their filing obligations
#[derive(Parser)]
#[command(name = "fiscal-registry-server")]
#[command(about = "Fiscal Registry Server - companies and their filing obligations")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; a malformed one is not.
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e).context("failed to load .env");
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*, DATABASE_URL) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    logging::init(&config.logging);

    if cli.print_config {
        println!(
            "Effective configuration:\n{}",
            serde_saphyr::to_string(&config.redacted())?
        );
        return Ok(());
    }

    // Fail before any connection attempt when the URL is missing.
    config.database_url()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", serde_saphyr::to_string(&config.redacted())?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Fiscal Registry Server starting");

    let url = config.database_url()?;
    let db = Db::connect(url, &config.database.pool).await?;
    db.ensure_schema().await?;

    let service = Arc::new(AppService::with_orm(db));
    let app = routes::router(service).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}
