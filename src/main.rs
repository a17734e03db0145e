//! Device agent entry point.
//!
//! `run` bootstraps the configuration and then applies patches read from stdin,
//! one JSON payload per line, printing an acknowledgement for each.

use std::{error::Error, path::PathBuf, process};

use clap::{Parser, Subcommand};
use device_agent::{
    config::AgentSettings,
    config_store::ConfigStore,
    docs,
    services::{ConfigSyncService, DevMeta, FileCenter, PatchRequest, RetryPolicy},
    tracing_config,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, instrument, warn};

#[derive(Parser)]
#[command(name = "device-agent")]
#[command(about = "Keeps device configuration in sync with the central authority")]
struct Cli {
    /// Settings file (defaults to $XDG_CONFIG_HOME/device-agent/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap, then apply patches from stdin
    Run,
    /// Print the JSON schema of the settings file
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Schema => {
            println!("{}", docs::settings_schema_pretty()?);
            Ok(())
        }
        Commands::Run => {
            let settings = match &cli.config {
                Some(path) => AgentSettings::load_from(path)?,
                None => AgentSettings::load()?,
            };

            let _guard = if settings.general.log_to_file {
                Some(tracing_config::init_with_file(settings.general.log_level)?)
            } else {
                tracing_config::init(settings.general.log_level)?;
                None
            };

            if let Err(e) = run(settings).await {
                error!("{e}");
                process::exit(1);
            }
            Ok(())
        }
    }
}

#[instrument(skip_all, fields(device = %settings.device.name))]
async fn run(settings: AgentSettings) -> Result<(), Box<dyn Error>> {
    info!("Starting device agent");

    let init_path = settings
        .center
        .init_config_path
        .clone()
        .ok_or("center.init_config_path is not set")?;

    let store = ConfigStore::new();
    spawn_change_logger(&store);

    let service = ConfigSyncService::new(
        store,
        FileCenter::new(init_path),
        DevMeta::from(&settings.device),
    )
    .with_retry(RetryPolicy::from(&settings.bootstrap));

    service.bootstrap().await?;
    info!("Bootstrap complete, reading patches from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed, shutting down");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let ack = service.handle_patch(&PatchRequest::new(line));
                println!("{}", serde_json::to_string(&ack)?);
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Logs the full record whenever the configuration changes.
fn spawn_change_logger(store: &ConfigStore) {
    let mut subscription = store.subscribe_key("change-logger");
    let store = store.clone();

    tokio::spawn(async move {
        while subscription.changed().await {
            info!(record = ?store.snapshot(), "Configuration changed");
        }
    });
}
