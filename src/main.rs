//! ErrExplain server
//!
//! Loads configuration (file, then environment overrides, then CLI flags),
//! initialises logging and runs the HTTP server.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use errexplain::Config;
use errexplain::server;
use errexplain::utils::logging::{LogFormat, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/errexplain.yaml";

#[derive(Debug, Parser)]
#[command(name = "errexplain", version, about = errexplain::DESCRIPTION)]
struct Cli {
    /// Configuration file (YAML). Defaults to config/errexplain.yaml when present.
    #[arg(short, long, env = "ERREXPLAIN_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,
}

async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        default.exists().then_some(default)
    });

    let mut config = match path {
        Some(path) => {
            let _ = dotenvy::dotenv();
            let mut config = Config::from_file(&path)
                .await
                .with_context(|| format!("loading {}", path.display()))?;
            config.app.apply_env().context("applying environment overrides")?;
            config
        }
        None => Config::from_env().context("loading configuration from environment")?,
    };

    if let Some(host) = &cli.host {
        config.app.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.app.server.port = port;
    }
    config.validate().context("validating configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging(LogFormat::from_env());

    let cli = Cli::parse();
    let config = match load_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Configuration loaded");

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, keeps the bind error readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
