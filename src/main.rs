//! Deep Research API server
//!
//! Binds the research facade to a host/port and serves it until Ctrl+C or
//! SIGTERM. With `--reload`, SIGHUP drains the server, re-reads the
//! configuration, and serves again.

use anyhow::Context;
use clap::Parser;
use deep_research_api::{api, config::Config, error::BootstrapError, state::AppContext};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Run the Deep Research HTTP API
#[derive(Parser, Debug)]
#[command(name = "deep-research-api", version, about)]
struct Cli {
    /// Host address to bind [default: 127.0.0.1, or $HOST]
    #[arg(long)]
    host: Option<String>,

    /// Port to bind [default: 8000, or $PORT]
    #[arg(long)]
    port: Option<u16>,

    /// Reload configuration and restart the server on SIGHUP
    #[arg(long)]
    reload: bool,

    /// TOML file overlaying the environment configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Stop,
    Reload,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {
            info!("Server shutdown complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            eprintln!("{:#}", err);
            match err.downcast_ref::<BootstrapError>() {
                Some(bootstrap) => ExitCode::from(bootstrap.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// Environment, then config file, then command-line flags
fn load_config(cli: &Cli) -> Result<Config, BootstrapError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;

    loop {
        info!("Configuration loaded: {:?}", config);

        let addr = config.resolve_addr().await?;
        let app = api::router(AppContext::from_config(&config).shared());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| BootstrapError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        info!("🚀 Server running on http://{}", addr);
        info!("Version: {}", env!("CARGO_PKG_VERSION"));

        let (reason_tx, reason_rx) = oneshot::channel();
        let reload = cli.reload;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let reason = shutdown_signal(reload).await;
                let _ = reason_tx.send(reason);
            })
            .await
            .context("server error")?;

        match reason_rx.await.unwrap_or(ShutdownReason::Stop) {
            ShutdownReason::Stop => return Ok(()),
            ShutdownReason::Reload => match load_config(&cli) {
                Ok(fresh) => {
                    info!("Configuration reloaded");
                    config = fresh;
                }
                Err(e) => warn!(error = %e, "Reload failed, keeping previous configuration"),
            },
        }
    }
}

/// Wait for Ctrl+C, SIGTERM, or (with `reload`) SIGHUP
async fn shutdown_signal(reload: bool) -> ShutdownReason {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = unix_signal(tokio::signal::unix::SignalKind::terminate());

    #[cfg(unix)]
    let hangup = async {
        if reload {
            unix_signal(tokio::signal::unix::SignalKind::hangup()).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    #[cfg(not(unix))]
    let hangup = {
        let _ = reload;
        std::future::pending::<()>()
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
            ShutdownReason::Stop
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
            ShutdownReason::Stop
        },
        _ = hangup => {
            info!("Received SIGHUP, reloading...");
            ShutdownReason::Reload
        },
    }
}

#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!(error = %e, "Failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "deep-research-api",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--reload",
        ]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9000));
        assert!(cli.reload);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["deep-research-api"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(!cli.reload);
    }

    #[test]
    fn test_missing_config_file_exits_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "deep-research-api".to_string(),
            "--config".to_string(),
            dir.path().join("absent.toml").display().to_string(),
        ]);
        let err = load_config(&cli).unwrap_err();
        assert!(matches!(err, BootstrapError::ConfigNotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
