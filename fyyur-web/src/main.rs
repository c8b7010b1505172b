//! fyyur-web - listings for live music venues, artists and shows
//!
//! Configuration resolves CLI > environment > TOML file > compiled defaults.

use anyhow::{Context, Result};
use clap::Parser;
use fyyur_common::config::{CliOverrides, ServerConfig};
use fyyur_common::db::init_database;
use fyyur_web::{build_router, AppState};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fyyur-web", version, about = "Live music venue and artist listings")]
struct Args {
    /// Folder holding fyyur.db
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// TOML config file (default: ~/.config/fyyur/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            root_folder: args.root_folder,
            bind: args.bind,
            port: args.port,
            log_level: args.log_level,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = CliOverrides::from(args);

    let config = ServerConfig::resolve(&overrides).context("Failed to resolve configuration")?;

    config.ensure_root_folder()?;

    // Tracing starts after resolution so the configured level applies.
    // RUST_LOG wins over it for the console; error.log always records INFO and up.
    let default_filter = format!("fyyur_web={0},fyyur_common={0},tower_http={0}", config.log_level);
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_path = config.error_log_path();
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path);
    let (file_layer, log_file_error) = match log_file {
        Ok(file) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::INFO);
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(console_filter))
        .with(file_layer)
        .init();

    if let Some(e) = log_file_error {
        warn!("Logging to console only, cannot open {}: {}", log_path.display(), e);
    }

    info!(
        "Starting Fyyur (fyyur-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    info!(
        "Root folder: {} (log level {})",
        config.root_folder.display(),
        config.log_level
    );

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    let app = build_router(AppState::new(pool));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("fyyur-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("fyyur-web stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
