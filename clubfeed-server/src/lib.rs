//! Command-line entry points for the Clubfeed browse service.
//!
//! `clubfeed init` creates the SQLite schema the service reads from, and
//! `clubfeed serve` exposes the ranking engine over HTTP:
//!
//! - `POST /clubs/browse`, `POST /events/browse`, `POST /posts/browse`
//! - `GET /health`
//!
//! Options layer CLI flags over configuration files and `CLUBFEED_*`
//! environment variables. Logging goes through `tracing`; set `RUST_LOG` to
//! adjust verbosity.
#![forbid(unsafe_code)]

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use clubfeed_core::SqliteStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod fs;
mod routes;
mod state;
mod viewer;

pub use error::{ApiError, CliError};
pub use routes::{BrowsePage, BrowseRequest, router};
pub use state::AppState;
pub use viewer::VIEWER_HEADER;

use config::{InitArgs, InitConfig, ServeArgs, ServeConfig};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_BIND: &str = "bind";
pub(crate) const ARG_DEFAULT_LIMIT: &str = "default-limit";
pub(crate) const ENV_SERVE_DATABASE: &str = "CLUBFEED_CMDS_SERVE_DATABASE";
pub(crate) const ENV_INIT_DATABASE: &str = "CLUBFEED_CMDS_INIT_DATABASE";
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Run the Clubfeed CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_tracing();
    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Init(args) => run_init(args).map(|_| ()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "clubfeed",
    about = "Personalised browse ranking for clubs, events and posts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the browse endpoints over HTTP.
    Serve(ServeArgs),
    /// Create the SQLite schema the service reads from.
    Init(InitArgs),
}

/// Install the global `tracing` subscriber, honouring `RUST_LOG`.
///
/// `log` records from the library crates are forwarded to the same
/// subscriber. Repeated calls are ignored.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = resolve_serve_config(args)?;
    let store = SqliteStore::open(config.database.as_std_path())?;
    tracing::info!(database = %config.database, "opened store");
    let state = AppState::from_store(store, config.default_limit);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(serve(config.bind, state))
}

pub(crate) fn resolve_serve_config(args: ServeArgs) -> Result<ServeConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn run_init(args: InitArgs) -> Result<InitConfig, CliError> {
    let config = args.into_config()?;
    fs::ensure_parent_dir(&config.database).map_err(|source| CliError::CreateParentDir {
        path: config.database.clone(),
        source,
    })?;
    SqliteStore::initialise_schema(config.database.as_std_path()).map_err(|source| {
        CliError::InitialiseSchema {
            path: config.database.clone(),
            source,
        }
    })?;
    tracing::info!(database = %config.database, "schema initialised");
    Ok(config)
}

async fn serve(addr: SocketAddr, state: AppState) -> Result<(), CliError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Bind { addr, source })?;
    tracing::info!(%addr, default_limit = state.default_limit(), "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CliError::Serve)?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}

#[cfg(test)]
mod tests;
