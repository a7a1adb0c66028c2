//! Error types emitted by the Clubfeed CLI and its HTTP handlers.
//!
//! Keep [`CliError`] reasonably small: startup helpers return
//! `Result<_, CliError>` throughout.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use camino::Utf8PathBuf;
use clubfeed_core::{SqliteStoreError, StoreError};
use serde_json::json;
use thiserror::Error;

/// Errors emitted by the Clubfeed CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option value could not be interpreted.
    #[error("invalid {field} value {value:?}: {reason}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The directory that should hold the database could not be created.
    #[error("failed to create parent directory for {path:?}: {source}")]
    CreateParentDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the store failed.
    #[error(transparent)]
    OpenStore(#[from] SqliteStoreError),
    /// Creating the schema failed.
    #[error("failed to initialise schema in {path:?}: {source}")]
    InitialiseSchema {
        path: Utf8PathBuf,
        #[source]
        source: SqliteStoreError,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The listener could not bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error.
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// Errors returned by the browse handlers.
///
/// Client mistakes map to `400`; store and task failures map to `500` with
/// the detail logged rather than returned.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not valid JSON for a browse request.
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
    /// The requested limit is negative.
    #[error("limit must be a non-negative integer, got {0}")]
    NegativeLimit(i64),
    /// A store read failed.
    #[error("failed to load browse inputs")]
    Store(#[source] StoreError),
    /// A blocking store read panicked or was cancelled.
    #[error("store read did not complete")]
    Task(#[source] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::NegativeLimit(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Store(source) => tracing::error!(error = %source, "store read failed"),
            Self::Task(source) => tracing::error!(error = %source, "store task failed"),
            Self::MalformedBody(_) | Self::NegativeLimit(_) => {
                tracing::debug!(error = %self, "rejected browse request");
            }
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
