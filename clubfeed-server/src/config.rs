//! Layered configuration for the `serve` and `init` subcommands.

use std::net::SocketAddr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BIND, ARG_DATABASE, ARG_DEFAULT_LIMIT, CliError, DEFAULT_BIND, ENV_INIT_DATABASE,
    ENV_SERVE_DATABASE, fs,
};

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "serve",
    long_about = "Serve the browse endpoints for clubs, events and posts. \
                 Options can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Serve the browse endpoints over HTTP"
)]
#[ortho_config(prefix = "CLUBFEED")]
pub(crate) struct ServeArgs {
    /// Path to the SQLite database created by `clubfeed init`.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Socket address to listen on (default 127.0.0.1:8080).
    #[arg(long = ARG_BIND, value_name = "addr")]
    #[serde(default)]
    pub(crate) bind: Option<String>,
    /// Limit applied when a request omits one; 0 returns everything.
    #[arg(long = ARG_DEFAULT_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) default_limit: Option<usize>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) bind: SocketAddr,
    pub(crate) default_limit: usize,
}

impl ServeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.database, ARG_DATABASE)
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SERVE_DATABASE,
        })?;
        let raw_bind = args.bind.unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind = raw_bind
            .parse()
            .map_err(|err: std::net::AddrParseError| CliError::InvalidArgument {
                field: ARG_BIND,
                value: raw_bind.clone(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            database,
            bind,
            default_limit: args.default_limit.unwrap_or(0),
        })
    }
}

/// CLI arguments for the `init` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "init",
    long_about = "Create the clubs, events, posts, membership and interest \
                 tables in a SQLite database. Existing tables are left as \
                 they are.",
    about = "Create the SQLite schema"
)]
#[ortho_config(prefix = "CLUBFEED")]
pub(crate) struct InitArgs {
    /// Path of the SQLite database to create or update.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl InitArgs {
    pub(crate) fn into_config(self) -> Result<InitConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InitConfig::try_from(merged)
    }
}

/// Resolved `init` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InitConfig {
    pub(crate) database: Utf8PathBuf,
}

impl TryFrom<InitArgs> for InitConfig {
    type Error = CliError;

    fn try_from(args: InitArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_INIT_DATABASE,
        })?;
        Ok(Self { database })
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
pub(crate) fn serve_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(merged)
}
