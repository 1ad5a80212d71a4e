//! Configuration file loading.
//!
//! Settings live in a TOML file:
//!
//! ```toml
//! [render]
//! parenthesize_groups = false
//!
//! [log]
//! level = "warn"
//! ```
//!
//! Lookup order: an explicit path, `./mongo2sql.toml`, then
//! `<config dir>/mongo2sql/config.toml`. A missing default file means
//! defaults; a missing explicit file is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::transpiler::RenderOptions;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mongo2sql.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// A `tracing_subscriber::EnvFilter` directive, e.g. `warn` or `mongo2sql=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> QueryResult<Self> {
        toml::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Load a config from the given file.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| QueryError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config from `explicit`, or the first default location that exists.
    pub fn load(explicit: Option<&Path>) -> QueryResult<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        for path in default_paths() {
            if path.is_file() {
                debug!(path = %path.display(), "loading config");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("mongo2sql").join("config.toml"));
    }
    paths
}
