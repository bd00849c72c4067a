//! Startup configuration: board size and tick interval.
//!
//! Sources, lowest precedence first: built-in defaults, a JSON file, then
//! environment variables. The binary applies its command-line flags last and
//! validates the result once more.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_INTERVAL_MS, MAX_BOARD_DIM, MIN_BOARD_DIM,
};

/// Environment variable naming a JSON config file.
pub const ENV_CONFIG_PATH: &str = "BLOCKFALL_CONFIG";
pub const ENV_COLS: &str = "BLOCKFALL_COLS";
pub const ENV_ROWS: &str = "BLOCKFALL_ROWS";
pub const ENV_TICK_MS: &str = "BLOCKFALL_TICK_MS";

const MAX_TICK_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidDimension {
        name: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("tick interval must be between 1 and {max}ms, got {value}ms")]
    InvalidTickInterval { value: u64, max: u64 },
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Board size and gravity interval, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GameConfig {
    pub cols: u8,
    pub rows: u8,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`, which maps a variable name to its value.
    /// Empty values are treated as unset.
    pub fn apply_env_with(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |var: &'static str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(|s| (var, s))
        };

        if let Some((var, v)) = get(ENV_COLS) {
            self.cols = v.parse().map_err(|_| ConfigError::InvalidEnv { var, value: v })?;
        }
        if let Some((var, v)) = get(ENV_ROWS) {
            self.rows = v.parse().map_err(|_| ConfigError::InvalidEnv { var, value: v })?;
        }
        if let Some((var, v)) = get(ENV_TICK_MS) {
            self.tick_interval_ms =
                v.parse().map_err(|_| ConfigError::InvalidEnv { var, value: v })?;
        }

        Ok(self)
    }

    /// Defaults, then `path` (or the file named by `BLOCKFALL_CONFIG`), then env.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(ENV_CONFIG_PATH)
            .ok()
            .filter(|s| !s.trim().is_empty());

        let base = match (path, from_env) {
            (Some(p), _) => Self::load(p)?,
            (None, Some(p)) => Self::load(Path::new(&p))?,
            (None, None) => Self::default(),
        };

        base.apply_env()?.validate()
    }

    /// Check that every catalog piece fits and the interval is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (name, value) in [("cols", self.cols), ("rows", self.rows)] {
            if !(MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&value) {
                return Err(ConfigError::InvalidDimension {
                    name,
                    value,
                    min: MIN_BOARD_DIM,
                    max: MAX_BOARD_DIM,
                });
            }
        }

        if self.tick_interval_ms == 0 || self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(ConfigError::InvalidTickInterval {
                value: self.tick_interval_ms,
                max: MAX_TICK_INTERVAL_MS,
            });
        }

        Ok(self)
    }
}
