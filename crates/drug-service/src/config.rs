//! Environment configuration.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use drug_loader::DatasetConfig;
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_PORT: &str = "3000";
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_CSV_DIR: &str = "csv";

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds a value that does not parse.
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },
}

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on (`DRUG_PORT`).
    pub port: u16,
    /// Interface to bind (`DRUG_BIND`).
    pub bind: String,
    /// Directory holding the JSON datasets (`DRUG_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Directory of static pages (`DRUG_PUBLIC_DIR`).
    pub public_dir: PathBuf,
    /// Directory of source CSV files (`DRUG_CSV_DIR`).
    pub csv_dir: PathBuf,
    /// Reconvert even when JSON exists (`DRUG_CONVERT_FORCE`).
    pub force_convert: bool,
    /// Dataset file names.
    pub datasets: DatasetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind: DEFAULT_BIND.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            force_convert: false,
            datasets: DatasetConfig::default(),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let force: String = try_load(&lookup, "DRUG_CONVERT_FORCE", "false")?;

        Ok(Self {
            port: try_load(&lookup, "DRUG_PORT", DEFAULT_PORT)?,
            bind: try_load(&lookup, "DRUG_BIND", DEFAULT_BIND)?,
            data_dir: try_load(&lookup, "DRUG_DATA_DIR", DEFAULT_DATA_DIR)?,
            public_dir: try_load(&lookup, "DRUG_PUBLIC_DIR", DEFAULT_PUBLIC_DIR)?,
            csv_dir: try_load(&lookup, "DRUG_CSV_DIR", DEFAULT_CSV_DIR)?,
            force_convert: matches!(force.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
            datasets: DatasetConfig::default(),
        })
    }

    /// Socket address string to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
