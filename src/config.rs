use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{defaults, envvars};
use crate::helpers::base_path;

/// Marker replaced by the JSON-escaped station name in HTTP request templates
pub const STATION_PLACEHOLDER: &str = "{station}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid gateway URL: {0}")]
    GatewayUrl(#[from] url::ParseError),
}

/// Where raw gateway responses come from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// Response bodies saved by an external browser session, one
    /// `<station>.json` per station
    CaptureDir { path: Option<PathBuf> },
    /// Direct POST against the dashboard's gateway endpoint
    Http {
        gateway_url: String,
        request_template: String,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
}

impl Default for Source {
    fn default() -> Self {
        Source::CaptureDir { path: None }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target_url: String,
    pub stations: Vec<String>,
    pub volume_scale: f64,
    pub db_path: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
    pub source: Source,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_url: defaults::TARGET_URL.into(),
            stations: defaults::STATIONS.iter().map(|s| s.to_string()).collect(),
            volume_scale: defaults::VOLUME_SCALE,
            db_path: None,
            fetch_timeout_secs: defaults::FETCH_TIMEOUT.as_secs(),
            source: Source::default(),
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(config_raw: &str) -> Result<Self, Self::Err> {
        let config = serde_json::from_str::<Config>(config_raw)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Resolves the configuration for one invocation.
    ///
    /// The file is taken from `explicit`, else `RESERVOIRS_CONFIG`, else
    /// `config.json` in the data directory if one exists; with none of these
    /// the built-in defaults apply. `RESERVOIRS_DB` overrides the database path.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(envvars::CONFIG).map(PathBuf::from))
            .or_else(|| Some(base_path::default_config_path()).filter(|p| p.is_file()));

        let mut config = match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                let raw = fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                raw.parse::<Config>()?
            }
            None => {
                log::debug!("No config file found; using defaults");
                Config::default()
            }
        };

        if let Some(db_path) = env::var_os(envvars::DB) {
            config.db_path = Some(db_path.into());
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.volume_scale.is_finite() && self.volume_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "volume_scale must be a positive number, got {}",
                self.volume_scale
            )));
        }
        if self.stations.is_empty() {
            return Err(ConfigError::Invalid("no stations configured".into()));
        }
        if self.stations.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid("blank station name".into()));
        }
        if let Source::Http {
            gateway_url,
            request_template,
            ..
        } = &self.source
        {
            url::Url::parse(gateway_url)?;
            if !request_template.contains(STATION_PLACEHOLDER) {
                return Err(ConfigError::Invalid(format!(
                    "request_template must contain {STATION_PLACEHOLDER}"
                )));
            }
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(base_path::default_db_path)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
