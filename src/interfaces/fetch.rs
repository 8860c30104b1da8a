use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Config, Source};
use crate::helpers::base_path;

use super::{CaptureDirFetcher, HttpFetcher};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] ureq::Error),
    #[error("no captured response at {0}")]
    NotCaptured(PathBuf),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("could not build request: {0}")]
    Request(#[from] serde_json::Error),
}

/// Body of one gateway response, as captured, plus its HTTP status.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPayload {
    pub status: u16,
    pub body: String,
}

impl RawPayload {
    pub fn ok(body: impl Into<String>) -> Self {
        RawPayload {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Runs one station query against the dashboard and hands back the raw
/// response. Implementations make a single attempt.
pub trait Fetcher {
    fn fetch(&self, station: &str) -> Result<RawPayload, FetchError>;
}

pub fn from_config(config: &Config) -> Box<dyn Fetcher> {
    match &config.source {
        Source::CaptureDir { path } => {
            let dir = path.clone().unwrap_or_else(base_path::default_capture_dir);
            log::info!("Reading captured responses from {}", dir.display());
            Box::new(CaptureDirFetcher::new(dir))
        }
        Source::Http {
            gateway_url,
            request_template,
            headers,
        } => {
            log::info!("Querying gateway at {gateway_url}");
            Box::new(HttpFetcher::new(
                gateway_url,
                request_template,
                headers.clone(),
                &config.target_url,
                config.fetch_timeout(),
            ))
        }
    }
}
