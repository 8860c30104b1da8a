use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::fetch::{FetchError, Fetcher, RawPayload};

const CAPTURE_EXT: &str = ".json";

/// Serves response bodies that a browser session saved to disk, one
/// `<station>.json` per station. A captured body always counts as status 200.
pub struct CaptureDirFetcher {
    dir: PathBuf,
}

impl CaptureDirFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CaptureDirFetcher { dir: dir.into() }
    }

    fn capture_path(&self, station: &str) -> PathBuf {
        self.dir.join(format!("{station}{CAPTURE_EXT}"))
    }
}

impl Fetcher for CaptureDirFetcher {
    fn fetch(&self, station: &str) -> Result<RawPayload, FetchError> {
        let path = self.capture_path(station);
        match fs::read_to_string(&path) {
            Ok(body) => Ok(RawPayload::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotCaptured(path)),
            Err(e) => Err(e.into()),
        }
    }
}
