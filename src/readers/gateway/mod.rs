use chrono::NaiveDateTime;
use itertools::Itertools;
use readingsdb::{DbRW, Measurements, Reading, StoreError};
use thiserror::Error;

use crate::config::Config;
use crate::data_mgmt::{upsert_reading, UpsertOutcome};
use crate::interfaces::fetch::{FetchError, Fetcher};

pub mod driver;
pub mod envelope;
pub mod normalize;

pub use envelope::DecodeError;

/// Why one station produced no reading in a run. Never fatal to the run.
#[derive(Error, Debug)]
pub enum StationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("gateway answered with status {0}")]
    Status(u16),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("no record for this station in the response")]
    NoDataFound,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub inserted: usize,
    pub unchanged: usize,
    pub no_data: usize,
    pub failed: usize,
}

/// Queries every configured station once and stores what changed.
///
/// Every stored row carries `run_time`. Station-level failures are logged and
/// counted; only a store failure ends the run early.
pub fn run_scrape(
    config: &Config,
    fetcher: &dyn Fetcher,
    db: &DbRW,
    run_time: NaiveDateTime,
) -> Result<RunSummary, StoreError> {
    let mut summary = RunSummary::default();
    let stations: Vec<&String> = config.stations.iter().unique().collect();
    log::info!("Querying {} stations", stations.len());

    for station in stations {
        let measurements = match read_station(fetcher, station, config.volume_scale) {
            Ok(m) => m,
            Err(StationError::NoDataFound) => {
                log::warn!("{station}: no data in response; skipping");
                summary.no_data += 1;
                continue;
            }
            Err(e @ StationError::Decode(_)) => {
                log::warn!("{station}: could not decode response: {e}");
                summary.failed += 1;
                continue;
            }
            Err(e) => {
                log::error!("{station}: query failed: {e}");
                summary.failed += 1;
                continue;
            }
        };

        let reading = Reading {
            name: station.clone(),
            observed_at: run_time,
            measurements,
        };
        match upsert_reading(db, &reading)? {
            UpsertOutcome::Inserted => summary.inserted += 1,
            UpsertOutcome::Unchanged => summary.unchanged += 1,
        }
    }

    log::info!(
        "Finished run at {}: {} inserted, {} unchanged, {} without data, {} failed",
        run_time,
        summary.inserted,
        summary.unchanged,
        summary.no_data,
        summary.failed
    );
    Ok(summary)
}

fn read_station(
    fetcher: &dyn Fetcher,
    station: &str,
    volume_scale: f64,
) -> Result<Measurements, StationError> {
    log::debug!("{station}: querying");
    let payload = fetcher.fetch(station)?;
    if !payload.is_ok() {
        return Err(StationError::Status(payload.status));
    }
    log::trace!("{station}: response {}", payload.body);

    let record = envelope::decode_station_record(&payload.body, station)?
        .ok_or(StationError::NoDataFound)?;
    Ok(normalize::normalize(&record, volume_scale))
}
