use std::path::PathBuf;

use anyhow::{anyhow, Result};
use readingsdb::{DedupeKey, ScaleCorrection};

pub enum Command {
    Scrape,
    InitDb,
    Latest,
    Dedupe(DedupeArgs),
    FixScale(FixScaleArgs),
    Merge(MergeArgs),
}

/// Options accepted by every subcommand
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

pub struct DedupeArgs {
    pub key: DedupeKey,
}

pub struct FixScaleArgs {
    pub correction: ScaleCorrection,
}

pub struct MergeArgs {
    pub other: PathBuf,
    pub correction: Option<ScaleCorrection>,
}

pub fn parse_dedupe_key(s: &str) -> Result<DedupeKey, String> {
    match s {
        "measurements" => Ok(DedupeKey::Measurements),
        "timestamp" => Ok(DedupeKey::Timestamp),
        other => Err(format!(
            "'{other}' is not one of 'measurements', 'timestamp'"
        )),
    }
}

/// Builds a correction from command-line values, falling back to the
/// defaults for whichever is absent.
pub fn scale_correction(factor: Option<f64>, below: Option<f64>) -> Result<ScaleCorrection> {
    let fallback = ScaleCorrection::default();
    let correction = ScaleCorrection {
        factor: factor.unwrap_or(fallback.factor),
        below: below.unwrap_or(fallback.below),
    };
    if !correction.is_valid() {
        return Err(anyhow!(
            "Scale factor and threshold must be positive numbers, got {} and {}",
            correction.factor,
            correction.below
        ));
    }
    Ok(correction)
}
