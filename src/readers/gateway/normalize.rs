use readingsdb::Measurements;
use serde_json::Value;

use super::driver::{DriverField, INFLOW, OUTFLOW, STORAGE_VOLUME, WATER_LEVEL};
use super::envelope::StationRecord;

/// Stand-in for any value the source could not supply
pub const MISSING_VALUE: f64 = 0.0;

/// Converts a source record into measurements.
///
/// Raw storage is divided by `volume_scale`. Unavailable fields become
/// [`MISSING_VALUE`]; this never fails.
pub fn normalize(record: &StationRecord, volume_scale: f64) -> Measurements {
    Measurements {
        water_level: field_value(record, WATER_LEVEL),
        inflow: field_value(record, INFLOW),
        outflow: field_value(record, OUTFLOW),
        storage_volume: field_value(record, STORAGE_VOLUME) / volume_scale,
    }
}

fn field_value(record: &StationRecord, field: DriverField) -> f64 {
    match numeric(record.get(field.column)) {
        Some(value) => {
            log::trace!("{}: {} {}", field.description, value, field.unit);
            value
        }
        None => {
            log::debug!("{} ({}) unavailable", field.description, field.column);
            MISSING_VALUE
        }
    }
}

/// Numbers pass through; strings are parsed as plain decimals. Nulls, blanks,
/// dash placeholders, garbage and non-finite values yield `None`.
pub fn numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.chars().all(|c| c == '-') {
        return None;
    }
    s.parse::<f64>().ok()
}
