//! Unwrapping of gateway responses.
//!
//! The gateway wraps its payload twice: the outer object's `data` member is a
//! string that itself contains JSON. The middle layer must stay string-typed;
//! an object there means the upstream format changed.

use serde_json::{Map, Value};
use thiserror::Error;

use super::driver::{DATA_KEY, LIST_PATH, STATION_KEY};

pub type StationRecord = Map<String, Value>;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed response body: {0}")]
    Outer(#[source] serde_json::Error),
    #[error("response has no 'data' string")]
    MissingData,
    #[error("malformed 'data' payload: {0}")]
    Inner(#[source] serde_json::Error),
}

/// Finds the record for `station` in a raw response body.
///
/// `Ok(None)` means the response was well formed but holds no record with
/// exactly this name.
pub fn decode_station_record(
    body: &str,
    station: &str,
) -> Result<Option<StationRecord>, DecodeError> {
    let inner = decode_inner(body)?;
    Ok(record_list(&inner)
        .iter()
        .filter_map(Value::as_object)
        .find(|record| record.get(STATION_KEY).and_then(Value::as_str) == Some(station))
        .cloned())
}

fn decode_inner(body: &str) -> Result<Value, DecodeError> {
    let outer: Value = serde_json::from_str(body).map_err(DecodeError::Outer)?;
    let data = outer
        .get(DATA_KEY)
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingData)?;
    serde_json::from_str(data).map_err(DecodeError::Inner)
}

// A station without data may come back without the list at all
fn record_list(inner: &Value) -> &[Value] {
    LIST_PATH
        .iter()
        .try_fold(inner, |value, key| value.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
