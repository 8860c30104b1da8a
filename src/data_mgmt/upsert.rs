use readingsdb::{DbRW, Reading, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Unchanged,
}

/// Appends `reading` unless the station's latest stored reading carries
/// exactly the same measurements.
///
/// Equality is exact on the parsed floats. The source repeats byte-identical
/// values between updates; if it ever varies its trailing precision this will
/// write rows that differ only in formatting.
pub fn upsert_reading(db: &DbRW, reading: &Reading) -> Result<UpsertOutcome, StoreError> {
    let prior = db.latest_for_station(&reading.name)?;

    if let Some(prior) = &prior {
        if prior.measurements == reading.measurements {
            log::info!(
                "{}: unchanged since {}; skipping",
                reading.name,
                prior.observed_at
            );
            return Ok(UpsertOutcome::Unchanged);
        }
        if prior.observed_at > reading.observed_at {
            log::warn!(
                "{}: new reading at {} predates stored reading at {}",
                reading.name,
                reading.observed_at,
                prior.observed_at
            );
        }
    }

    db.insert(reading)?;
    log::info!(
        "{}: stored water level {} m, storage {}",
        reading.name,
        reading.measurements.water_level,
        reading.measurements.storage_volume
    );
    Ok(UpsertOutcome::Inserted)
}
