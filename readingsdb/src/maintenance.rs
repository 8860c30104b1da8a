//! One-shot repair procedures that rewrite history directly.
//!
//! None of these run as part of a scrape; they exist to clean up databases
//! damaged by earlier pipeline generations.

use std::path::Path;

use rusqlite::params;

use crate::{DbRW, StoreError, READING_COLUMNS, TABLENAME};

const ATTACHED_ALIAS: &str = "other";

/// Which columns identify two rows as duplicates of each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupeKey {
    /// Station plus all four measurements
    Measurements,
    /// Station plus capture time
    Timestamp,
}

impl DedupeKey {
    fn group_by(&self) -> &'static str {
        match self {
            DedupeKey::Measurements => "name, water_level, inflow, outflow, capacity_level",
            DedupeKey::Timestamp => "name, record_time",
        }
    }
}

/// Multiply storage volumes by `factor` where `0 < capacity_level < below`.
///
/// Such magnitudes only appear when the raw figure was divided by the wrong
/// unit scale at capture time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleCorrection {
    pub factor: f64,
    pub below: f64,
}

impl ScaleCorrection {
    /// Both values must be finite and positive; anything else would zero or
    /// NULL the rows it touches.
    pub fn is_valid(&self) -> bool {
        [self.factor, self.below]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for ScaleCorrection {
    fn default() -> Self {
        ScaleCorrection {
            factor: 100.0,
            below: 1.0,
        }
    }
}

impl DbRW {
    /// Deletes all but the lowest-id row of every duplicate group.
    /// Returns the number of rows removed.
    pub fn remove_duplicates(&self, key: DedupeKey) -> Result<usize, StoreError> {
        let removed = self.0.execute(
            &format!(
                "DELETE FROM '{TABLENAME}' WHERE id NOT IN (
                SELECT MIN(id) FROM '{TABLENAME}' GROUP BY {}
                )",
                key.group_by()
            ),
            [],
        )?;
        log::debug!("Removed {removed} duplicate rows grouped by {key:?}");
        Ok(removed)
    }

    /// Applies `correction` in place. Returns the number of rows changed.
    pub fn correct_scale(&self, correction: ScaleCorrection) -> Result<usize, StoreError> {
        let changed = self.0.execute(
            &format!(
                "UPDATE '{TABLENAME}' SET capacity_level = capacity_level * ?1
                WHERE capacity_level > 0 AND capacity_level < ?2"
            ),
            params![correction.factor, correction.below],
        )?;
        Ok(changed)
    }

    /// Copies every reading of another database into this one, assigning new
    /// ids. The optional correction is applied to the copied rows only.
    /// Returns the number of rows copied.
    pub fn merge_from(
        &self,
        other: impl AsRef<Path>,
        correction: Option<ScaleCorrection>,
    ) -> Result<usize, StoreError> {
        let other_path = other.as_ref().to_string_lossy().into_owned();
        self.0.execute(
            &format!("ATTACH DATABASE ?1 AS {ATTACHED_ALIAS}"),
            [&other_path],
        )?;

        let copied = self.copy_attached(correction);

        // Detach regardless of how the copy went, but report the copy error first
        let detached = self.0.execute(&format!("DETACH DATABASE {ATTACHED_ALIAS}"), []);
        let copied = copied?;
        detached?;
        Ok(copied)
    }

    fn copy_attached(&self, correction: Option<ScaleCorrection>) -> Result<usize, StoreError> {
        let copied = match correction {
            Some(c) => self.0.execute(
                &format!(
                    "INSERT INTO main.'{TABLENAME}' ({READING_COLUMNS})
                    SELECT name, record_time, water_level, inflow, outflow,
                    CASE WHEN capacity_level > 0 AND capacity_level < ?2
                        THEN capacity_level * ?1 ELSE capacity_level END
                    FROM {ATTACHED_ALIAS}.'{TABLENAME}'"
                ),
                params![c.factor, c.below],
            )?,
            None => self.0.execute(
                &format!(
                    "INSERT INTO main.'{TABLENAME}' ({READING_COLUMNS})
                    SELECT {READING_COLUMNS} FROM {ATTACHED_ALIAS}.'{TABLENAME}'"
                ),
                [],
            )?,
        };
        Ok(copied)
    }
}
