use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use serde::Serialize;
use thiserror::Error;

mod maintenance;

pub use maintenance::{DedupeKey, ScaleCorrection};

const TABLENAME: &str = "reservoir_data";
const READING_COLUMNS: &str = "name, record_time, water_level, inflow, outflow, capacity_level";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// The four tracked values of a reading. Comparison is exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Measurements {
    pub water_level: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub storage_volume: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reading {
    pub name: String,
    pub observed_at: NaiveDateTime,
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl Reading {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        // Rows merged from older databases may carry NULL measurements
        let value = |idx: usize| -> rusqlite::Result<f64> {
            Ok(row.get::<_, Option<f64>>(idx)?.unwrap_or_default())
        };
        Ok(Reading {
            name: row.get(0)?,
            observed_at: row.get(1)?,
            measurements: Measurements {
                water_level: value(2)?,
                inflow: value(3)?,
                outflow: value(4)?,
                storage_volume: value(5)?,
            },
        })
    }
}

pub struct AccessRO;
pub struct AccessRW;

pub struct Db<AccessTag>(Connection, AccessTag);

pub type DbRW = Db<AccessRW>;
pub type DbRO = Db<AccessRO>;

// Methods common to read-only and read-write connections
impl<AccessTag> Db<AccessTag> {
    /// Most recent reading for exactly this station name.
    pub fn latest_for_station(&self, name: &str) -> Result<Option<Reading>, StoreError> {
        self.0
            .query_row(
                &format!(
                    "SELECT {READING_COLUMNS} FROM '{TABLENAME}' WHERE name = ?1
                    ORDER BY record_time DESC, id DESC LIMIT 1"
                ),
                [name],
                Reading::from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All readings of a station, oldest first.
    pub fn readings_for_station(&self, name: &str) -> Result<Vec<Reading>, StoreError> {
        let mut stmt = self.0.prepare(&format!(
            "SELECT {READING_COLUMNS} FROM '{TABLENAME}' WHERE name = ?1
            ORDER BY record_time ASC, id ASC"
        ))?;
        let readings = stmt
            .query_map([name], Reading::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(readings)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.0
            .query_row(&format!("SELECT COUNT(*) FROM '{TABLENAME}'"), [], |r| {
                r.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .map_err(Into::into)
    }
}

// Methods specific to read-only connection
impl DbRO {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        log::debug!("Opening {} in read-only mode", path.as_ref().display());
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Db(connection, AccessRO))
    }
}

// Methods specific to read-write connection
impl DbRW {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        log::debug!("Opening {} in read-write mode", path.as_ref().display());
        // Create directory for DB if it doesn't already exist
        std::fs::create_dir_all(path.as_ref().parent().unwrap_or(Path::new("")))?;
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self, StoreError> {
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS '{TABLENAME}' (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                record_time DATETIME NOT NULL,
                water_level REAL,
                inflow REAL,
                outflow REAL,
                capacity_level REAL
                )"
            ),
            [],
        )?;
        Ok(Db(connection, AccessRW))
    }

    /// Appends a reading. Existing rows are never touched.
    pub fn insert(&self, reading: &Reading) -> Result<(), StoreError> {
        let mut stmt = self.0.prepare_cached(&format!(
            "INSERT INTO '{TABLENAME}' ({READING_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ))?;
        let m = &reading.measurements;
        stmt.execute(params![
            reading.name,
            reading.observed_at,
            m.water_level,
            m.inflow,
            m.outflow,
            m.storage_volume
        ])?;
        log::trace!("Inserted: {:?}", reading);
        Ok(())
    }
}
