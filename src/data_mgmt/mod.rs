mod upsert;

pub use upsert::{upsert_reading, UpsertOutcome};
