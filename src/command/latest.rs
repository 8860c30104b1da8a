use anyhow::Result;
use itertools::Itertools;
use readingsdb::DbRO;

use crate::argsets::GlobalArgs;

/// Prints the latest stored reading of each configured station, one JSON
/// object per line.
pub fn latest(global: GlobalArgs) -> Result<()> {
    let config = super::load_config(&global)?;
    let db = DbRO::open(config.db_path())?;
    for station in config.stations.iter().unique() {
        match db.latest_for_station(station)? {
            Some(reading) => println!("{}", serde_json::to_string(&reading)?),
            None => log::warn!("{station}: no readings stored"),
        }
    }
    Ok(())
}
