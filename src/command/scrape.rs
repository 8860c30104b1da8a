use anyhow::Result;
use readingsdb::DbRW;
use reservoirs::helpers::now_local;
use reservoirs::interfaces::fetch;
use reservoirs::readers::gateway;

use crate::argsets::GlobalArgs;

pub fn scrape(global: GlobalArgs) -> Result<()> {
    let config = super::load_config(&global)?;
    let db = DbRW::open(config.db_path())?;
    let fetcher = fetch::from_config(&config);

    let summary = gateway::run_scrape(&config, fetcher.as_ref(), &db, now_local())?;
    if summary.inserted == 0 {
        log::info!("No new readings stored");
    }
    Ok(())
}
