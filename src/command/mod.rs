mod init_db;
mod latest;
mod maintenance;
mod scrape;

pub use init_db::init_db;
pub use latest::latest;
pub use maintenance::{dedupe, fix_scale, merge};
pub use scrape::scrape;

use anyhow::Result;
use reservoirs::Config;

use crate::argsets::GlobalArgs;

fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = Config::load(global.config.as_deref())?;
    if let Some(db) = &global.db {
        config.db_path = Some(db.clone());
    }
    Ok(config)
}
