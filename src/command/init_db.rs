use anyhow::Result;
use readingsdb::DbRW;

use crate::argsets::GlobalArgs;

pub fn init_db(global: GlobalArgs) -> Result<()> {
    let config = super::load_config(&global)?;
    let db_path = config.db_path();
    let db = DbRW::open(&db_path)?;
    log::info!(
        "Database at {} ready; {} readings stored",
        db_path.display(),
        db.count()?
    );
    Ok(())
}
