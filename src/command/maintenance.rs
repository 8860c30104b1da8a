use anyhow::{anyhow, Result};
use readingsdb::DbRW;

use crate::argsets::{DedupeArgs, FixScaleArgs, GlobalArgs, MergeArgs};

pub fn dedupe(global: GlobalArgs, args: DedupeArgs) -> Result<()> {
    let config = super::load_config(&global)?;
    let db = DbRW::open(config.db_path())?;

    let before = db.count()?;
    log::info!("Database holds {before} readings");
    let removed = db.remove_duplicates(args.key)?;
    log::info!(
        "Removed {removed} duplicate readings; {} unique readings remain",
        db.count()?
    );
    Ok(())
}

pub fn fix_scale(global: GlobalArgs, args: FixScaleArgs) -> Result<()> {
    let config = super::load_config(&global)?;
    let db = DbRW::open(config.db_path())?;

    let c = args.correction;
    log::info!(
        "Multiplying storage volumes in (0, {}) by {}",
        c.below,
        c.factor
    );
    let changed = db.correct_scale(c)?;
    log::info!("Corrected {changed} readings");
    Ok(())
}

pub fn merge(global: GlobalArgs, args: MergeArgs) -> Result<()> {
    let config = super::load_config(&global)?;
    let db_path = config.db_path();
    if !args.other.is_file() {
        return Err(anyhow!("No database file at {}", args.other.display()));
    }
    if args.other.canonicalize()? == db_path.canonicalize().unwrap_or_default() {
        return Err(anyhow!("Cannot merge a database into itself"));
    }

    let db = DbRW::open(&db_path)?;
    log::info!(
        "Merging readings from {} into {}",
        args.other.display(),
        db_path.display()
    );
    let copied = db.merge_from(&args.other, args.correction)?;
    log::info!("Merged {copied} readings; {} readings stored", db.count()?);
    Ok(())
}
