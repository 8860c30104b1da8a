mod argsets;
mod command;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;
use readingsdb::DedupeKey;
use reservoirs::constants::{defaults, envvars};

use argsets::{Command, DedupeArgs, FixScaleArgs, GlobalArgs, MergeArgs};

const CMD_SCRAPE: &str = "scrape";
const CMD_INIT_DB: &str = "init-db";
const CMD_DEDUPE: &str = "dedupe";
const CMD_FIX_SCALE: &str = "fix-scale";
const CMD_MERGE: &str = "merge";
const CMD_LATEST: &str = "latest";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let subcommand = args.subcommand()?;
    let global = GlobalArgs {
        config: args.opt_value_from_str::<_, PathBuf>("--config")?,
        db: args.opt_value_from_str::<_, PathBuf>("--db")?,
    };

    let cmd = match subcommand.as_deref() {
        Some(CMD_SCRAPE) => Command::Scrape,
        Some(CMD_INIT_DB) => Command::InitDb,
        Some(CMD_LATEST) => Command::Latest,
        Some(CMD_DEDUPE) => Command::Dedupe(DedupeArgs {
            key: args
                .opt_value_from_fn("--by", argsets::parse_dedupe_key)?
                .unwrap_or(DedupeKey::Measurements),
        }),
        Some(CMD_FIX_SCALE) => Command::FixScale(FixScaleArgs {
            correction: argsets::scale_correction(
                args.opt_value_from_str("--factor")?,
                args.opt_value_from_str("--below")?,
            )?,
        }),
        Some(CMD_MERGE) => {
            let factor: Option<f64> = args.opt_value_from_str("--scale")?;
            let below: Option<f64> = args.opt_value_from_str("--below")?;
            let correction = match (factor, below) {
                (None, None) => None,
                (None, Some(_)) => {
                    return Err(anyhow!("--below is only valid together with --scale"))
                }
                (Some(factor), below) => Some(argsets::scale_correction(Some(factor), below)?),
            };
            Command::Merge(MergeArgs {
                correction,
                other: args.free_from_str()?,
            })
        }
        _ => {
            return Err(anyhow!(
                "Subcommand must be one of 'scrape', 'init-db', 'dedupe', 'fix-scale', 'merge', 'latest'"
            ))
        }
    };

    let leftover = args.finish();
    if !leftover.is_empty() {
        return Err(anyhow!("Unexpected arguments: {:?}", leftover));
    }

    match cmd {
        Command::Scrape => command::scrape(global),
        Command::InitDb => command::init_db(global),
        Command::Latest => command::latest(global),
        Command::Dedupe(args) => command::dedupe(global, args),
        Command::FixScale(args) => command::fix_scale(global, args),
        Command::Merge(args) => command::merge(global, args),
    }
}
