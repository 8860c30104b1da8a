use std::ffi::OsStr;
use std::path::Path;

use assert_cmd::{assert::Assert, Command};
use predicates::prelude::*;
use readingsdb::{DbRO, Measurements};

mod stubs;

use stubs::payloads::{envelope, station_body, write_capture, write_config};

const STATIONS: [&str; 3] = ["二滩", "锦屏一级", "官地"];

fn scrape_assert(data_dir: impl AsRef<OsStr>, config: impl AsRef<OsStr>) -> Assert {
    let mut cmd = Command::cargo_bin("reservoirs").unwrap();
    cmd.env("RESERVOIRS_DATA_DIR", data_dir)
        .env_remove("RESERVOIRS_DB")
        .env_remove("RESERVOIRS_CONFIG")
        .arg("scrape")
        .arg("--config")
        .arg(config)
        .assert()
}

fn setup(data_dir: &Path) -> std::path::PathBuf {
    let captures = data_dir.join("captures");
    write_capture(&captures, "二滩", &station_body("二滩", "1190.22", "812", "790", "3310"));
    write_capture(&captures, "锦屏一级", &envelope(serde_json::json!([])));
    write_capture(&captures, "官地", &station_body("官地", "1328.5", "500", "480", "5820"));

    let config = data_dir.join("scrape.json");
    write_config(&config, &STATIONS, &captures);
    config
}

#[test]
fn scrape_from_captures_stores_stations_with_data() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = setup(tempdir.path());

    scrape_assert(tempdir.path(), &config)
        .success()
        .stderr(predicate::str::contains("锦屏一级: no data in response"));

    let db = DbRO::open(tempdir.path().join("reservoirs.db")).unwrap();
    assert_eq!(db.count().unwrap(), 2);
    assert_eq!(
        db.latest_for_station("官地").unwrap().unwrap().measurements,
        Measurements {
            water_level: 1328.5,
            inflow: 500.0,
            outflow: 480.0,
            storage_volume: 58.2,
        }
    );
    assert!(db.latest_for_station("锦屏一级").unwrap().is_none());
}

#[test]
fn rerun_without_changes_writes_nothing() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = setup(tempdir.path());

    scrape_assert(tempdir.path(), &config).success();
    scrape_assert(tempdir.path(), &config)
        .success()
        .stderr(predicate::str::contains("No new readings stored"));

    let db = DbRO::open(tempdir.path().join("reservoirs.db")).unwrap();
    assert_eq!(db.count().unwrap(), 2);
}

#[test]
fn changed_station_gets_new_row() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = setup(tempdir.path());
    scrape_assert(tempdir.path(), &config).success();

    write_capture(
        &tempdir.path().join("captures"),
        "官地",
        &station_body("官地", "1328.5", "501", "480", "5820"),
    );
    scrape_assert(tempdir.path(), &config).success();

    let db = DbRO::open(tempdir.path().join("reservoirs.db")).unwrap();
    assert_eq!(db.count().unwrap(), 3);
    let rows = db.readings_for_station("官地").unwrap();
    assert_eq!(rows[0].measurements.inflow, 500.0);
    assert_eq!(rows[1].measurements.inflow, 501.0);
    assert_eq!(db.readings_for_station("二滩").unwrap().len(), 1);
}

#[test]
fn broken_envelope_only_skips_that_station() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = setup(tempdir.path());
    write_capture(
        &tempdir.path().join("captures"),
        "二滩",
        r#"{"code": 500, "msg": "system busy"}"#,
    );

    scrape_assert(tempdir.path(), &config)
        .success()
        .stderr(predicate::str::contains("二滩: could not decode response"));

    let db = DbRO::open(tempdir.path().join("reservoirs.db")).unwrap();
    assert_eq!(db.count().unwrap(), 1);
    assert!(db.latest_for_station("官地").unwrap().is_some());
}

#[test]
fn missing_capture_is_logged_and_skipped() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = setup(tempdir.path());
    std::fs::remove_file(tempdir.path().join("captures/官地.json")).unwrap();

    scrape_assert(tempdir.path(), &config)
        .success()
        .stderr(predicate::str::contains("官地: query failed"));

    let db = DbRO::open(tempdir.path().join("reservoirs.db")).unwrap();
    assert_eq!(db.count().unwrap(), 1);
}

#[test]
fn invalid_config_fails() {
    let tempdir = tempfile::tempdir().unwrap();
    let config = tempdir.path().join("scrape.json");
    std::fs::write(&config, r#"{"volume_scale": 0}"#).unwrap();

    scrape_assert(tempdir.path(), &config)
        .failure()
        .stderr(predicate::str::contains("volume_scale must be a positive number"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("reservoirs")
        .unwrap()
        .arg("crawl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Subcommand must be one of"));
}
