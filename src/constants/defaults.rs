use std::time::Duration;

pub const LOG_LEVEL: &str = "info";
pub const DATA_DIR: &str = ".";
pub const DB_FILE: &str = "reservoirs.db";
pub const CONFIG_FILE: &str = "config.json";
pub const CAPTURE_DIR: &str = "captures";

pub const TARGET_URL: &str = "https://tftb.sczwfw.gov.cn:8085/hos-server/pub/jmas/jmasbucket/jmopen_files/unzip/6e5032129863494a94bb2e2e7a2e9748/sltqszdsksssqxxpc/index.html#/";
pub const STATIONS: [&str; 3] = ["二滩", "锦屏一级", "官地"];

/// Raw storage figures are in millions of m³; readings are kept in 10⁸ m³.
/// Earlier revisions of the source reported 10⁴ m³ and needed 10000 here.
pub const VOLUME_SCALE: f64 = 100.0;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
