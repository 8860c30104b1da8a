#![allow(dead_code)]
// Each test binary only uses some of these

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

/// Gateway response body in the double-wrapped form the dashboard sends
pub fn envelope(list: Value) -> String {
    let inner = json!({"result": {"data": {"list": list, "total": 1}}});
    json!({"code": 200, "msg": "success", "data": inner.to_string()}).to_string()
}

pub fn station_body(name: &str, ksw: &str, rkll: &str, ckll: &str, xsl: &str) -> String {
    envelope(json!([
        {"zhanming": name, "ksw": ksw, "rkll": rkll, "ckll": ckll, "xsl": xsl, "tm": "2024-08-01 08:00"}
    ]))
}

pub fn write_capture(dir: &Path, station: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(format!("{station}.json")), body).unwrap();
}

pub fn write_config(path: &Path, stations: &[&str], capture_dir: &Path) {
    let config = json!({
        "stations": stations,
        "source": {"kind": "capture_dir", "path": capture_dir},
    });
    fs::write(path, config.to_string()).unwrap();
}
