//! Field layout of the dashboard's gateway responses.

/// Key of the outer envelope holding the JSON-encoded payload string
pub const DATA_KEY: &str = "data";

/// Path from the decoded payload to the per-station record list
pub const LIST_PATH: [&str; 3] = ["result", "data", "list"];

/// Record key carrying the station name
pub const STATION_KEY: &str = "zhanming";

#[derive(Clone, Copy, Debug)]
pub struct DriverField {
    pub column: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
}

pub const WATER_LEVEL: DriverField = DriverField {
    column: "ksw",
    description: "Reservoir water level",
    unit: "m",
};

pub const INFLOW: DriverField = DriverField {
    column: "rkll",
    description: "Inflow",
    unit: "m³/s",
};

pub const OUTFLOW: DriverField = DriverField {
    column: "ckll",
    description: "Outflow",
    unit: "m³/s",
};

pub const STORAGE_VOLUME: DriverField = DriverField {
    column: "xsl",
    description: "Storage volume, before unit scaling",
    unit: "10⁶ m³",
};
