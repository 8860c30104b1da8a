pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const DATA_DIR: &str = "RESERVOIRS_DATA_DIR";
pub const CONFIG: &str = "RESERVOIRS_CONFIG";
pub const DB: &str = "RESERVOIRS_DB";
