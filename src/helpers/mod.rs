mod time;

pub use time::now_local;

pub mod base_path;
