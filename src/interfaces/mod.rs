mod capture_dir;
mod http_fetch;

pub use capture_dir::CaptureDirFetcher;
pub use http_fetch::HttpFetcher;

pub mod fetch;
