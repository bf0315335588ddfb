pub mod config;

pub use config::{AppConfig, CacheConfig, DefaultsConfig, LensConfig, LimitsConfig, OutputConfig};
