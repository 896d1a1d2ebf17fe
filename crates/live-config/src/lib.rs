mod config;
mod error;
mod log_level;
mod logging_config;
mod pool_config;
mod registry_config;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use pool_config::PoolConfig;
pub use registry_config::RegistryConfig;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

#[cfg(test)]
mod tests;
