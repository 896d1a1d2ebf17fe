use crate::{ConfigError, ConfigErrorResult, DEFAULT_LOG_LEVEL, LogLevel};

use serde::Deserialize;

/// Logging section consumed by the host application when installing its
/// logger. The registry itself only emits through the `log` facade.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Emit ANSI color codes
    pub colored: bool,
    /// Optional log file path; stderr only when absent
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(file) = &self.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging(
                "logging.file must not be blank when set",
            ));
        }

        Ok(())
    }
}
