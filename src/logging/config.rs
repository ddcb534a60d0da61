//! Sink configuration.

use thiserror::Error;

use super::message::LogCategories;

/// Error raised when building a [`SinkConfig`] from external input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The level string is not one of the documented names.
    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),
}

/// Configuration for a [`ConsoleSink`](super::sink::ConsoleSink).
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Categories the sink starts with enabled.
    pub mask: LogCategories,

    /// Route output through the `log` facade instead of the raw console
    /// channels, mapping each message type to a facade level.
    pub use_log_facade: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            mask: LogCategories::ALL,
            use_log_facade: false,
        }
    }
}

impl SinkConfig {
    /// Build a configuration from a level name.
    ///
    /// Accepted names, from quietest to loudest: `"off"`, `"error"`
    /// (errors and assertion failures), `"info"` (everything that is not
    /// debug-classified), and `"debug"`/`"all"` (everything).
    pub fn from_level(level: &str) -> Result<Self, ConfigError> {
        let mask = match level {
            "off" => LogCategories::empty(),
            "error" => LogCategories::ERROR | LogCategories::ASSERT,
            "info" => LogCategories::REGULAR,
            "debug" | "all" => LogCategories::ALL,
            other => return Err(ConfigError::UnknownLevel(other.to_string())),
        };

        Ok(Self {
            mask,
            ..Self::default()
        })
    }

    /// Enable the `log`-facade route.
    pub fn with_log_facade(mut self) -> Self {
        self.use_log_facade = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SinkConfig::default();
        assert_eq!(config.mask, LogCategories::ALL);
        assert!(!config.use_log_facade);
    }

    #[test]
    fn test_from_level() {
        assert_eq!(
            SinkConfig::from_level("off").unwrap().mask,
            LogCategories::empty()
        );
        assert_eq!(
            SinkConfig::from_level("error").unwrap().mask,
            LogCategories::ERROR | LogCategories::ASSERT
        );
        assert_eq!(
            SinkConfig::from_level("info").unwrap().mask,
            LogCategories::REGULAR
        );
        assert_eq!(
            SinkConfig::from_level("debug").unwrap().mask,
            LogCategories::ALL
        );
        assert_eq!(
            SinkConfig::from_level("all").unwrap().mask,
            LogCategories::ALL
        );
    }

    #[test]
    fn test_from_level_rejects_unknown() {
        let err = SinkConfig::from_level("verbose").unwrap_err();
        assert_eq!(err, ConfigError::UnknownLevel("verbose".to_string()));
    }
}
