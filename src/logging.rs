//! Logging initialization using the `tracing` ecosystem.
//!
//! Console output goes to stderr so stdout stays free for the order batch.
//! `RUST_LOG` overrides the configured level.

use crate::ports::config_port::ConfigPort;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<String>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: None,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Reads the `[logging]` section; every key is optional.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let defaults = Self::default();
        LoggingConfig {
            level: config
                .get_string("logging", "level")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.level),
            dir: config
                .get_string("logging", "dir")
                .filter(|s| !s.trim().is_empty()),
            ansi: config.get_bool("logging", "ansi", defaults.ansi),
        }
    }
}

/// Installs the global subscriber. Call once at program start; later calls
/// are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(config.ansi);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(dir) = &config.dir {
        let file_appender = tracing_appender::rolling::daily(dir, "emacross.log");
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true);
        let _ = registry.with(file_layer).try_init();
    } else {
        let _ = registry.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn defaults_without_section() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(LoggingConfig::from_config(&adapter), LoggingConfig::default());
    }

    #[test]
    fn reads_section() {
        let adapter =
            FileConfigAdapter::from_string("[logging]\nlevel = debug\ndir = /tmp/logs\nansi = false\n")
                .unwrap();
        let config = LoggingConfig::from_config(&adapter);
        assert_eq!(config.level, "debug");
        assert_eq!(config.dir.as_deref(), Some("/tmp/logs"));
        assert!(!config.ansi);
    }

    #[test]
    fn blank_values_fall_back() {
        let adapter = FileConfigAdapter::from_string("[logging]\nlevel =\ndir =\n").unwrap();
        let config = LoggingConfig::from_config(&adapter);
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
        assert!(config.dir.is_none());
    }

    #[test]
    fn init_twice_is_harmless() {
        let config = LoggingConfig {
            ansi: false,
            ..LoggingConfig::default()
        };
        init_logging(&config);
        init_logging(&config);
    }
}
