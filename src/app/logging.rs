use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use super::config::{Config, ConfigError};

/// Builds the tracing filter string from configuration.
///
/// `debug_logging` widens this crate's own target to debug so every handled
/// message leaves a trace; everything else follows `log_level`.
pub fn build_filter(config: &Config) -> String {
    let base: tracing::Level = config.log_level.into();
    let mut filter = base.to_string().to_lowercase();
    if config.debug_logging {
        filter.push_str(",hub_syslog_forwarder=debug");
    }
    filter
}

/// Installs the global tracing subscriber from configuration.
pub fn setup_logging(config: &Config) -> Result<(), ConfigError> {
    let filter = build_filter(config);
    let env_filter = EnvFilter::try_new(&filter).map_err(|e| {
        ConfigError::InvalidConfig(format!("Failed to create log filter '{filter}': {e}"))
    })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .compact(),
        )
        .try_init()
        .map_err(|e| {
            ConfigError::InvalidConfig(format!("Failed to set global tracing subscriber: {e}"))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::LogLevel;

    #[test]
    fn filter_widens_own_target_when_debug_logging() {
        let config = Config {
            debug_logging: true,
            ..Config::default()
        };
        let filter = build_filter(&config);
        assert_eq!(filter, "info,hub_syslog_forwarder=debug");
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn filter_follows_log_level_alone_otherwise() {
        let config = Config {
            debug_logging: false,
            log_level: LogLevel::Warn,
            ..Config::default()
        };
        assert_eq!(build_filter(&config), "warn");
    }
}
