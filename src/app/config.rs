use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::syslog::{Dialect, Facility};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Verbosity of the forwarder's own diagnostics (not of forwarded events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Remote syslog server hostname or IP
    #[arg(long, env = "SYSLOG_SERVER")]
    pub server: String,

    /// Remote syslog UDP port
    #[arg(long, env = "SYSLOG_PORT", default_value = "514")]
    pub port: u16,

    /// Syslog facility stamped on every forwarded line
    #[arg(long, env = "SYSLOG_FACILITY", default_value = "local0")]
    pub facility: Facility,

    /// Output dialect (bsd = RFC 3164, ietf = RFC 5424)
    #[arg(long, env = "SYSLOG_DIALECT", default_value = "bsd")]
    pub dialect: Dialect,

    /// Trace each handled message at debug level
    #[arg(
        long,
        env = "DEBUG_LOGGING",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub debug_logging: bool,

    /// Source type tag identifying this forwarder's own emissions
    #[arg(long, env = "SELF_SOURCE_TYPE", default_value = "dev")]
    pub self_source_type: String,

    /// Device id identifying this forwarder's own emissions; without it the
    /// self-origin filter never matches
    #[arg(long, env = "SELF_DEVICE_ID")]
    pub self_device_id: Option<u64>,

    /// Originating host IP stamped into BSD headers
    /// (derived from the outbound socket if not provided)
    #[arg(long, env = "HUB_IP")]
    pub hub_ip: Option<String>,

    /// Log level for the forwarder's own diagnostics
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: 514,
            facility: Facility::Local0,
            dialect: Dialect::Bsd,
            debug_logging: true,
            self_source_type: "dev".to_string(),
            self_device_id: None,
            hub_ip: None,
            log_level: LogLevel::Info,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::parse_from(args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string("SYSLOG_SERVER", &mut config.server);
        load_env_var("SYSLOG_PORT", &mut config.port)?;
        load_env_enum("SYSLOG_FACILITY", &mut config.facility)?;
        load_env_enum("SYSLOG_DIALECT", &mut config.dialect)?;
        load_env_var("DEBUG_LOGGING", &mut config.debug_logging)?;
        load_env_string("SELF_SOURCE_TYPE", &mut config.self_source_type);
        load_env_var_opt("SELF_DEVICE_ID", &mut config.self_device_id)?;
        load_env_string_opt("HUB_IP", &mut config.hub_ip);
        load_env_enum("LOG_LEVEL", &mut config.log_level)?;
        load_env_path_opt("CONFIG_FILE", &mut config.config_file);

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Syslog server must be configured".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidConfig(
                "Syslog port must be greater than 0".to_string(),
            ));
        }

        if let Some(ref ip) = self.hub_ip {
            ip.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid hub IP '{ip}': {e}"))
            })?;
        }

        Ok(())
    }
}

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Helper function to load an optional parsed environment variable.
fn load_env_var_opt<T>(name: &str, target: &mut Option<T>) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = Some(
            value
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?,
        );
    }
    Ok(())
}

/// Helper function to load a value-enum environment variable, matching the
/// same names the CLI accepts (case-insensitive).
fn load_env_enum<T: ValueEnum>(name: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(name) {
        *target = T::from_str(&value, true)
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Helper function to load a string environment variable.
fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

/// Helper function to load an optional string environment variable.
fn load_env_string_opt(name: &str, target: &mut Option<String>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(value);
    }
}

/// Helper function to load an optional PathBuf environment variable.
fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(PathBuf::from(value));
    }
}
