//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Remote store configuration.
    pub store: Store,

    /// Reports configuration.
    pub report: Report,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Remote store configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Base URL of the store API.
    #[default("http://127.0.0.1:8000/api/".to_owned())]
    pub base_url: String,

    /// Timeout of a single request to the store.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Store> for service::infra::rest::Config {
    fn from(value: Store) -> Self {
        let Store { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Reports configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Report {
    /// Offset from UTC (in whole hours) at which calendar months are
    /// resolved.
    pub utc_offset_hours: i8,
}

impl TryFrom<Report> for service::Config {
    type Error = ::time::error::ComponentRange;

    fn try_from(value: Report) -> Result<Self, Self::Error> {
        let Report { utc_offset_hours } = value;
        Ok(Self {
            utc_offset: ::time::UtcOffset::from_hms(utc_offset_hours, 0, 0)?,
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Config, Report};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("definitely/missing/config.toml").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors.origins, ["*"]);
        assert_eq!(config.store.base_url, "http://127.0.0.1:8000/api/");
        assert_eq!(config.store.timeout.as_secs(), 10);
        assert_eq!(config.report.utc_offset_hours, 0);
    }

    #[test]
    fn report_offset_is_bounded() {
        let config = service::Config::try_from(Report {
            utc_offset_hours: -3,
        })
        .unwrap();
        assert_eq!(config.utc_offset.whole_hours(), -3);

        assert!(service::Config::try_from(Report {
            utc_offset_hours: 30,
        })
        .is_err());
    }
}
