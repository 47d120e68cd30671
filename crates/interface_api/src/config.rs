//! API configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::{TemporalError, Timezone};
use domain_motor::{ExpirationOptions, PollerOptions};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// IANA timezone for business-date evaluation
    pub timezone: String,
    /// Expiration monitoring settings
    pub expiration: ExpirationSettings,
}

/// Settings for the expiration scan and its background poller
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExpirationSettings {
    /// Minutes between successful scans
    pub check_interval_minutes: u64,
    /// Expirations older than this are never reported
    pub max_hours_since_expiration: i64,
    /// Warm-up delay before the first scan, in seconds
    pub startup_delay_secs: u64,
    /// Sleep after a failed scan, in seconds
    pub error_backoff_secs: u64,
}

impl Default for ExpirationSettings {
    fn default() -> Self {
        Self {
            check_interval_minutes: 1,
            max_hours_since_expiration: 24,
            startup_delay_secs: 10,
            error_backoff_secs: 60,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/motor".to_string(),
            log_level: "info".to_string(),
            timezone: "UTC".to_string(),
            expiration: ExpirationSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment variables with the `API_`
    /// prefix; nested expiration settings use a double underscore, e.g.
    /// `API_EXPIRATION__CHECK_INTERVAL_MINUTES`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured business timezone
    pub fn business_timezone(&self) -> Result<Timezone, TemporalError> {
        Timezone::parse(&self.timezone)
    }

    /// Expiration-scan tuning derived from this configuration
    pub fn expiration_options(&self) -> ExpirationOptions {
        ExpirationOptions {
            max_hours_since_expiration: self.expiration.max_hours_since_expiration,
        }
    }

    /// Poller timing derived from this configuration
    pub fn poller_options(&self) -> PollerOptions {
        PollerOptions {
            check_interval: Duration::from_secs(self.expiration.check_interval_minutes * 60),
            startup_delay: Duration::from_secs(self.expiration.startup_delay_secs),
            error_backoff: Duration::from_secs(self.expiration.error_backoff_secs),
        }
    }
}
