//! Application configuration management.

use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;

/// Legacy variable that points the service at the upstream mock.
pub const LEGACY_UPSTREAM_URL_VAR: &str = "XERO_MOCK_URL";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream accounting API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Upstream accounting API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the accounting API, without the report path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total attempts per request, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts, in seconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
    /// Timeout for a single upstream call, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl UpstreamConfig {
    /// Delay between attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Timeout for a single upstream call.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://xero-mock:3000".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2
}

fn default_request_timeout() -> u64 {
    30
}

/// Report rendering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// IANA time zone for rendered timestamps. Process local time when unset.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl ReportConfig {
    /// Parses the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA zone.
    pub fn parsed_timezone(&self) -> Result<Option<Tz>, config::ConfigError> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>().map_err(|_| {
                    config::ConfigError::Message(format!("unknown report timezone: {name}"))
                })
            })
            .transpose()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MONEYVIEW").separator("__"))
            .set_override_option(
                "upstream.base_url",
                std::env::var(LEGACY_UPSTREAM_URL_VAR).ok(),
            )?
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        if app_config.upstream.max_attempts == 0 {
            return Err(config::ConfigError::Message(
                "upstream.max_attempts must be at least 1".to_string(),
            ));
        }
        app_config.report.parsed_timezone()?;

        Ok(app_config)
    }
}
