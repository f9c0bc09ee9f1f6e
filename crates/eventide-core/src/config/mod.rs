use std::str::FromStr;

use anyhow::Result;
use chrono::TimeDelta;
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub scheduling: SchedulingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// IANA zone used to turn raw epoch timestamps into wall-clock time.
    pub timezone: String,
    /// Half-width of the search window used when looking up a single occurrence.
    pub lookup_tolerance_seconds: i64,
}

impl SchedulingConfig {
    /// ## Summary
    /// Resolves the configured IANA zone name.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the name is not a known zone.
    pub fn timezone(&self) -> CoreResult<Tz> {
        Tz::from_str(&self.timezone).map_err(|err| {
            CoreError::InvalidConfiguration(format!(
                "unknown timezone `{}`: {err}",
                self.timezone
            ))
        })
    }

    /// ## Summary
    /// Returns the lookup half-width as a duration.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the value is below one
    /// second or too large for a duration.
    pub fn lookup_tolerance(&self) -> CoreResult<TimeDelta> {
        if self.lookup_tolerance_seconds < 1 {
            return Err(CoreError::InvalidConfiguration(format!(
                "lookup tolerance must be at least one second, got {}",
                self.lookup_tolerance_seconds
            )));
        }
        TimeDelta::try_seconds(self.lookup_tolerance_seconds).ok_or_else(|| {
            CoreError::InvalidConfiguration(format!(
                "lookup tolerance of {} seconds is out of range",
                self.lookup_tolerance_seconds
            ))
        })
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            lookup_tolerance_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `eventide.toml` file into `Settings`.
    ///
    /// Environment variables use the `EVENTIDE_` prefix and `__` as the section
    /// separator, e.g. `EVENTIDE_SCHEDULING__TIMEZONE=Europe/Berlin`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("scheduling.timezone", "UTC")?
            .set_default("scheduling.lookup_tolerance_seconds", 60)?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("EVENTIDE")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("eventide.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
