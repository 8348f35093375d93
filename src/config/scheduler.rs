//! Completion sweep scheduler configuration

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// When the overdue-session sweep runs.
///
/// By default once a day at `daily_at` local time in `timezone`. Setting
/// `interval_secs` switches to a fixed interval instead.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Run the sweep at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// IANA timezone name for the daily run
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Local time of the daily run, `HH:MM`
    #[serde(default = "default_daily_at")]
    pub daily_at: String,

    /// Fixed interval in seconds, overriding the daily schedule
    #[serde(default)]
    pub interval_secs: Option<u64>,

    /// Also sweep once at startup
    #[serde(default)]
    pub run_on_startup: bool,
}

impl SchedulerConfig {
    /// Parsed timezone.
    pub fn tz(&self) -> Result<Tz, ValidationError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ValidationError::InvalidTimezone(self.timezone.clone()))
    }

    /// Parsed daily run time.
    pub fn daily_time(&self) -> Result<NaiveTime, ValidationError> {
        NaiveTime::parse_from_str(&self.daily_at, "%H:%M")
            .map_err(|_| ValidationError::InvalidDailyAt(self.daily_at.clone()))
    }

    /// Fixed interval, if configured.
    pub fn interval(&self) -> Option<Duration> {
        self.interval_secs.map(Duration::from_secs)
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tz()?;
        self.daily_time()?;
        if self.interval_secs == Some(0) {
            return Err(ValidationError::InvalidInterval);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timezone: default_timezone(),
            daily_at: default_daily_at(),
            interval_secs: None,
            run_on_startup: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_timezone() -> String {
    "America/Bogota".to_string()
}

fn default_daily_at() -> String {
    "00:00".to_string()
}
