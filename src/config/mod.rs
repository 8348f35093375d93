//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `TUTOR_BOOKING` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use tutor_booking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod scheduler;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use scheduler::SchedulerConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Completion sweep schedule
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TUTOR_BOOKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `TUTOR_BOOKING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TUTOR_BOOKING__SCHEDULER__TIMEZONE=America/Bogota` -> `scheduler.timezone`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TUTOR_BOOKING")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate(&self.server.environment)?;
        self.scheduler.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "TUTOR_BOOKING__DATABASE__URL",
        "TUTOR_BOOKING__SERVER__PORT",
        "TUTOR_BOOKING__SERVER__ENVIRONMENT",
        "TUTOR_BOOKING__SCHEDULER__TIMEZONE",
        "TUTOR_BOOKING__SCHEDULER__INTERVAL_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(!config.database.is_configured());
        assert_eq!(config.scheduler.timezone, "America/Bogota");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TUTOR_BOOKING__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("TUTOR_BOOKING__SERVER__PORT", "3000");
        env::set_var("TUTOR_BOOKING__SCHEDULER__TIMEZONE", "Europe/Madrid");
        env::set_var("TUTOR_BOOKING__SCHEDULER__INTERVAL_SECS", "60");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scheduler.timezone, "Europe/Madrid");
        assert_eq!(config.scheduler.interval_secs, Some(60));
    }

    #[test]
    fn test_production_requires_database() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TUTOR_BOOKING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        );
    }
}
