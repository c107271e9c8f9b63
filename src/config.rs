//! Configuration management for the contact application.
//!
//! Settings come from environment variables, with a `.env` file loaded first
//! if one is present.

use crate::domain::MobileLocale;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the contact application.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (default: "sqlite://contacts.db")
    pub database_url: String,

    /// Interface to listen on (default: "127.0.0.1")
    pub host: String,

    /// TCP port to listen on (default: 3000)
    pub port: u16,

    /// How long an unread flash message survives, in milliseconds (default: 6000)
    pub flash_ttl_ms: u64,

    /// Locale mobile numbers are validated against (default: id-ID)
    pub phone_locale: MobileLocale,

    /// Name greeted on the homepage (default: "Primada")
    pub site_owner: String,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `DATABASE_URL`: SQLite connection string
    /// - `HOST`: Listen interface
    /// - `PORT`: Listen port
    /// - `FLASH_TTL_MS`: Flash message lifetime in milliseconds
    /// - `PHONE_LOCALE`: One of `id-ID`, `en-US`, `en-GB`
    /// - `SITE_OWNER`: Name shown on the homepage
    /// - `LOG_LEVEL`: Logging level
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        if !database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_URL".to_string(),
                reason: "Must start with sqlite:".to_string(),
            });
        }

        let host = env::var("HOST").unwrap_or(defaults.host);
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "HOST".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let port = Self::parse_env_u16("PORT", defaults.port)?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                reason: "Must be between 1 and 65535".to_string(),
            });
        }

        let flash_ttl_ms = Self::parse_env_u64("FLASH_TTL_MS", defaults.flash_ttl_ms)?;
        if flash_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue {
                var: "FLASH_TTL_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let phone_locale = match env::var("PHONE_LOCALE") {
            Ok(val) => val.parse().map_err(|e| ConfigError::InvalidValue {
                var: "PHONE_LOCALE".to_string(),
                reason: format!("{}", e),
            })?,
            Err(_) => defaults.phone_locale,
        };

        let site_owner = env::var("SITE_OWNER").unwrap_or(defaults.site_owner);
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            database_url,
            host,
            port,
            flash_ttl_ms,
            phone_locale,
            site_owner,
            log_level,
        })
    }

    /// `host:port` to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Flash message lifetime.
    pub fn flash_ttl(&self) -> Duration {
        Duration::from_millis(self.flash_ttl_ms)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://contacts.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            flash_ttl_ms: 6000,
            phone_locale: MobileLocale::IdId,
            site_owner: "Primada".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: &[&str] = &[
        "DATABASE_URL",
        "HOST",
        "PORT",
        "FLASH_TTL_MS",
        "PHONE_LOCALE",
        "SITE_OWNER",
        "LOG_LEVEL",
    ];

    // Sets env vars for one test and restores a clean slate on drop
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            for var in VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    fn invalid_var(result: ConfigResult<Config>) -> String {
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => var,
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.flash_ttl(), Duration::from_secs(6));
        assert_eq!(config.phone_locale, MobileLocale::IdId);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("DATABASE_URL", "sqlite::memory:");
        guard.set("PORT", "8080");
        guard.set("FLASH_TTL_MS", "2500");
        guard.set("PHONE_LOCALE", "en-GB");
        guard.set("SITE_OWNER", "Hyewon");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8080);
        assert_eq!(config.flash_ttl(), Duration::from_millis(2500));
        assert_eq!(config.phone_locale, MobileLocale::EnGb);
        assert_eq!(config.site_owner, "Hyewon");
    }

    #[test]
    #[serial]
    fn test_config_rejects_non_sqlite_url() {
        let mut guard = EnvGuard::new();
        guard.set("DATABASE_URL", "mongodb://127.0.0.1:27017/contacts");

        assert_eq!(invalid_var(Config::from_env()), "DATABASE_URL");
    }

    #[test]
    #[serial]
    fn test_config_rejects_bad_port() {
        let mut guard = EnvGuard::new();
        guard.set("DATABASE_URL", "sqlite::memory:");
        guard.set("PORT", "70000");
        assert_eq!(invalid_var(Config::from_env()), "PORT");

        guard.set("PORT", "0");
        assert_eq!(invalid_var(Config::from_env()), "PORT");
    }

    #[test]
    #[serial]
    fn test_config_rejects_unknown_locale() {
        let mut guard = EnvGuard::new();
        guard.set("DATABASE_URL", "sqlite::memory:");
        guard.set("PHONE_LOCALE", "xx-XX");

        assert_eq!(invalid_var(Config::from_env()), "PHONE_LOCALE");
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_flash_ttl() {
        let mut guard = EnvGuard::new();
        guard.set("DATABASE_URL", "sqlite::memory:");
        guard.set("FLASH_TTL_MS", "0");

        assert_eq!(invalid_var(Config::from_env()), "FLASH_TTL_MS");
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        assert_eq!(Config::parse_env_u64("TEST_U64", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("NONEXISTENT", 10).unwrap(), 10);

        guard.set("TEST_U64", "not-a-number");
        assert!(Config::parse_env_u64("TEST_U64", 10).is_err());
    }
}
