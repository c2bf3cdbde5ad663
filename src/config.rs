use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    pub api_prefix: String,
    pub cors_origins: Vec<String>,

    pub environment: Environment,
    pub app_title: String,
    pub app_version: String,

    // Logging
    pub log_level: tracing::Level,
    /// `None` logs to stdout, `Some(dir)` writes a daily rolling file there.
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite://hrms_lite.db".to_string(),
            db_max_connections: 5,
            api_prefix: "/api".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            environment: Environment::Development,
            app_title: "HRMS Lite API".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_addr = match lookup("SERVER_ADDR") {
            Some(addr) => addr,
            None => {
                let port: u16 = parse_or(&lookup, "PORT", 8000)?;
                format!("0.0.0.0:{}", port)
            }
        };

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            server_addr,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            api_prefix: lookup("API_PREFIX").unwrap_or(defaults.api_prefix),
            cors_origins,
            environment: parse_or(&lookup, "ENVIRONMENT", defaults.environment)?,
            app_title: lookup("APP_TITLE").unwrap_or(defaults.app_title),
            app_version: lookup("APP_VERSION").unwrap_or(defaults.app_version),
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
            log_dir: lookup("LOG_DIR").filter(|d| !d.trim().is_empty()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8000");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert!(config.log_dir.is_none());
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn port_builds_server_addr_when_addr_missing() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "9100")])).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:9100");

        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("SERVER_ADDR", "127.0.0.1:7000"),
        ]))
        .unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:7000");
    }

    #[test]
    fn parses_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "Production"),
            ("LOG_LEVEL", "debug"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("LOG_DIR", "logs"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.log_dir.as_deref(), Some("logs"));
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
