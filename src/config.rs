// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment at startup (a `.env` file in
//! the working directory is loaded first when present).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding `finflow.redb` | `./data` |
//! | `JWT_SECRET` | HS256 signing secret | Required (see `dev` feature) |
//! | `JWT_TTL_SECONDS` | Token lifetime | `86400` |
//! | `APP_SYSTEM_USER` | Actor recorded in audit fields | `system` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SERVER_REQUEST_TIMEOUT` | Per-request timeout, seconds | `30` |
//! | `SERVER_SHUTDOWN_TIMEOUT` | Drain window on shutdown, seconds | `10` |
//!
//! Numeric values that fail to parse fall back to their default.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_TTL_ENV: &str = "JWT_TTL_SECONDS";
pub const SYSTEM_USER_ENV: &str = "APP_SYSTEM_USER";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const REQUEST_TIMEOUT_ENV: &str = "SERVER_REQUEST_TIMEOUT";
pub const SHUTDOWN_TIMEOUT_ENV: &str = "SERVER_SHUTDOWN_TIMEOUT";

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Database file name inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "finflow.redb";

/// Well-known development secret. Only accepted with the `dev` feature.
pub const DEV_JWT_SECRET: &str = "your-secret-key-change-in-production";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_JWT_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_SYSTEM_USER: &str = "system";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set (build with the `dev` feature to use the development secret)")]
    MissingJwtSecret,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LOG_FORMAT_ENV).as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    /// True when `jwt_secret` is [`DEV_JWT_SECRET`] because none was configured.
    pub using_dev_secret: bool,
    pub jwt_ttl: Duration,
    pub system_user: String,
    pub log_format: LogFormat,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Duration {
    Duration::from_secs(
        lookup(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(default),
    )
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (jwt_secret, using_dev_secret) = match non_empty(JWT_SECRET_ENV) {
            Some(secret) => (secret, false),
            None if cfg!(feature = "dev") => (DEV_JWT_SECRET.to_string(), true),
            None => return Err(ConfigError::MissingJwtSecret),
        };

        Ok(Self {
            host: non_empty(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: non_empty(PORT_ENV)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            data_dir: PathBuf::from(
                non_empty(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            ),
            jwt_secret,
            using_dev_secret,
            jwt_ttl: seconds(&lookup, JWT_TTL_ENV, DEFAULT_JWT_TTL_SECS),
            system_user: non_empty(SYSTEM_USER_ENV)
                .unwrap_or_else(|| DEFAULT_SYSTEM_USER.to_string()),
            log_format: LogFormat::from_lookup(&lookup),
            request_timeout: seconds(&lookup, REQUEST_TIMEOUT_ENV, DEFAULT_REQUEST_TIMEOUT_SECS),
            shutdown_timeout: seconds(&lookup, SHUTDOWN_TIMEOUT_ENV, DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("jwt_secret", &"<redacted>")
            .field("using_dev_secret", &self.using_dev_secret)
            .field("jwt_ttl", &self.jwt_ttl)
            .field("system_user", &self.system_user)
            .field("log_format", &self.log_format)
            .field("request_timeout", &self.request_timeout)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = AppConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.jwt_ttl, Duration::from_secs(86_400));
        assert_eq!(config.system_user, "system");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
        assert_eq!(config.database_path(), PathBuf::from("./data/finflow.redb"));
        assert!(!config.using_dev_secret);
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9090"),
            (JWT_TTL_ENV, "60"),
            (SYSTEM_USER_ENV, "importer"),
            (LOG_FORMAT_ENV, "JSON"),
            (REQUEST_TIMEOUT_ENV, "5"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.jwt_ttl, Duration::from_secs(60));
        assert_eq!(config.system_user, "importer");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s3cret"),
            (PORT_ENV, "eighty"),
            (SHUTDOWN_TIMEOUT_ENV, "-3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
    }

    #[cfg(not(feature = "dev"))]
    #[test]
    fn missing_secret_is_fatal() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingJwtSecret)
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "   ")])),
            Err(ConfigError::MissingJwtSecret)
        ));
    }

    #[cfg(feature = "dev")]
    #[test]
    fn dev_build_falls_back_to_known_secret() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert!(config.using_dev_secret);
    }

    #[test]
    fn debug_redacts_secret() {
        let config = AppConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
