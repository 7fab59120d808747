// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`Config`] loaded once at
//! startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `ACCESS_TOKEN_SECRET` | Shared secret for signing tokens | Required |
//! | `DATABASE_PATH` | redb database file | In-memory store |
//! | `CATEGORIES_FILE` | JSON array of categories loaded at startup | None |
//! | `ENFORCE_OWNER_EMAIL` | Require token email to match `/my-toys?email=` | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const ACCESS_TOKEN_SECRET_ENV: &str = "ACCESS_TOKEN_SECRET";
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
pub const CATEGORIES_FILE_ENV: &str = "CATEGORIES_FILE";
pub const ENFORCE_OWNER_EMAIL_ENV: &str = "ENFORCE_OWNER_EMAIL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub access_token_secret: String,
    pub database_path: Option<PathBuf>,
    pub categories_file: Option<PathBuf>,
    pub enforce_owner_email: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns `None` for unset
    /// variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: HOST_ENV,
                value: host,
            })?;

        let access_token_secret = lookup(ACCESS_TOKEN_SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(ACCESS_TOKEN_SECRET_ENV))?;

        let enforce_owner_email = match lookup(ENFORCE_OWNER_EMAIL_ENV) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: ENFORCE_OWNER_EMAIL_ENV,
                value: raw,
            })?,
            None => false,
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            addr,
            access_token_secret,
            database_path: lookup(DATABASE_PATH_ENV).map(PathBuf::from),
            categories_file: lookup(CATEGORIES_FILE_ENV).map(PathBuf::from),
            enforce_owner_email,
            log_format,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[(ACCESS_TOKEN_SECRET_ENV, "s3cret")]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(config.access_token_secret, "s3cret");
        assert!(config.database_path.is_none());
        assert!(config.categories_file.is_none());
        assert!(!config.enforce_owner_email);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing(ACCESS_TOKEN_SECRET_ENV));
        assert_eq!(
            load(&[(ACCESS_TOKEN_SECRET_ENV, "")]).unwrap_err(),
            ConfigError::Missing(ACCESS_TOKEN_SECRET_ENV)
        );
    }

    #[test]
    fn overrides() {
        let config = load(&[
            (ACCESS_TOKEN_SECRET_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "8081"),
            (DATABASE_PATH_ENV, "/tmp/toys.redb"),
            (CATEGORIES_FILE_ENV, "categories.json"),
            (ENFORCE_OWNER_EMAIL_ENV, "TRUE"),
            (LOG_FORMAT_ENV, "json"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8081".parse().unwrap());
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/toys.redb")));
        assert_eq!(config.categories_file, Some(PathBuf::from("categories.json")));
        assert!(config.enforce_owner_email);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[(ACCESS_TOKEN_SECRET_ENV, "s"), (PORT_ENV, "eighty")]),
            Err(ConfigError::Invalid { name: PORT_ENV, .. })
        ));
        assert!(matches!(
            load(&[(ACCESS_TOKEN_SECRET_ENV, "s"), (HOST_ENV, "not a host")]),
            Err(ConfigError::Invalid { name: HOST_ENV, .. })
        ));
        assert!(matches!(
            load(&[(ACCESS_TOKEN_SECRET_ENV, "s"), (ENFORCE_OWNER_EMAIL_ENV, "maybe")]),
            Err(ConfigError::Invalid { name: ENFORCE_OWNER_EMAIL_ENV, .. })
        ));
    }
}
