//! Configuration loading from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use tripsplit_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "TRIPSPLIT_BIND_ADDR";
pub const DATA_DIR_VAR: &str = "TRIPSPLIT_DATA_DIR";
pub const PASSWORD_VAR: &str = "TRIPSPLIT_PASSWORD";
pub const LOG_FORMAT_VAR: &str = "TRIPSPLIT_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Directory for JSON trip files; `None` keeps trips in memory.
    pub data_dir: Option<PathBuf>,
    /// Shared trip password. Convenience gate only, not a security boundary.
    pub password: Option<String>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            data_dir: None,
            password: None,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: BIND_ADDR_VAR,
                message: e.to_string(),
            })?;

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|message| ConfigError::Invalid {
                key: LOG_FORMAT_VAR,
                message,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            data_dir: get(DATA_DIR_VAR).map(PathBuf::from),
            password: get(PASSWORD_VAR),
            log_format,
        })
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
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:3000"),
            (DATA_DIR_VAR, "/var/lib/tripsplit"),
            (PASSWORD_VAR, "hunter2"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/tripsplit")));
        assert_eq!(config.password.as_deref(), Some("hunter2"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            AppConfig::from_lookup(lookup(&[(PASSWORD_VAR, "  "), (DATA_DIR_VAR, "")])).unwrap();
        assert_eq!(config.password, None);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BIND_ADDR_VAR, .. }));

        let err = AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(err.to_string().starts_with(LOG_FORMAT_VAR));
    }
}
