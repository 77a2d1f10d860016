//! Service configuration, read from the environment.
//!
//! An optional `.env` file in the working directory is loaded first; real
//! environment variables win over it.
//!
//! | Variable | Default |
//! |---|---|
//! | `WIKI_LISTEN_ADDR` | `0.0.0.0:3000` |
//! | `WIKI_DATA_FILE` | unset (in-memory store) |
//! | `WIKI_LOG_FORMAT` | `text` (`text` or `json`) |
//! | `WIKI_LOG_LEVEL` | `info` (`RUST_LOG` overrides) |

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const LISTEN_ADDR_VAR: &str = "WIKI_LISTEN_ADDR";
pub const DATA_FILE_VAR: &str = "WIKI_DATA_FILE";
pub const LOG_FORMAT_VAR: &str = "WIKI_LOG_FORMAT";
pub const LOG_LEVEL_VAR: &str = "WIKI_LOG_LEVEL";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// A setting that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be `text` or `json`, got {value:?}")]
    InvalidLogFormat { var: &'static str, value: String },

    #[error("{var} is not a log level: {value:?}")]
    InvalidLogLevel { var: &'static str, value: String },
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Log severity level
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the binary needs to start.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// JSON collection file; `None` keeps articles in memory
    pub data_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub log_level: LogLevel,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenv::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = get(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr: SocketAddr = addr.trim().parse().map_err(|_| ConfigError::InvalidAddr {
            var: LISTEN_ADDR_VAR,
            value: addr.clone(),
        })?;

        let log_format: LogFormat = match get(LOG_FORMAT_VAR) {
            Some(value) => value.trim().parse().map_err(|()| ConfigError::InvalidLogFormat {
                var: LOG_FORMAT_VAR,
                value,
            })?,
            None => LogFormat::default(),
        };

        let log_level: LogLevel = match get(LOG_LEVEL_VAR) {
            Some(value) => value.trim().parse().map_err(|()| ConfigError::InvalidLogLevel {
                var: LOG_LEVEL_VAR,
                value,
            })?,
            None => LogLevel::default(),
        };

        Ok(Self {
            listen_addr,
            data_file: get(DATA_FILE_VAR).map(PathBuf::from),
            log_format,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.data_file, None);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            (LISTEN_ADDR_VAR, "127.0.0.1:8080"),
            (DATA_FILE_VAR, "/var/lib/wiki/articles.json"),
            (LOG_FORMAT_VAR, "JSON"),
            (LOG_LEVEL_VAR, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.data_file, Some(PathBuf::from("/var/lib/wiki/articles.json")));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[(DATA_FILE_VAR, " "), (LOG_LEVEL_VAR, "")])).unwrap();
        assert_eq!(config.data_file, None);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[(LISTEN_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
        assert_eq!(err.to_string(), "WIKI_LISTEN_ADDR is not a socket address: \"localhost\"");

        let err = Config::from_lookup(lookup(&[(LOG_FORMAT_VAR, "yaml")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat { .. }));

        let err = Config::from_lookup(lookup(&[(LOG_LEVEL_VAR, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { .. }));
    }
}
