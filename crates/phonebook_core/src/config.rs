//! Runtime configuration.
//!
//! # Responsibility
//! - Parse the optional TOML configuration file.
//! - Provide defaults for every field and validate the result.
//!
//! # Invariants
//! - A config returned by `from_toml`/`from_file` has passed `validate`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_DB_FILE: &str = "phonebook.db";
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhonebookConfig {
    /// SQLite file holding the persisted contact list.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Bootstrap URL fetched once when nothing is stored.
    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: None,
        }
    }
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            remote_url: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PhonebookConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    /// - `fetch_timeout_ms` is zero.
    /// - `remote_url` is blank or not `http://`/`https://`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(url) = &self.remote_url {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "remote_url must be an http(s) URL, got `{url}`"
                )));
            }
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Configuration load failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize config: {err}"),
            Self::Validation(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_FILE)
}

fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

fn default_level() -> String {
    crate::logging::default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PhonebookConfig};
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PhonebookConfig::from_toml("").unwrap();
        assert_eq!(config, PhonebookConfig::default());
        assert_eq!(config.db_path, PathBuf::from("phonebook.db"));
        assert_eq!(config.remote_url, None);
    }

    #[test]
    fn parses_all_fields() {
        let config = PhonebookConfig::from_toml(
            r#"
            db_path = "/tmp/contacts.db"
            remote_url = "https://example.com/contacts.json"
            fetch_timeout_ms = 2500

            [logging]
            level = "warn"
            log_dir = "/var/log/phonebook"
            "#,
        )
        .unwrap();
        assert_eq!(config.fetch_timeout().as_millis(), 2500);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(
            config.logging.log_dir,
            Some(PathBuf::from("/var/log/phonebook"))
        );
    }

    #[test]
    fn rejects_zero_timeout_and_non_http_url() {
        let err = PhonebookConfig::from_toml("fetch_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = PhonebookConfig::from_toml(r#"remote_url = "ftp://x""#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn example_config_parses() {
        let config =
            PhonebookConfig::from_toml(include_str!("../../../phonebook.example.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.remote_url, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = PhonebookConfig::from_toml("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let mut config = PhonebookConfig::default();
        config.remote_url = Some("http://localhost:8080/c.json".to_string());
        let encoded = config.to_toml().unwrap();
        assert_eq!(PhonebookConfig::from_toml(&encoded).unwrap(), config);
    }
}
