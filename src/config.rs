//! Configuration management with validation and defaults
//!
//! Server, game and logging settings. Everything has a default; a TOML file
//! may override any subset of them.

use serde::{Deserialize, Serialize};
use std::{net::IpAddr, path::Path, time::Duration};

/// Complete service configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiConfig {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty or "*" allows any
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

/// Game and session settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Newline-delimited word list
    pub word_list_path: String,
    /// Idle time after which a session is forgotten
    pub session_ttl_secs: u64,
    /// Soft cap on stored sessions before expired ones are swept
    pub max_sessions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_list_path: "wordle_words.txt".to_string(),
            session_ttl_secs: 24 * 60 * 60,
            max_sessions: 100_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lexiguess=info,tower_http=info".to_string(),
        }
    }
}

impl LexiConfig {
    /// Read a TOML file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(ConfigValidationError::InvalidValue {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                reason: "must be an IP address".to_string(),
            });
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue {
                field: "server.request_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if self.game.word_list_path.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired("game.word_list_path".to_string()));
        }

        if self.game.session_ttl_secs == 0 {
            return Err(ConfigValidationError::InvalidValue {
                field: "game.session_ttl_secs".to_string(),
                value: "0".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if self.game.max_sessions == 0 {
            return Err(ConfigValidationError::InvalidValue {
                field: "game.max_sessions".to_string(),
                value: "0".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.game.session_ttl_secs)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue { field: String, value: String, reason: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LexiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LexiConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [game]
            word_list_path = "/srv/words.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.game.word_list_path, "/srv/words.txt");
        assert_eq!(config.game.session_ttl_secs, 24 * 60 * 60);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(LexiConfig::from_toml_str("").unwrap(), LexiConfig::default());
    }

    #[test]
    fn test_malformed_toml() {
        let result = LexiConfig::from_toml_str("[server\nport = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nfilter = \"debug\"").unwrap();
        let config = LexiConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_missing_file() {
        let result = LexiConfig::from_toml_file("/no/such/lexiguess.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = LexiConfig::default();
        config.server.host = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        let mut config = LexiConfig::default();
        config.game.session_ttl_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LexiConfig::default();
        config.game.word_list_path = " ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MissingRequired("game.word_list_path".to_string()))
        );
    }

    #[test]
    fn test_duration_conversions() {
        let config = LexiConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
    }
}
