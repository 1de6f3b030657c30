//! Error types for the LexiGuess service
//!
//! Startup and server failures. Per-request problems (bad guesses, store
//! hiccups) live next to the code that raises them and never reach this level.

use crate::{
    config::{ConfigError, ConfigValidationError},
    dictionary::LoadError,
};

/// Root error type for the binary
#[derive(Debug, thiserror::Error)]
pub enum LexiError {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Word list unusable
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] LoadError),

    /// Socket or other OS-level failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigValidationError> for LexiError {
    fn from(e: ConfigValidationError) -> Self {
        LexiError::Configuration(ConfigError::Invalid(e))
    }
}

pub type LexiResult<T> = Result<T, LexiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let error: LexiError = ConfigValidationError::MissingRequired("game.word_list_path".to_string()).into();
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("game.word_list_path"));
    }

    #[test]
    fn test_dictionary_error_conversion() {
        let load = LoadError::Empty {
            source_name: "words.txt".to_string(),
        };
        let error: LexiError = load.into();
        match error {
            LexiError::Dictionary(_) => {}
            _ => panic!("Expected dictionary error"),
        }
    }

    #[test]
    fn test_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let error = LexiError::from(io);
        assert!(error.source().is_some());
    }
}
