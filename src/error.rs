//! Error types and handling for the `ClimaCast` backend

use thiserror::Error;

/// Main error type for the `ClimaCast` backend
#[derive(Error, Debug)]
pub enum ClimacastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream weather API errors (non-200, malformed payload)
    #[error("Upstream API error: {message}")]
    Upstream { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// HTTP transport errors from the upstream client
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl ClimacastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream API error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message for API responses
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimacastError::Config { .. } => {
                "API key not configured".to_string()
            }
            ClimacastError::Upstream { .. } | ClimacastError::Http { .. } => {
                "Failed to fetch weather data".to_string()
            }
            ClimacastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ClimacastError::Io { .. } => {
                "File operation failed".to_string()
            }
            ClimacastError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ClimacastError::config("missing API key");
        assert!(matches!(config_err, ClimacastError::Config { .. }));

        let upstream_err = ClimacastError::upstream("city not found");
        assert!(matches!(upstream_err, ClimacastError::Upstream { .. }));

        let validation_err = ClimacastError::validation("days must be at least 1");
        assert!(matches!(validation_err, ClimacastError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ClimacastError::config("test");
        assert!(config_err.user_message().contains("API key"));

        let upstream_err = ClimacastError::upstream("test");
        assert!(upstream_err.user_message().contains("Failed to fetch"));

        let validation_err = ClimacastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClimacastError = io_err.into();
        assert!(matches!(err, ClimacastError::Io { .. }));
    }
}
