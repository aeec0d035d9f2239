//! Error types and handling for the `Tripwise` application

use thiserror::Error;

/// Main error type for the `Tripwise` application
#[derive(Error, Debug)]
pub enum TripwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Errors talking to external providers (geocoding, places, weather)
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

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

impl TripwiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripwiseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripwiseError::Provider { .. } => {
                "Unable to reach external travel services. Please check your internet connection."
                    .to_string()
            }
            TripwiseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripwiseError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            TripwiseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TripwiseError::General { message } => message.clone(),
        }
    }
}
