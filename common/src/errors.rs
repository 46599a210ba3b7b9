//! Error types shared by the settings layer and the option resolver.

use thiserror::Error;

/// Errors raised while reading settings or resolving connection options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The settings provider has no value for the key.
    #[error("missing setting: {0}")]
    MissingSetting(String),

    /// The settings provider holds a value of the wrong shape.
    #[error("invalid setting {key}: expected {expected}, found {found}")]
    InvalidSetting {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// A backend identifier outside the supported set.
    #[error("unsupported database type: {0}")]
    UnsupportedBackend(String),

    /// A path could not be made absolute.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Option record whose discriminator disagrees with its connection detail.
    #[error("connection detail does not match backend {0}")]
    BackendMismatch(String),
}

impl AppError {
    /// Builds an [`AppError::InvalidSetting`] from the offending JSON value.
    pub fn invalid_setting(key: &str, expected: &'static str, found: &serde_json::Value) -> Self {
        AppError::InvalidSetting {
            key: key.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;
