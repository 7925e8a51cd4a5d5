//! Error types for App Check
//!
//! Activation has exactly one failure mode. Challenge and configuration
//! errors are kept separate so they can never leak out of `activate`.

use std::path::PathBuf;

/// Errors returned by the activation API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppCheckError {
    /// The app already has an attestation provider bound to it.
    #[error(
        "You are trying to activate AppCheck for app {app_name}, while it is already activated. \
         AppCheck can only be activated once."
    )]
    AlreadyActivated {
        /// Name of the app that was activated twice
        app_name: String,
    },
}

impl AppCheckError {
    /// Create an already-activated error for the named app
    pub fn already_activated(app_name: impl Into<String>) -> Self {
        Self::AlreadyActivated {
            app_name: app_name.into(),
        }
    }

    /// Stable, namespaced error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyActivated { .. } => "appCheck/already-activated",
        }
    }
}

/// Result alias for the activation API
pub type Result<T> = std::result::Result<T, AppCheckError>;

/// Failure reported by a challenge initializer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Challenge initialization failed: {message}")]
pub struct ChallengeError {
    /// Error message describing the failure
    pub message: String,
}

impl ChallengeError {
    /// Create a challenge error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while loading or validating app settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid TOML for `AppSettings`
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid value
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
