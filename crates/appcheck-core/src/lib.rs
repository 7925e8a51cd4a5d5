//! App Check Core - app identity and attestation collaborator interfaces
//!
//! This crate holds the types every App Check layer agrees on. It contains no
//! activation state and no runtime; those live in the `appcheck` crate.
//!
//! # Contents
//!
//! - [`app`]: application instance identity (`AppInstance`, `AppHandle`)
//! - [`config`]: app settings loaded from TOML and `APPCHECK_*` variables
//! - [`provider`]: attestation providers and the `ProviderKind` discriminant
//! - [`effects`]: collaborator traits (challenge initializer, platform
//!   logger, task spawner)
//! - [`errors`]: activation, challenge and configuration errors

pub mod app;
pub mod config;
pub mod effects;
pub mod errors;
pub mod provider;

pub use app::{AppHandle, AppInstance, AppInstanceId, AppOptions, DEFAULT_APP_NAME};
pub use config::AppSettings;
pub use effects::{ChallengeHandle, ChallengeInitializer, PlatformLogger, TaskSpawner};
pub use errors::{AppCheckError, ChallengeError, ConfigError, Result};
pub use provider::{
    AttestationProvider, CustomProvider, CustomToken, CustomTokenSource, ProviderKind,
    ReCaptchaV3Provider,
};
