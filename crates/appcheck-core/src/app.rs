//! Application instance identity
//!
//! Activation state is keyed by [`AppInstanceId`], not by app name: two
//! instances initialized from the same settings are still distinct apps.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppSettings;
use crate::errors::ConfigError;

/// Name given to an app when none is configured.
pub const DEFAULT_APP_NAME: &str = "[DEFAULT]";

/// Opaque identity of one app instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppInstanceId(Uuid);

impl AppInstanceId {
    /// Allocate a fresh, unique identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AppInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app-{}", self.0)
    }
}

/// Backend project options attached to an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Backend application id
    pub app_id: String,
    /// API key used for token exchange requests
    pub api_key: Option<String>,
    /// Backend project id
    pub project_id: Option<String>,
}

/// An initialized application.
#[derive(Debug)]
pub struct AppInstance {
    id: AppInstanceId,
    name: String,
    options: AppOptions,
    automatic_data_collection_enabled: bool,
}

/// Shared handle to an app instance.
pub type AppHandle = Arc<AppInstance>;

impl AppInstance {
    /// Create a new app instance with a fresh identity
    pub fn new(
        name: impl Into<String>,
        options: AppOptions,
        automatic_data_collection_enabled: bool,
    ) -> AppHandle {
        Arc::new(Self {
            id: AppInstanceId::new(),
            name: name.into(),
            options,
            automatic_data_collection_enabled,
        })
    }

    /// Validate settings and create an app instance from them
    pub fn from_settings(settings: AppSettings) -> Result<AppHandle, ConfigError> {
        settings.validate()?;
        Ok(Self::new(
            settings.name,
            settings.options,
            settings.automatic_data_collection_enabled,
        ))
    }

    /// Identity used to key per-app state
    pub fn id(&self) -> AppInstanceId {
        self.id
    }

    /// App name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backend project options
    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    /// Global automatic data collection setting.
    ///
    /// Token auto-refresh follows this value unless overridden.
    pub fn automatic_data_collection_enabled(&self) -> bool {
        self.automatic_data_collection_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_with_same_settings_have_distinct_ids() {
        let a = AppInstance::new(DEFAULT_APP_NAME, AppOptions::default(), true);
        let b = AppInstance::new(DEFAULT_APP_NAME, AppOptions::default(), true);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn from_settings_rejects_blank_app_id() {
        let settings = AppSettings::default();
        assert!(AppInstance::from_settings(settings).is_err());
    }
}
