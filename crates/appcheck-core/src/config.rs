//! App settings
//!
//! Settings come from a TOML document and may be overridden by `APPCHECK_*`
//! environment variables. Loading never validates on its own; call
//! [`AppSettings::validate`] (or [`AppInstance::from_settings`]) once all
//! sources are merged.
//!
//! [`AppInstance::from_settings`]: crate::app::AppInstance::from_settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppOptions, DEFAULT_APP_NAME};
use crate::errors::ConfigError;

const ENV_PREFIX: &str = "APPCHECK_";

/// Settings used to initialize an app instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// App name
    pub name: String,
    /// Global automatic data collection setting
    pub automatic_data_collection_enabled: bool,
    /// Backend project options
    pub options: AppOptions,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            automatic_data_collection_enabled: true,
            options: AppOptions::default(),
        }
    }
}

impl AppSettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Merge `APPCHECK_*` variables from the process environment
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge `APPCHECK_*` key/value pairs; other keys are ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(key) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();
            match key {
                "APP_NAME" => self.name = value.to_string(),
                "APP_ID" => self.options.app_id = value.to_string(),
                "API_KEY" => self.options.api_key = Some(value.to_string()),
                "PROJECT_ID" => self.options.project_id = Some(value.to_string()),
                "AUTOMATIC_DATA_COLLECTION_ENABLED" => {
                    self.automatic_data_collection_enabled = parse_bool(key, value)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate the merged settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("app name must not be empty"));
        }
        if self.options.app_id.trim().is_empty() {
            return Err(ConfigError::invalid("options.app_id must not be empty"));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(format!(
            "{ENV_PREFIX}{key}: expected a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings =
            AppSettings::from_toml_str("[options]\napp_id = \"1:123:web:abc\"\n").unwrap();
        assert_eq!(settings.name, DEFAULT_APP_NAME);
        assert!(settings.automatic_data_collection_enabled);
        assert_eq!(settings.options.app_id, "1:123:web:abc");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn json_settings_use_the_same_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"automatic_data_collection_enabled": false}"#).unwrap();
        assert_eq!(settings.name, DEFAULT_APP_NAME);
        assert!(!settings.automatic_data_collection_enabled);
    }

    #[test]
    fn load_from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "name = \"secondary\"\nautomatic_data_collection_enabled = false\n\n[options]\napp_id = \"app\"\nproject_id = \"proj\""
        )
        .unwrap();

        let settings = AppSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.name, "secondary");
        assert!(!settings.automatic_data_collection_enabled);
        assert_eq!(settings.options.project_id.as_deref(), Some("proj"));
    }

    #[test]
    fn load_from_missing_file_reports_path() {
        let err =
            AppSettings::load_from_file(Path::new("/nonexistent/appcheck.toml")).unwrap_err();
        assert_matches!(err, ConfigError::Read { ref path, .. } if path.ends_with("appcheck.toml"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert_matches!(
            AppSettings::from_toml_str("name = ["),
            Err(ConfigError::Parse(_))
        );
    }

    #[test]
    fn prefixed_vars_override_file_values() {
        let mut settings = AppSettings::default();
        settings
            .merge_with_vars([
                ("APPCHECK_APP_NAME", "from-env"),
                ("APPCHECK_APP_ID", "1:1:web:1"),
                ("APPCHECK_AUTOMATIC_DATA_COLLECTION_ENABLED", "false"),
                ("HOME", "/root"),
            ])
            .unwrap();

        assert_eq!(settings.name, "from-env");
        assert_eq!(settings.options.app_id, "1:1:web:1");
        assert!(!settings.automatic_data_collection_enabled);
    }

    #[test]
    fn unparsable_boolean_is_rejected() {
        let mut settings = AppSettings::default();
        let result =
            settings.merge_with_vars([("APPCHECK_AUTOMATIC_DATA_COLLECTION_ENABLED", "maybe")]);
        assert_matches!(result, Err(ConfigError::Invalid { .. }));
    }

    #[test]
    fn blank_name_fails_validation() {
        let settings = AppSettings {
            name: "  ".to_string(),
            options: AppOptions {
                app_id: "app".to_string(),
                ..AppOptions::default()
            },
            ..AppSettings::default()
        };
        assert_matches!(settings.validate(), Err(ConfigError::Invalid { .. }));
    }
}
