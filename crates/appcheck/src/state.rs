//! Per-app activation state
//!
//! [`AppCheckStates`] owns the mapping from app identity to
//! [`ActivationRecord`]. Records are created on first access and live as long
//! as the store. The store is passed around by handle so tests can inject a
//! fresh one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use appcheck_core::{AppInstance, AppInstanceId, AttestationProvider, PlatformLogger};
use parking_lot::Mutex;

/// Activation state for one app.
#[derive(Clone)]
pub struct ActivationRecord {
    /// Set once, on the first successful activation
    pub activated: bool,
    /// Provider bound at activation; never replaced afterwards
    pub provider: Option<Arc<dyn AttestationProvider>>,
    /// Platform logging dependency passed at activation
    pub platform_logger: Option<Arc<dyn PlatformLogger>>,
    /// Whether tokens are renewed before they expire
    pub is_token_auto_refresh_enabled: bool,
}

impl ActivationRecord {
    /// Default record for `app`: not activated, auto-refresh following the
    /// app's automatic data collection setting.
    pub fn for_app(app: &AppInstance) -> Self {
        Self {
            activated: false,
            provider: None,
            platform_logger: None,
            is_token_auto_refresh_enabled: app.automatic_data_collection_enabled(),
        }
    }
}

impl fmt::Debug for ActivationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationRecord")
            .field("activated", &self.activated)
            .field("provider", &self.provider.as_ref().map(|p| p.kind().label()))
            .field("has_platform_logger", &self.platform_logger.is_some())
            .field(
                "is_token_auto_refresh_enabled",
                &self.is_token_auto_refresh_enabled,
            )
            .finish()
    }
}

/// Keyed store of activation records.
#[derive(Debug, Default)]
pub struct AppCheckStates {
    records: Mutex<HashMap<AppInstanceId, ActivationRecord>>,
}

impl AppCheckStates {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the record for `app`, creating the default on first access
    pub fn get_state(&self, app: &AppInstance) -> ActivationRecord {
        self.update_state(app, |record| record.clone())
    }

    /// Run `f` against the record for `app` under the store lock.
    ///
    /// Only the activation service mutates records; `f` must not call back
    /// into the store.
    pub(crate) fn update_state<R>(
        &self,
        app: &AppInstance,
        f: impl FnOnce(&mut ActivationRecord) -> R,
    ) -> R {
        let mut records = self.records.lock();
        let record = records
            .entry(app.id())
            .or_insert_with(|| ActivationRecord::for_app(app));
        f(record)
    }

    /// Number of apps with a record
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no app has been seen yet
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appcheck_core::{AppOptions, ReCaptchaV3Provider};

    fn app(automatic_data_collection_enabled: bool) -> appcheck_core::AppHandle {
        AppInstance::new(
            "test",
            AppOptions::default(),
            automatic_data_collection_enabled,
        )
    }

    #[test]
    fn first_access_creates_default_record() {
        let states = AppCheckStates::new();
        let app = app(false);
        assert!(states.is_empty());

        let record = states.get_state(&app);
        assert!(!record.activated);
        assert!(record.provider.is_none());
        assert!(!record.is_token_auto_refresh_enabled);
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn records_are_keyed_per_instance() {
        let states = AppCheckStates::new();
        let first = app(true);
        let second = app(true);

        states.update_state(&first, |record| record.activated = true);

        assert!(states.get_state(&first).activated);
        assert!(!states.get_state(&second).activated);
        assert_eq!(states.len(), 2);
    }

    #[test]
    fn snapshots_do_not_write_back() {
        let states = AppCheckStates::new();
        let app = app(true);
        let provider: Arc<dyn AttestationProvider> = Arc::new(ReCaptchaV3Provider::new("key"));
        states.update_state(&app, |record| {
            record.activated = true;
            record.provider = Some(provider.clone());
        });

        let mut snapshot = states.get_state(&app);
        snapshot.activated = false;
        snapshot.provider = None;

        let record = states.get_state(&app);
        assert!(record.activated);
        assert!(Arc::ptr_eq(record.provider.as_ref().unwrap(), &provider));
    }
}
