//! Activation entry points
//!
//! [`AppCheck`] binds an attestation provider to an app exactly once and lets
//! callers toggle token auto-refresh at any time. For site-key providers the
//! challenge flow is started on activation and left to finish in the
//! background; its outcome never changes the result of `activate`.

use std::sync::Arc;

use appcheck_core::{
    AppCheckError, AppHandle, AttestationProvider, ChallengeInitializer, PlatformLogger,
    ProviderKind, ReCaptchaV3Provider, Result, TaskSpawner,
};
use tracing::{debug, info, warn};

use crate::state::{ActivationRecord, AppCheckStates};

/// Activation service over a shared state store.
#[derive(Clone)]
pub struct AppCheck {
    states: Arc<AppCheckStates>,
    challenge: Arc<dyn ChallengeInitializer>,
    spawner: Arc<dyn TaskSpawner>,
}

impl AppCheck {
    /// Create a service over `states`.
    ///
    /// `challenge` starts site-key challenge flows; `spawner` drives them.
    pub fn new(
        states: Arc<AppCheckStates>,
        challenge: Arc<dyn ChallengeInitializer>,
        spawner: Arc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            states,
            challenge,
            spawner,
        }
    }

    /// Shared state store
    pub fn states(&self) -> &Arc<AppCheckStates> {
        &self.states
    }

    /// Snapshot of the activation record for `app`
    pub fn get_state(&self, app: &AppHandle) -> ActivationRecord {
        self.states.get_state(app)
    }

    /// Bind `provider` to `app`.
    ///
    /// `is_token_auto_refresh_enabled` overrides the app's automatic data
    /// collection setting when given. Fails with
    /// [`AppCheckError::AlreadyActivated`] if `app` was activated before, in
    /// which case nothing is changed and no challenge is started.
    pub fn activate(
        &self,
        app: &AppHandle,
        provider: Arc<dyn AttestationProvider>,
        platform_logger: Arc<dyn PlatformLogger>,
        is_token_auto_refresh_enabled: Option<bool>,
    ) -> Result<()> {
        let auto_refresh = self.states.update_state(app, |record| {
            if record.activated {
                return Err(AppCheckError::already_activated(app.name()));
            }
            let auto_refresh = is_token_auto_refresh_enabled
                .unwrap_or_else(|| app.automatic_data_collection_enabled());
            *record = ActivationRecord {
                activated: true,
                provider: Some(Arc::clone(&provider)),
                platform_logger: Some(platform_logger),
                is_token_auto_refresh_enabled: auto_refresh,
            };
            Ok(auto_refresh)
        });
        let auto_refresh = match auto_refresh {
            Ok(auto_refresh) => auto_refresh,
            Err(err) => {
                warn!(app = %app.name(), code = err.code(), "rejected repeated activation");
                return Err(err);
            }
        };

        let kind = provider.kind();
        info!(
            app = %app.name(),
            provider = kind.label(),
            auto_refresh,
            "app check activated"
        );

        if let ProviderKind::SiteKeyChallenge { site_key } = kind {
            self.start_challenge(app, site_key);
        }
        Ok(())
    }

    /// Activate `app` with a reCAPTCHA v3 provider for `site_key`.
    pub fn activate_with_site_key(
        &self,
        app: &AppHandle,
        site_key: impl Into<String>,
        platform_logger: Arc<dyn PlatformLogger>,
        is_token_auto_refresh_enabled: Option<bool>,
    ) -> Result<()> {
        let provider = Arc::new(ReCaptchaV3Provider::new(site_key));
        self.activate(app, provider, platform_logger, is_token_auto_refresh_enabled)
    }

    /// Overwrite the auto-refresh flag for `app`, creating its record if needed.
    pub fn set_token_auto_refresh_enabled(&self, app: &AppHandle, enabled: bool) {
        self.states.update_state(app, |record| {
            record.is_token_auto_refresh_enabled = enabled;
        });
        debug!(app = %app.name(), enabled, "token auto-refresh updated");
    }

    fn start_challenge(&self, app: &AppHandle, site_key: &str) {
        let pending = self
            .challenge
            .initialize(Arc::clone(app), site_key.to_owned());
        let app_name = app.name().to_owned();
        self.spawner.spawn(Box::pin(async move {
            match pending.await {
                Ok(handle) => {
                    debug!(app = %app_name, widget = handle.widget_id(), "challenge initialized");
                }
                Err(err) => {
                    warn!(app = %app_name, error = %err, "challenge initialization failed");
                }
            }
        }));
    }
}
