//! Fake apps, providers and collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use appcheck_core::{
    AppHandle, AppInstance, AppInstanceId, AppOptions, ChallengeError, ChallengeHandle,
    ChallengeInitializer, CustomProvider, CustomToken, CustomTokenSource, PlatformLogger,
};
use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::Mutex;

/// Site key used by reCAPTCHA providers in tests.
pub const FAKE_SITE_KEY: &str = "fake-site-key";
/// Token minted by [`FakeCustomTokenSource`].
pub const FAKE_CUSTOM_TOKEN: &str = "fake-custom-token";
/// Platform string reported by [`FakePlatformLogger`].
pub const FAKE_PLATFORM_INFO: &str = "fire-core/1.0.0 fire-app-check/0.1.0";

/// Overrides for [`fake_app_with`].
#[derive(Debug, Clone)]
pub struct FakeAppOptions {
    /// App name
    pub name: String,
    /// Global automatic data collection setting
    pub automatic_data_collection_enabled: bool,
}

impl Default for FakeAppOptions {
    fn default() -> Self {
        Self {
            name: "appName".to_string(),
            automatic_data_collection_enabled: true,
        }
    }
}

/// App with default fake options.
pub fn fake_app() -> AppHandle {
    fake_app_with(FakeAppOptions::default())
}

/// App built from `overrides` and fixed fake backend options.
pub fn fake_app_with(overrides: FakeAppOptions) -> AppHandle {
    AppInstance::new(
        overrides.name,
        AppOptions {
            app_id: "1:777777777777:web:d93b5ca1475efe57".to_string(),
            api_key: Some("AIzaSyA".to_string()),
            project_id: Some("projectId".to_string()),
        },
        overrides.automatic_data_collection_enabled,
    )
}

/// Token source that always returns [`FAKE_CUSTOM_TOKEN`].
#[derive(Debug, Default)]
pub struct FakeCustomTokenSource;

#[async_trait]
impl CustomTokenSource for FakeCustomTokenSource {
    async fn get_token(&self) -> Result<CustomToken, ChallengeError> {
        Ok(CustomToken {
            token: FAKE_CUSTOM_TOKEN.to_string(),
            expire_time_millis: 1_000 * 60 * 60,
        })
    }
}

/// Custom provider over [`FakeCustomTokenSource`].
pub fn fake_custom_token_provider() -> Arc<CustomProvider> {
    Arc::new(CustomProvider::new(Arc::new(FakeCustomTokenSource)))
}

/// Platform logger reporting [`FAKE_PLATFORM_INFO`].
#[derive(Debug, Default)]
pub struct FakePlatformLogger;

impl PlatformLogger for FakePlatformLogger {
    fn platform_info_string(&self) -> String {
        FAKE_PLATFORM_INFO.to_string()
    }
}

/// Shared [`FakePlatformLogger`] handle.
pub fn fake_platform_logger() -> Arc<dyn PlatformLogger> {
    Arc::new(FakePlatformLogger)
}

/// Challenge initializer that records every call.
///
/// The returned future resolves immediately; `completions` counts how many of
/// them have been polled to completion.
#[derive(Debug, Default)]
pub struct RecordingChallengeInitializer {
    calls: Mutex<Vec<(AppInstanceId, String)>>,
    completions: Arc<AtomicUsize>,
    failure: Option<String>,
}

impl RecordingChallengeInitializer {
    /// Initializer whose futures succeed.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Initializer whose futures fail with `message`.
    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.into()),
            ..Self::default()
        })
    }

    /// `(app id, site key)` for every `initialize` call, in order
    pub fn calls(&self) -> Vec<(AppInstanceId, String)> {
        self.calls.lock().clone()
    }

    /// Number of returned futures polled to completion
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

impl ChallengeInitializer for RecordingChallengeInitializer {
    fn initialize(
        &self,
        app: AppHandle,
        site_key: String,
    ) -> BoxFuture<'static, Result<ChallengeHandle, ChallengeError>> {
        self.calls.lock().push((app.id(), site_key.clone()));
        let completions = Arc::clone(&self.completions);
        let failure = self.failure.clone();
        Box::pin(async move {
            completions.fetch_add(1, Ordering::SeqCst);
            match failure {
                Some(message) => Err(ChallengeError::new(message)),
                None => Ok(ChallengeHandle::new(format!("widget-{site_key}"))),
            }
        })
    }
}
