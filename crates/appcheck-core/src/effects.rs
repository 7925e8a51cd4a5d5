//! Collaborator interfaces called by the activation path.

use std::fmt;

use futures::future::BoxFuture;

use crate::app::AppHandle;
use crate::errors::ChallengeError;

/// Opaque handle to an initialized challenge flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeHandle {
    widget_id: String,
}

impl ChallengeHandle {
    /// Wrap the widget id returned by the challenge service
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
        }
    }

    /// Widget id of the rendered challenge
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }
}

/// Starts the site-key challenge flow for an app.
///
/// `initialize` is called synchronously during activation; only the returned
/// future runs in the background.
pub trait ChallengeInitializer: Send + Sync {
    /// Begin initializing the challenge for `app` with `site_key`
    fn initialize(
        &self,
        app: AppHandle,
        site_key: String,
    ) -> BoxFuture<'static, Result<ChallengeHandle, ChallengeError>>;
}

/// Platform logging dependency handed to `activate`.
pub trait PlatformLogger: fmt::Debug + Send + Sync {
    /// Platform/version string attached to backend requests
    fn platform_info_string(&self) -> String;
}

/// Task spawning contract for runtime implementations.
pub trait TaskSpawner: Send + Sync {
    /// Spawn a background task.
    fn spawn(&self, fut: BoxFuture<'static, ()>);
}
