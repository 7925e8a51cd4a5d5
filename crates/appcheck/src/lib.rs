//! App Check activation
//!
//! Binds an attestation provider to an app instance once, tracks whether
//! token auto-refresh is on, and starts the site-key challenge flow for
//! challenge-based providers.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use appcheck::{AppCheck, AppCheckStates, TokioTaskSpawner};
//! # fn demo(
//! #     app: appcheck_core::AppHandle,
//! #     challenge: Arc<dyn appcheck_core::ChallengeInitializer>,
//! #     logger: Arc<dyn appcheck_core::PlatformLogger>,
//! # ) -> appcheck_core::Result<()> {
//! let spawner = Arc::new(TokioTaskSpawner::try_current().expect("inside a tokio runtime"));
//! let app_check = AppCheck::new(Arc::new(AppCheckStates::new()), challenge, spawner);
//! app_check.activate_with_site_key(&app, "site-key", logger, None)?;
//! assert!(app_check.get_state(&app).activated);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod runtime;
pub mod state;

pub use api::AppCheck;
pub use runtime::TokioTaskSpawner;
pub use state::{ActivationRecord, AppCheckStates};
