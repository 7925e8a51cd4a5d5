//! App Check Testing Infrastructure
//!
//! Fakes for the collaborators the activation path talks to, plus helpers
//! for building throwaway app instances.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```rust,no_run
//! use appcheck_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     let app = fake_app_with(FakeAppOptions {
//!         automatic_data_collection_enabled: false,
//!         ..FakeAppOptions::default()
//!     });
//!     let initializer = RecordingChallengeInitializer::new();
//!     // ... build an AppCheck over the fakes
//! }
//! ```

pub mod fakes;
pub mod spawner;

pub use fakes::*;
pub use spawner::QueuedSpawner;

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
