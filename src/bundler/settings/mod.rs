//! Configuration structures for bundling operations.
//!
//! This module provides the settings a bundling run is built from: the
//! target [`Platform`], output layout via [`BundleSettings`], and the
//! [`SettingsBuilder`] that resolves defaults once up front.

mod builder;
mod bundle;
mod core;
mod platform;

// Re-export all public types
pub use builder::{DEFAULT_ENV_ROOT, DEFAULT_RUNTIME_VERSION, SettingsBuilder};
pub use bundle::{BundleSettings, DEFAULT_DIST_NAME, DEFAULT_NAME};
pub use core::Settings;
pub use platform::Platform;
