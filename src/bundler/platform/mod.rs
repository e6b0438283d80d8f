//! Platform bundle policy.
//!
//! Decides, from the target [`Platform`] alone, which runtime libraries are
//! injected into the binaries, which suffix the executable carries, and the
//! default console mode.
//!
//! Library sources are looked up in a [`RuntimeLibraryTable`] rather than
//! written inline, so configuration and tests can point them elsewhere. The
//! sources are not checked here: a missing file fails the collect step.

mod windows;

use crate::bundler::{analyzer::Artifact, settings::Platform};
use std::{collections::HashMap, path::PathBuf};

/// A runtime library to ship with every bundle for a platform.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
pub struct RuntimeLibrary {
    /// File name inside the bundle.
    pub name: String,
    /// Absolute path on the build machine.
    pub source: PathBuf,
}

impl RuntimeLibrary {
    /// Creates a table entry.
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Runtime libraries keyed by platform.
///
/// The default table injects the MSVC runtime on Windows and nothing
/// elsewhere.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuntimeLibraryTable {
    entries: HashMap<Platform, Vec<RuntimeLibrary>>,
}

impl RuntimeLibraryTable {
    /// A table that injects nothing on any platform.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Replaces the libraries for `platform`.
    pub fn set(&mut self, platform: Platform, libraries: Vec<RuntimeLibrary>) {
        self.entries.insert(platform, libraries);
    }

    /// Libraries for `platform`, in injection order.
    pub fn get(&self, platform: Platform) -> &[RuntimeLibrary] {
        self.entries.get(&platform).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for RuntimeLibraryTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(Platform::Windows, windows::msvc_runtime());
        table
    }
}

/// Outcome of the policy for one platform.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformBundle {
    /// Binaries appended after the analyzer's binaries.
    pub injected_binaries: Vec<Artifact>,
    /// Executable file-name suffix (`.exe` or empty).
    pub executable_suffix: &'static str,
    /// Default console mode.
    pub console: bool,
}

impl PlatformBundle {
    /// Full executable file name for `base`.
    pub fn executable_name(&self, base: &str) -> String {
        format!("{base}{}", self.executable_suffix)
    }
}

/// Evaluates the bundle policy for `platform`.
pub fn evaluate(platform: Platform, table: &RuntimeLibraryTable) -> PlatformBundle {
    let injected_binaries: Vec<Artifact> = table
        .get(platform)
        .iter()
        .map(|lib| Artifact::platform_runtime(lib.name.clone(), lib.source.clone()))
        .collect();

    for binary in &injected_binaries {
        log::debug!(
            "Injecting {} runtime library {} from {}",
            platform,
            binary.name,
            binary.source.display()
        );
    }

    PlatformBundle {
        injected_binaries,
        executable_suffix: platform.executable_suffix(),
        console: true,
    }
}
