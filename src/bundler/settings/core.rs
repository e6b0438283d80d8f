//! Core Settings struct and implementations.

use super::{BundleSettings, Platform};
use crate::bundler::platform::RuntimeLibraryTable;
use std::path::{Path, PathBuf};

/// Main settings for a bundling run.
///
/// Constructed once via [`SettingsBuilder`](super::SettingsBuilder) and never
/// mutated afterwards.
///
/// # Examples
///
/// ```no_run
/// use invest_bundler::bundler::{Platform, SettingsBuilder};
///
/// # fn example() -> invest_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .entry_script("src/natcap/invest/cli.py")
///     .platform(Platform::Linux)
///     .build()?;
/// assert_eq!(settings.hooks_dir(), std::path::Path::new("src/natcap/invest/hooks"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Script the analysis starts from.
    entry_script: PathBuf,

    /// Directory of analyzer hooks.
    hooks_dir: PathBuf,

    /// Candidate isolated-environment root.
    env_root: PathBuf,

    /// Project directory, appended after any isolated-environment paths.
    project_dir: PathBuf,

    /// Target platform, fixed for the run.
    platform: Platform,

    /// Runtime version segment of the nested library directory (e.g. `python2.7`).
    runtime_version: String,

    /// Interpreter the analyzer runs under, if one could be located.
    interpreter: Option<PathBuf>,

    /// Output layout and executable options.
    bundle_settings: BundleSettings,

    /// Root of collected distributions.
    dist_path: PathBuf,

    /// Scratch directory for intermediate files.
    work_path: PathBuf,

    /// Import names forced in addition to the builtin manifest.
    hidden_imports: Vec<String>,

    /// Module names the analyzer must leave out.
    excludes: Vec<String>,

    /// Platform runtime libraries to inject.
    runtime_libraries: RuntimeLibraryTable,
}

impl Settings {
    /// Returns the entry script path.
    pub fn entry_script(&self) -> &Path {
        &self.entry_script
    }

    /// Returns the hooks directory.
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    /// Returns the candidate isolated-environment root.
    pub fn env_root(&self) -> &Path {
        &self.env_root
    }

    /// Returns the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the runtime version directory name.
    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    /// Returns the interpreter path, if known.
    pub fn interpreter(&self) -> Option<&Path> {
        self.interpreter.as_deref()
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns the dist path.
    pub fn dist_path(&self) -> &Path {
        &self.dist_path
    }

    /// Returns the work path.
    pub fn work_path(&self) -> &Path {
        &self.work_path
    }

    /// Returns the configured extra hidden imports.
    pub fn hidden_imports(&self) -> &[String] {
        &self.hidden_imports
    }

    /// Returns the excluded module names.
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Returns the runtime library table.
    pub fn runtime_libraries(&self) -> &RuntimeLibraryTable {
        &self.runtime_libraries
    }

    /// Directory the collected distribution is written to.
    pub fn dist_dir(&self) -> PathBuf {
        self.dist_path.join(&self.bundle_settings.dist_name)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        entry_script: PathBuf,
        hooks_dir: PathBuf,
        env_root: PathBuf,
        project_dir: PathBuf,
        platform: Platform,
        runtime_version: String,
        interpreter: Option<PathBuf>,
        bundle_settings: BundleSettings,
        dist_path: PathBuf,
        work_path: PathBuf,
        hidden_imports: Vec<String>,
        excludes: Vec<String>,
        runtime_libraries: RuntimeLibraryTable,
    ) -> Self {
        Self {
            entry_script,
            hooks_dir,
            env_root,
            project_dir,
            platform,
            runtime_version,
            interpreter,
            bundle_settings,
            dist_path,
            work_path,
            hidden_imports,
            excludes,
            runtime_libraries,
        }
    }
}
