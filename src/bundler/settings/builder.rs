//! Builder for constructing Settings.

use super::{BundleSettings, Platform, Settings};
use crate::bundler::{
    builder::find_interpreter,
    error::{Context, ErrorExt},
    platform::RuntimeLibraryTable,
};
use std::path::{Path, PathBuf};

/// Default runtime version segment for the nested library layout.
pub const DEFAULT_RUNTIME_VERSION: &str = "python2.7";

/// Default isolated-environment root, relative to the project directory.
pub const DEFAULT_ENV_ROOT: &str = "../release_env";

/// Builder for constructing [`Settings`].
///
/// Only the entry script is required; everything else falls back to the
/// defaults of the InVEST build.
///
/// # Examples
///
/// ```no_run
/// use invest_bundler::bundler::{BundleSettings, Platform, SettingsBuilder};
///
/// # fn example() -> invest_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .entry_script("src/natcap/invest/cli.py")
///     .platform(Platform::Windows)
///     .bundle_settings(BundleSettings {
///         exclude_binaries: false,
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    entry_script: Option<PathBuf>,
    hooks_dir: Option<PathBuf>,
    env_root: Option<PathBuf>,
    project_dir: Option<PathBuf>,
    platform: Option<Platform>,
    runtime_version: Option<String>,
    interpreter: Option<PathBuf>,
    bundle_settings: BundleSettings,
    dist_path: Option<PathBuf>,
    work_path: Option<PathBuf>,
    hidden_imports: Vec<String>,
    excludes: Vec<String>,
    runtime_libraries: Option<RuntimeLibraryTable>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the entry script.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn entry_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the hooks directory.
    ///
    /// Default: `hooks/` next to the entry script
    pub fn hooks_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.hooks_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the candidate isolated-environment root.
    ///
    /// Default: `../release_env` relative to the project directory
    pub fn env_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.env_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project directory.
    ///
    /// Default: the current working directory
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target platform.
    ///
    /// Default: [`Platform::host`]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the runtime version directory name.
    ///
    /// Default: `python2.7`
    pub fn runtime_version(mut self, version: impl Into<String>) -> Self {
        self.runtime_version = Some(version.into());
        self
    }

    /// Sets the interpreter used to detect the isolated environment.
    ///
    /// Default: first `python`/`python3` found on `PATH`
    pub fn interpreter<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.interpreter = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundle configuration.
    ///
    /// Default: [`BundleSettings::default`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Sets the dist path.
    ///
    /// Default: `dist` under the project directory
    pub fn dist_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the work path.
    ///
    /// Default: `build` under the project directory
    pub fn work_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds import names forced on top of the builtin manifest.
    pub fn hidden_imports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_imports.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds module names the analyzer must leave out.
    pub fn excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Replaces the runtime library table.
    ///
    /// Default: [`RuntimeLibraryTable::default`]
    pub fn runtime_libraries(mut self, table: RuntimeLibraryTable) -> Self {
        self.runtime_libraries = Some(table);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry_script` is missing or the current directory
    /// cannot be read when no project directory was given.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let entry_script = self.entry_script.context("entry_script is required")?;

        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };

        let hooks_dir = self.hooks_dir.unwrap_or_else(|| {
            entry_script
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("hooks")
        });

        let env_root = self
            .env_root
            .unwrap_or_else(|| project_dir.join(DEFAULT_ENV_ROOT));

        let interpreter = self.interpreter.or_else(find_interpreter);

        Ok(Settings::new(
            entry_script,
            hooks_dir,
            env_root,
            project_dir.clone(),
            self.platform.unwrap_or_else(Platform::host),
            self.runtime_version
                .unwrap_or_else(|| DEFAULT_RUNTIME_VERSION.to_string()),
            interpreter,
            self.bundle_settings,
            self.dist_path.unwrap_or_else(|| project_dir.join("dist")),
            self.work_path.unwrap_or_else(|| project_dir.join("build")),
            self.hidden_imports,
            self.excludes,
            self.runtime_libraries.unwrap_or_default(),
        ))
    }
}
