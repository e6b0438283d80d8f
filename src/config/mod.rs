//! Optional `bundle.toml` configuration.
//!
//! Values here override builtin defaults and are themselves overridden by
//! command line flags. Relative paths are resolved against the directory of
//! the configuration file.
//!
//! ```toml
//! [bundle]
//! name = "invest"
//! dist_name = "invest_dist"
//! exclude_binaries = true
//!
//! [environment]
//! root = "../release_env"
//! runtime_version = "python2.7"
//!
//! [imports]
//! hidden = ["natcap.invest.ui_server"]
//! excludes = ["tkinter"]
//!
//! [[runtime_libraries.windows]]
//! name = "msvcp90.dll"
//! source = 'C:\Windows\System32\msvcp90.dll'
//! ```

use crate::bundler::{BundleSettings, Platform, RuntimeLibrary, RuntimeLibraryTable};
use crate::error::Result;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "bundle.toml";

/// Parsed configuration file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// `[bundle]` overrides.
    pub bundle: BundleSection,
    /// `[environment]` overrides.
    pub environment: EnvironmentSection,
    /// `[imports]` additions.
    pub imports: ImportsSection,
    /// `[runtime_libraries]` replacements, per platform.
    pub runtime_libraries: RuntimeLibrariesSection,
}

/// `[bundle]` section; every field optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleSection {
    /// Executable base name.
    pub name: Option<String>,
    /// Distribution directory name.
    pub dist_name: Option<String>,
    /// Thin-launcher mode; `false` embeds binaries in the executable.
    pub exclude_binaries: Option<bool>,
    /// Console (true) or windowed (false) executable.
    pub console: Option<bool>,
    /// Launcher prints bootstrap diagnostics.
    pub debug: Option<bool>,
    /// Launcher stub, relative to the configuration file.
    pub bootloader: Option<PathBuf>,
}

/// `[environment]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentSection {
    /// Candidate isolated-environment root, relative to the configuration file.
    pub root: Option<PathBuf>,
    /// Runtime version directory under `lib/` on non-Windows platforms.
    pub runtime_version: Option<String>,
    /// Interpreter used for environment detection.
    pub interpreter: Option<PathBuf>,
}

/// `[imports]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportsSection {
    /// Added to the builtin forced imports; builtin names cannot be removed.
    pub hidden: Vec<String>,
    /// Module names the analyzer must leave out.
    pub excludes: Vec<String>,
}

/// `[runtime_libraries]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeLibrariesSection {
    /// Replaces the Windows entries (MSVC runtime by default).
    pub windows: Option<Vec<RuntimeLibrary>>,
    /// Replaces the macOS entries (none by default).
    pub macos: Option<Vec<RuntimeLibrary>>,
    /// Replaces the Linux entries (none by default).
    pub linux: Option<Vec<RuntimeLibrary>>,
}

impl BundleConfig {
    /// Applies `[bundle]` overrides on top of `base`.
    pub fn apply_bundle(&self, mut base: BundleSettings) -> BundleSettings {
        let section = &self.bundle;
        if let Some(name) = &section.name {
            base.name = name.clone();
        }
        if let Some(dist_name) = &section.dist_name {
            base.dist_name = dist_name.clone();
        }
        if let Some(exclude) = section.exclude_binaries {
            base.exclude_binaries = exclude;
        }
        if section.console.is_some() {
            base.console = section.console;
        }
        if let Some(debug) = section.debug {
            base.debug = debug;
        }
        if section.bootloader.is_some() {
            base.bootloader = section.bootloader.clone();
        }
        base
    }

    /// Default runtime library table with configured platforms replaced.
    pub fn runtime_library_table(&self) -> RuntimeLibraryTable {
        let mut table = RuntimeLibraryTable::default();
        let section = &self.runtime_libraries;
        for (platform, libraries) in [
            (Platform::Windows, &section.windows),
            (Platform::MacOs, &section.macos),
            (Platform::Linux, &section.linux),
        ] {
            if let Some(libraries) = libraries {
                table.set(platform, libraries.clone());
            }
        }
        table
    }

    fn resolve_relative(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(path) = self.bundle.bootloader.as_mut() {
            resolve(path);
        }
        if let Some(path) = self.environment.root.as_mut() {
            resolve(path);
        }
        if let Some(path) = self.environment.interpreter.as_mut() {
            resolve(path);
        }
    }
}

/// Loads and parses the configuration at `path`.
pub fn load_config(path: &Path) -> Result<BundleConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration: {}", path.display()))?;

    let mut config: BundleConfig = toml::from_str(&contents)?;
    if let Some(dir) = path.parent() {
        config.resolve_relative(dir);
    }

    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Loads `bundle.toml` from `dir` if present.
pub fn discover_config(dir: &Path) -> Result<Option<BundleConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        log::debug!("No {} in {}", CONFIG_FILE_NAME, dir.display());
        return Ok(None);
    }
    load_config(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_section() {
        let config: BundleConfig = toml::from_str(
            r#"
            [bundle]
            name = "invest"
            exclude_binaries = false

            [imports]
            hidden = ["natcap.invest.ui_server"]

            [[runtime_libraries.windows]]
            name = "vcruntime140.dll"
            source = "/opt/win/vcruntime140.dll"
            "#,
        )
        .unwrap();

        let bundle = config.apply_bundle(BundleSettings::default());
        assert!(!bundle.exclude_binaries);
        assert_eq!(bundle.dist_name, "invest_dist");
        assert_eq!(config.imports.hidden, ["natcap.invest.ui_server"]);

        let table = config.runtime_library_table();
        assert_eq!(table.get(Platform::Windows).len(), 1);
        assert!(table.get(Platform::Linux).is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<BundleConfig>("[bundle]\nupx = true\n").is_err());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[environment]\nroot = \"../release_env\"\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.environment.root, Some(tmp.path().join("../release_env")));
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();

        let err = load_config(tmp.path()).unwrap_err();

        assert!(matches!(err, crate::error::BundlerError::Anyhow(_)));
        assert!(err.to_string().contains("failed to read configuration"));
    }

    #[test]
    fn missing_config_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discover_config(tmp.path()).unwrap().is_none());
    }
}
