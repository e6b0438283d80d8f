//! Isolated runtime environment detection.
//!
//! A build may run from an environment directory collocated with the project
//! (the release environment). When it does, that environment's package
//! directories must shadow the globally installed ones.

use crate::bundler::settings::Platform;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// An isolated environment the current interpreter is running from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IsolatedEnvironment {
    library_dir: PathBuf,
}

impl IsolatedEnvironment {
    /// Detects whether `interpreter` runs from the environment at `root`.
    ///
    /// Both conditions must hold: the interpreter path starts with `root`, and
    /// the platform library directory exists under `root`. Anything else,
    /// including a missing root, means "not isolated" and yields `None`.
    ///
    /// The prefix test compares the absolute path strings, so a sibling such
    /// as `release_env_old` also matches `release_env`.
    pub fn detect(
        interpreter: Option<&Path>,
        root: &Path,
        platform: Platform,
        runtime_version: &str,
    ) -> Option<Self> {
        let root = match root.absolutize() {
            Ok(root) => root.into_owned(),
            Err(e) => {
                log::debug!("Cannot absolutize environment root {}: {}", root.display(), e);
                return None;
            }
        };

        let library_dir = library_dir(&root, platform, runtime_version);
        let has_library = library_dir.is_dir();
        let runs_from_root = interpreter.is_some_and(|exe| starts_with_root(exe, &root));

        log::debug!(
            "Environment {}: library dir {} exists={}, interpreter {:?} inside={}",
            root.display(),
            library_dir.display(),
            has_library,
            interpreter,
            runs_from_root
        );

        (has_library && runs_from_root).then_some(Self { library_dir })
    }

    /// Library directory of the environment.
    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    /// Installed-packages directory of the environment.
    pub fn site_packages(&self) -> PathBuf {
        self.library_dir.join("site-packages")
    }

    /// Extra search paths, narrowest first.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        vec![self.site_packages(), self.library_dir.clone()]
    }
}

/// Library directory under an environment root.
///
/// Windows installs flat under `Lib`; every other platform nests under the
/// runtime version, e.g. `lib/python2.7`.
pub fn library_dir(root: &Path, platform: Platform, runtime_version: &str) -> PathBuf {
    match platform {
        Platform::Windows => root.join("Lib"),
        Platform::MacOs | Platform::Linux => root.join("lib").join(runtime_version),
    }
}

/// Extra search paths contributed by an isolated environment at `root`.
///
/// Empty when the run is not inside that environment.
pub fn resolve_environment_paths(
    interpreter: Option<&Path>,
    root: &Path,
    platform: Platform,
    runtime_version: &str,
) -> Vec<PathBuf> {
    IsolatedEnvironment::detect(interpreter, root, platform, runtime_version)
        .map(|env| env.search_paths())
        .unwrap_or_default()
}

fn starts_with_root(exe: &Path, root: &Path) -> bool {
    match exe.absolutize() {
        Ok(exe) => exe
            .to_string_lossy()
            .starts_with(root.to_string_lossy().as_ref()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_dir_is_flat_on_windows_only() {
        let root = Path::new("/env");
        assert_eq!(library_dir(root, Platform::Windows, "python2.7"), root.join("Lib"));
        assert_eq!(
            library_dir(root, Platform::Linux, "python2.7"),
            root.join("lib").join("python2.7")
        );
        assert_eq!(
            library_dir(root, Platform::MacOs, "python3.11"),
            root.join("lib").join("python3.11")
        );
    }

    #[test]
    fn missing_root_is_not_an_error() {
        let paths = resolve_environment_paths(
            Some(Path::new("/usr/bin/python")),
            Path::new("/definitely/not/here/release_env"),
            Platform::Linux,
            "python2.7",
        );
        assert!(paths.is_empty());
    }

    #[test]
    fn no_interpreter_means_not_isolated() {
        let paths =
            resolve_environment_paths(None, Path::new("/"), Platform::Windows, "python2.7");
        assert!(paths.is_empty());
    }
}
