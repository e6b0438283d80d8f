//! Hook directory discovery.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Verifies `hooks_dir` exists and lists the `hook-*` files in it.
///
/// # Errors
///
/// [`Error::MissingInput`] when the directory does not exist.
pub fn discover_hooks(hooks_dir: &Path) -> Result<Vec<PathBuf>> {
    if !hooks_dir.is_dir() {
        return Err(Error::MissingInput {
            what: "hooks directory",
            path: hooks_dir.to_path_buf(),
        });
    }

    // metacharacters in the directory itself are literal
    let pattern = PathBuf::from(glob::Pattern::escape(&hooks_dir.to_string_lossy())).join("hook-*");
    let mut hooks: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable hook: {e}");
                None
            }
        })
        .collect();
    hooks.sort();

    log::info!("Found {} hooks in {}", hooks.len(), hooks_dir.display());
    for hook in &hooks {
        log::debug!("  - {}", hook.display());
    }

    Ok(hooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_hook_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("hook-natcap.invest.py"), b"").unwrap();
        std::fs::write(tmp.path().join("README"), b"").unwrap();

        let hooks = discover_hooks(tmp.path()).unwrap();

        assert_eq!(hooks, vec![tmp.path().join("hook-natcap.invest.py")]);
    }

    #[test]
    fn bracketed_directory_names_are_literal() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("[ci]").join("hooks");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("hook-natcap.invest.py"), b"").unwrap();

        let hooks = discover_hooks(&dir).unwrap();

        assert_eq!(hooks, vec![dir.join("hook-natcap.invest.py")]);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover_hooks(&tmp.path().join("hooks")).unwrap_err();
        assert!(matches!(err, Error::MissingInput { what: "hooks directory", .. }));
    }
}
