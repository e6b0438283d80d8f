//! Inputs handed to the analyzer: module search paths, hooks and forced imports.

mod environment;
mod hooks;
mod manifest;

pub use environment::{IsolatedEnvironment, library_dir, resolve_environment_paths};
pub use hooks::discover_hooks;
pub use manifest::{BUILTIN_HIDDEN_IMPORTS, DependencyManifest};

use std::path::{Path, PathBuf};

/// Ordered module search path.
///
/// Earlier entries shadow later ones. Isolated-environment entries always
/// come before the project directory.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SearchPathList {
    paths: Vec<PathBuf>,
}

impl SearchPathList {
    /// Builds the list from environment paths followed by the project directory.
    pub fn compose(environment_paths: Vec<PathBuf>, project_dir: &Path) -> Self {
        let mut paths = environment_paths;
        paths.push(project_dir.to_path_buf());
        Self { paths }
    }

    /// Paths in priority order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
