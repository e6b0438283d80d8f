//! Forced imports.
//!
//! Some modules are only reached through names built at runtime (plugin
//! loading, generated version modules) and static analysis never sees them.
//! Leaving one out does not fail the build; it fails the packaged program
//! at launch with a missing-module error. Treat this list as an allowlist
//! that only grows.

use std::collections::BTreeSet;

/// Import names always forced into the bundle.
pub const BUILTIN_HIDDEN_IMPORTS: &[&str] = &[
    "natcap",
    "natcap.invest",
    "natcap.versioner",
    "natcap.versioner.version",
    "natcap.invest.version",
    "yaml",
    "distutils",
    "distutils.dist",
    // not picked up on mac builds
    "rtree",
];

/// Set of fully-qualified import names the analyzer must include.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct DependencyManifest {
    names: BTreeSet<String>,
}

impl DependencyManifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin manifest.
    pub fn builtin() -> Self {
        BUILTIN_HIDDEN_IMPORTS.iter().copied().collect()
    }

    /// Adds `name`. Adding an existing name is a no-op.
    ///
    /// Returns whether the name was new.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Whether `name` is forced.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterates names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the manifest is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for DependencyManifest {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for DependencyManifest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut manifest = Self::new();
        manifest.extend(iter);
        manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_a_no_op() {
        let mut manifest = DependencyManifest::builtin();
        let before = manifest.len();
        assert!(!manifest.insert("yaml"));
        assert_eq!(manifest.len(), before);
    }

    #[test]
    fn extending_keeps_every_builtin_name() {
        let mut manifest = DependencyManifest::builtin();
        manifest.extend(["natcap.invest.ui", "rtree"]);
        for name in BUILTIN_HIDDEN_IMPORTS {
            assert!(manifest.contains(name), "{name} missing");
        }
        assert!(manifest.contains("natcap.invest.ui"));
    }

    #[test]
    fn serializes_as_a_sorted_list() {
        let manifest: DependencyManifest = ["yaml", "rtree", "yaml"].into_iter().collect();
        assert_eq!(serde_json::to_string(&manifest).unwrap(), r#"["rtree","yaml"]"#);
    }
}
