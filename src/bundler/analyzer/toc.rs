//! Artifact tables produced by the analyzer.

use std::{collections::HashSet, path::PathBuf};

/// Category of a bundled file.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArtifactKind {
    /// Compiled pure module destined for the code archive.
    PyModule,
    /// Entry-point launcher code.
    PySource,
    /// Native shared library or executable.
    Binary,
    /// Native extension module.
    Extension,
    /// Plain data file.
    Data,
    /// Auxiliary archive shipped next to the executable.
    ZipFile,
}

/// Where a binary came from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactOrigin {
    /// Discovered by the analyzer.
    #[default]
    Discovered,
    /// Injected by the platform policy.
    PlatformRuntime,
}

/// One entry of a table of contents: a logical name inside the bundle and
/// the file it is read from.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Artifact {
    /// Logical name, relative to the bundle root (or dotted module name for
    /// compiled units).
    pub name: String,
    /// Source file on the build machine.
    pub source: PathBuf,
    /// Category tag.
    pub kind: ArtifactKind,
    /// Provenance of the entry.
    #[serde(default)]
    pub origin: ArtifactOrigin,
}

impl Artifact {
    /// Creates an artifact discovered by the analyzer.
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>, kind: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            kind,
            origin: ArtifactOrigin::Discovered,
        }
    }

    /// Creates a platform runtime binary.
    pub fn platform_runtime(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            kind: ArtifactKind::Binary,
            origin: ArtifactOrigin::PlatformRuntime,
        }
    }
}

/// Ordered table of artifacts with unique logical names.
///
/// Insertion keeps the first entry for a name and drops later duplicates.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Toc {
    entries: Vec<Artifact>,
}

impl Toc {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry with `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|a| a.name == name)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Artifact] {
        &self.entries
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Artifact> for Toc {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        let mut toc = Toc::new();
        let mut seen = HashSet::new();
        for artifact in iter {
            if seen.insert(artifact.name.clone()) {
                toc.entries.push(artifact);
            } else {
                log::warn!(
                    "Duplicate artifact name `{}` ({}), keeping the first entry",
                    artifact.name,
                    artifact.source.display()
                );
            }
        }
        toc
    }
}

impl<'de> serde::Deserialize<'de> for Toc {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Artifact>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Toc {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The analyzer's output: independent tables per bundle category.
///
/// Names are unique within a table but may repeat across tables.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ArtifactCollections {
    /// Compiled pure modules for the code archive.
    pub pure: Toc,
    /// Entry-point launcher scripts.
    pub scripts: Toc,
    /// Native binaries.
    pub binaries: Toc,
    /// Data files.
    pub datas: Toc,
    /// Auxiliary archives.
    pub zipfiles: Toc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_keep_first_entry() {
        let toc: Toc = [
            Artifact::new("gdal.dll", "/a/gdal.dll", ArtifactKind::Binary),
            Artifact::new("gdal.dll", "/b/gdal.dll", ArtifactKind::Binary),
            Artifact::new("geos.dll", "/a/geos.dll", ArtifactKind::Binary),
        ]
        .into_iter()
        .collect();

        assert_eq!(toc.len(), 2);
        assert_eq!(toc.entries()[0].source, PathBuf::from("/a/gdal.dll"));
    }

    #[test]
    fn same_name_may_repeat_across_collections() {
        let json = r#"{
            "binaries": [{"name": "natcap", "source": "/x/natcap.so", "kind": "EXTENSION"}],
            "datas": [{"name": "natcap", "source": "/x/natcap", "kind": "DATA"}]
        }"#;
        let collections: ArtifactCollections = serde_json::from_str(json).unwrap();
        assert!(collections.binaries.contains("natcap"));
        assert!(collections.datas.contains("natcap"));
        assert!(collections.pure.is_empty());
        assert_eq!(collections.binaries.entries()[0].origin, ArtifactOrigin::Discovered);
    }
}
