//! Bundle assembly.
//!
//! Turns the analyzer's collections plus the platform's injected binaries
//! into a [`BundleSpec`]: an [`Executable`] descriptor and a [`Collect`]
//! step. Binaries go to exactly one of the two depending on
//! `exclude_binaries`.
//!
//! - [`archive`] - compiled-code archive
//! - [`executable`] - executable descriptor and emission
//! - [`collect`] - collected distribution directory

mod archive;
mod collect;
mod executable;

pub use archive::{CodeArchive, module_entry_name};
pub use collect::{Collect, CollectedDistribution};
pub use executable::{Executable, LAUNCH_MANIFEST, LaunchManifest};

use crate::bundler::{
    analyzer::{Artifact, ArtifactCollections, Toc},
    error::Result,
};
use std::path::{Path, PathBuf};

/// Assembly choices resolved from settings and platform policy.
#[derive(Clone, Debug)]
pub struct AssemblyOptions {
    /// Executable base name (no suffix).
    pub name: String,
    /// Executable file name (with suffix).
    pub executable_name: String,
    /// Output directory name.
    pub dist_name: String,
    /// Console mode.
    pub console: bool,
    /// Debug bootstrap.
    pub debug: bool,
    /// Thin-launcher mode.
    pub exclude_binaries: bool,
    /// Bootloader stub.
    pub bootloader: Option<PathBuf>,
}

/// Final bundle layout, consumed once by [`BundleSpec::emit`].
#[derive(Clone, Debug)]
pub struct BundleSpec {
    /// Executable descriptor.
    pub executable: Executable,
    /// Collected distribution step.
    pub collect: Collect,
}

/// Discovered binaries followed by injected ones.
///
/// Order is preserved and nothing is deduplicated.
pub fn merge_binaries(discovered: &Toc, injected: &[Artifact]) -> Vec<Artifact> {
    discovered
        .iter()
        .chain(injected.iter())
        .cloned()
        .collect()
}

/// Plans the bundle.
pub fn assemble(
    collections: ArtifactCollections,
    injected: &[Artifact],
    options: &AssemblyOptions,
) -> BundleSpec {
    let ArtifactCollections {
        pure,
        scripts,
        binaries,
        datas,
        zipfiles,
    } = collections;

    let merged = merge_binaries(&binaries, injected);
    let (embedded, collected) = if options.exclude_binaries {
        (Vec::new(), merged)
    } else {
        (merged, Vec::new())
    };

    log::debug!(
        "Assembly: {} embedded binaries, {} collected binaries (exclude_binaries={})",
        embedded.len(),
        collected.len(),
        options.exclude_binaries
    );

    BundleSpec {
        executable: Executable {
            name: options.executable_name.clone(),
            console: options.console,
            debug: options.debug,
            archive: CodeArchive::new(&options.name, pure),
            scripts,
            binaries: embedded,
            exclude_binaries: options.exclude_binaries,
            bootloader: options.bootloader.clone(),
        },
        collect: Collect {
            name: options.dist_name.clone(),
            binaries: collected,
            zipfiles,
            datas,
        },
    }
}

impl BundleSpec {
    /// Writes the executable into `work_path` and the distribution into `dist_path`.
    pub async fn emit(self, work_path: &Path, dist_path: &Path) -> Result<CollectedDistribution> {
        let exe_path = self.executable.write(work_path).await?;
        self.collect.write(&exe_path, dist_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::analyzer::ArtifactKind;

    fn options(exclude_binaries: bool) -> AssemblyOptions {
        AssemblyOptions {
            name: "invest".into(),
            executable_name: "invest.exe".into(),
            dist_name: "invest_dist".into(),
            console: true,
            debug: false,
            exclude_binaries,
            bootloader: None,
        }
    }

    fn collections() -> ArtifactCollections {
        ArtifactCollections {
            binaries: [
                Artifact::new("gdal111.dll", "/env/gdal111.dll", ArtifactKind::Binary),
                Artifact::new("_geos.pyd", "/env/_geos.pyd", ArtifactKind::Extension),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }
    }

    fn injected() -> Vec<Artifact> {
        vec![
            Artifact::platform_runtime("msvcp90.dll", r"C:\Windows\System32\msvcp90.dll"),
            Artifact::platform_runtime("msvcr90.dll", r"C:\Windows\System32\msvcr90.dll"),
        ]
    }

    #[test]
    fn merge_appends_injected_after_discovered() {
        let merged = merge_binaries(&collections().binaries, &injected());
        let names: Vec<_> = merged.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["gdal111.dll", "_geos.pyd", "msvcp90.dll", "msvcr90.dll"]);
    }

    #[test]
    fn merge_does_not_deduplicate() {
        let dup = vec![Artifact::platform_runtime("gdal111.dll", "/other/gdal111.dll")];
        assert_eq!(merge_binaries(&collections().binaries, &dup).len(), 3);
    }

    #[test]
    fn thin_launcher_embeds_no_binaries() {
        let spec = assemble(collections(), &injected(), &options(true));
        assert!(spec.executable.binaries.is_empty());
        assert_eq!(spec.collect.binaries.len(), 4);
    }

    #[test]
    fn self_contained_executable_embeds_all_binaries() {
        let spec = assemble(collections(), &injected(), &options(false));
        assert_eq!(
            spec.executable.binaries,
            merge_binaries(&collections().binaries, &injected())
        );
        assert!(spec.collect.binaries.is_empty());
    }
}
