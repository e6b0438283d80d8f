//! Collected distribution directory.
//!
//! The directory is filled under a hidden staging name next to its final
//! location and renamed into place only once every file is copied, so a
//! failed run leaves the previous distribution untouched.

use crate::bundler::{
    analyzer::{Artifact, ArtifactOrigin, Toc},
    error::{Error, Result},
    utils::fs,
};
use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

/// Files laid out beside the executable in the output directory.
#[derive(Clone, Debug)]
pub struct Collect {
    /// Output directory name.
    pub name: String,
    /// Binaries placed flat by logical name; empty when they are embedded.
    pub binaries: Vec<Artifact>,
    /// Auxiliary archives.
    pub zipfiles: Toc,
    /// Data files.
    pub datas: Toc,
}

/// A written distribution directory.
#[derive(Clone, Debug)]
pub struct CollectedDistribution {
    /// Distribution directory.
    pub directory: PathBuf,
    /// Executable inside the directory.
    pub executable: PathBuf,
    /// Binaries copied.
    pub binaries: usize,
    /// Archives copied.
    pub zipfiles: usize,
    /// Data files copied.
    pub datas: usize,
}

impl Collect {
    /// Writes `<dist_path>/<name>` holding `executable` and every collected
    /// file, replacing any previous distribution.
    ///
    /// Any missing source aborts the run. A platform runtime library that is
    /// absent on the build machine must fail here rather than ship a bundle
    /// that crashes at launch.
    pub async fn write(&self, executable: &Path, dist_path: &Path) -> Result<CollectedDistribution> {
        let exe_name = executable
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.name));
        self.check_names(&exe_name)?;

        let directory = dist_path.join(&self.name);
        let staging = dist_path.join(format!(".{}.partial", self.name));
        fs::create_dir_all(&staging, true).await?;

        if let Err(e) = self.fill(executable, &exe_name, &staging).await {
            if let Err(cleanup) = fs::remove_dir_all(&staging).await {
                log::warn!("Could not remove {}: {}", staging.display(), cleanup);
            }
            return Err(e);
        }

        fs::remove_dir_all(&directory).await?;
        fs::rename(&staging, &directory).await?;

        log::info!(
            "Collected {} binaries, {} archives, {} data files into {}",
            self.binaries.len(),
            self.zipfiles.len(),
            self.datas.len(),
            directory.display()
        );

        Ok(CollectedDistribution {
            executable: directory.join(&exe_name),
            directory,
            binaries: self.binaries.len(),
            zipfiles: self.zipfiles.len(),
            datas: self.datas.len(),
        })
    }

    fn check_names(&self, exe_name: &Path) -> Result<()> {
        let names = self
            .binaries
            .iter()
            .chain(&self.zipfiles)
            .chain(&self.datas)
            .map(|artifact| artifact.name.as_str());
        for name in names {
            check_name(name, exe_name)?;
        }
        Ok(())
    }

    async fn fill(&self, executable: &Path, exe_name: &Path, directory: &Path) -> Result<()> {
        let exe_dest = directory.join(exe_name);
        fs::copy_file(executable, &exe_dest).await?;
        fs::set_executable(&exe_dest).await?;

        let mut written = HashSet::new();
        for binary in &self.binaries {
            if !written.insert(binary.name.as_str()) {
                log::warn!("Binary {} listed twice, later copy wins", binary.name);
            }
            if binary.origin == ArtifactOrigin::PlatformRuntime {
                log::info!("Adding runtime library {}", binary.source.display());
            }
            fs::copy_file(&binary.source, &directory.join(&binary.name)).await?;
        }
        for archive in &self.zipfiles {
            fs::copy_file(&archive.source, &directory.join(&archive.name)).await?;
        }
        for data in &self.datas {
            fs::copy_file(&data.source, &directory.join(&data.name)).await?;
        }
        Ok(())
    }
}

/// Logical names must stay inside the distribution and not replace the executable.
fn check_name(name: &str, exe_name: &Path) -> Result<()> {
    let path = Path::new(name);
    let relative = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !relative {
        return Err(Error::InvalidArtifactName {
            name: name.to_string(),
            reason: "must be a relative path without `.` or `..`",
        });
    }
    if path == exe_name {
        return Err(Error::InvalidArtifactName {
            name: name.to_string(),
            reason: "collides with the executable",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::analyzer::ArtifactKind;

    struct Layout {
        tmp: tempfile::TempDir,
    }

    impl Layout {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            std::fs::create_dir_all(tmp.path().join("build")).unwrap();
            std::fs::write(tmp.path().join("build/invest"), b"exe").unwrap();
            std::fs::write(tmp.path().join("gdal111.dll"), b"gdal").unwrap();
            Self { tmp }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.tmp.path().join(rel)
        }

        fn collect(&self, binaries: Vec<Artifact>) -> Collect {
            Collect {
                name: "invest_dist".into(),
                binaries,
                zipfiles: Toc::new(),
                datas: Toc::new(),
            }
        }

        fn seed_previous_build(&self) {
            std::fs::create_dir_all(self.path("dist/invest_dist")).unwrap();
            std::fs::write(self.path("dist/invest_dist/previous_good"), b"old").unwrap();
        }
    }

    fn binary(name: &str, source: PathBuf) -> Artifact {
        Artifact::new(name, source, ArtifactKind::Binary)
    }

    #[tokio::test]
    async fn success_replaces_previous_build() {
        let layout = Layout::new();
        layout.seed_previous_build();
        let collect = layout.collect(vec![binary("gdal111.dll", layout.path("gdal111.dll"))]);

        let dist = collect
            .write(&layout.path("build/invest"), &layout.path("dist"))
            .await
            .unwrap();

        assert_eq!(dist.executable, layout.path("dist/invest_dist/invest"));
        assert!(dist.directory.join("gdal111.dll").is_file());
        assert!(!dist.directory.join("previous_good").exists());
        assert!(!layout.path("dist/.invest_dist.partial").exists());
    }

    #[tokio::test]
    async fn failed_copy_keeps_previous_build() {
        let layout = Layout::new();
        layout.seed_previous_build();
        let collect = layout.collect(vec![
            binary("gdal111.dll", layout.path("gdal111.dll")),
            Artifact::platform_runtime("msvcp90.dll", layout.path("missing/msvcp90.dll")),
        ]);

        let err = collect
            .write(&layout.path("build/invest"), &layout.path("dist"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fs { .. }));
        let entries: Vec<_> = std::fs::read_dir(layout.path("dist/invest_dist"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, ["previous_good"]);
        assert!(!layout.path("dist/.invest_dist.partial").exists());
    }

    #[tokio::test]
    async fn escaping_names_are_rejected_before_writing() {
        let layout = Layout::new();
        for name in ["../escape.dll", "/abs/escape.dll", "./gdal111.dll", ""] {
            let collect = layout.collect(vec![binary(name, layout.path("gdal111.dll"))]);

            let err = collect
                .write(&layout.path("build/invest"), &layout.path("dist"))
                .await
                .unwrap_err();

            assert!(matches!(err, Error::InvalidArtifactName { .. }), "{name:?} accepted");
        }
        assert!(!layout.path("dist").exists());
        assert!(!layout.path("escape.dll").exists());
    }

    #[tokio::test]
    async fn name_of_the_executable_is_rejected() {
        let layout = Layout::new();
        let mut collect = layout.collect(Vec::new());
        collect.datas = [Artifact::new("invest", layout.path("gdal111.dll"), ArtifactKind::Data)]
            .into_iter()
            .collect();

        let err = collect
            .write(&layout.path("build/invest"), &layout.path("dist"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidArtifactName { reason: "collides with the executable", .. }
        ));
    }

    #[test]
    fn nested_names_are_accepted() {
        assert!(check_name("natcap/invest/carbon.json", Path::new("invest.exe")).is_ok());
    }
}
