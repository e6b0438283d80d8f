//! Executable descriptor and emission.
//!
//! The executable is an optional bootloader stub followed by a package zip.
//! The package always holds `bundle.json`, the entry scripts and the code
//! archive. Binaries are embedded under `binaries/` only when the executable
//! is self-contained; a thin launcher finds them next to itself instead.

use super::archive::CodeArchive;
use crate::bundler::{
    analyzer::{Artifact, Toc},
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use chrono::{DateTime, Utc};
use std::{
    fs::File,
    io::{self, Cursor, Write},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Name of the launch manifest inside the package.
pub const LAUNCH_MANIFEST: &str = "bundle.json";

/// Everything needed to emit the executable.
#[derive(Clone, Debug)]
pub struct Executable {
    /// File name including the platform suffix.
    pub name: String,
    /// Console (true) or windowed (false).
    pub console: bool,
    /// Launcher prints bootstrap diagnostics.
    pub debug: bool,
    /// Compiled pure modules.
    pub archive: CodeArchive,
    /// Entry-point launcher scripts.
    pub scripts: Toc,
    /// Binaries embedded in the executable; empty in thin-launcher mode.
    pub binaries: Vec<Artifact>,
    /// Thin-launcher mode.
    pub exclude_binaries: bool,
    /// Stub prepended to the package.
    pub bootloader: Option<PathBuf>,
}

/// Launch manifest read by the bootloader.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LaunchManifest {
    /// Executable file name.
    pub name: String,
    /// Console mode.
    pub console: bool,
    /// Debug bootstrap.
    pub debug: bool,
    /// Code archive entry name.
    pub archive: String,
    /// Scripts to run, in order.
    pub scripts: Vec<String>,
    /// Binaries embedded under `binaries/`.
    pub binaries: Vec<String>,
    /// Whether binaries live beside the executable.
    pub exclude_binaries: bool,
    /// Build time.
    pub built_at: DateTime<Utc>,
}

impl Executable {
    /// Writes the code archive and executable into `work_dir`.
    ///
    /// Returns the executable path.
    pub async fn write(&self, work_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(work_dir, false).await?;

        let archive_path = self.archive.write(work_dir).await?;

        let stub = match &self.bootloader {
            Some(path) => tokio::fs::read(path)
                .await
                .fs_context("reading bootloader", path)?,
            None => Vec::new(),
        };

        let manifest = self.launch_manifest();
        let scripts = self.scripts.clone();
        let binaries = self.binaries.clone();
        let archive_name = self.archive.file_name().to_string();

        let package = tokio::task::spawn_blocking(move || {
            build_package(&manifest, &archive_name, &archive_path, &scripts, &binaries)
        })
        .await
        .map_err(|e| Error::GenericError(format!("Package task panicked: {e}")))??;

        let exe_path = work_dir.join(&self.name);
        let mut contents = stub;
        contents.extend_from_slice(&package);
        tokio::fs::write(&exe_path, contents)
            .await
            .fs_context("writing executable", &exe_path)?;
        fs::set_executable(&exe_path).await?;

        log::info!(
            "Wrote executable {} ({} scripts, {} embedded binaries)",
            exe_path.display(),
            self.scripts.len(),
            self.binaries.len()
        );

        Ok(exe_path)
    }

    fn launch_manifest(&self) -> LaunchManifest {
        LaunchManifest {
            name: self.name.clone(),
            console: self.console,
            debug: self.debug,
            archive: self.archive.file_name().to_string(),
            scripts: self.scripts.iter().map(|s| s.name.clone()).collect(),
            binaries: self.binaries.iter().map(|b| b.name.clone()).collect(),
            exclude_binaries: self.exclude_binaries,
            built_at: Utc::now(),
        }
    }
}

fn build_package(
    manifest: &LaunchManifest,
    archive_name: &str,
    archive_path: &Path,
    scripts: &Toc,
    binaries: &[Artifact],
) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(LAUNCH_MANIFEST, options)?;
    zip.write_all(&serde_json::to_vec_pretty(manifest)?)?;

    add_file(&mut zip, archive_name.to_string(), archive_path, options)?;
    for script in scripts {
        add_file(&mut zip, format!("scripts/{}", script.name), &script.source, options)?;
    }
    for binary in binaries {
        add_file(&mut zip, format!("binaries/{}", binary.name), &binary.source, options)?;
    }

    Ok(zip.finish()?.into_inner())
}

fn add_file(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    entry: String,
    source: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut src = File::open(source).fs_context("opening file for executable", source)?;
    zip.start_file(entry, options)?;
    io::copy(&mut src, zip).fs_context("embedding file", source)?;
    Ok(())
}
