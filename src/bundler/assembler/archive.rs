//! Compiled-code archive.

use crate::bundler::{
    analyzer::{Artifact, Toc},
    error::{Error, ErrorExt, Result},
};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Archive of compiled pure modules, referenced by the executable.
#[derive(Clone, Debug)]
pub struct CodeArchive {
    file_name: String,
    modules: Toc,
}

impl CodeArchive {
    /// Archive named `<base>.pyz` holding `modules`.
    pub fn new(base: &str, modules: Toc) -> Self {
        Self {
            file_name: format!("{base}.pyz"),
            modules,
        }
    }

    /// File name of the archive.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Writes the archive into `dir` and returns its path.
    pub async fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        let modules = self.modules.clone();
        let out = path.clone();

        tokio::task::spawn_blocking(move || write_zip(&out, &modules))
            .await
            .map_err(|e| Error::GenericError(format!("Archive task panicked: {e}")))??;

        log::info!("Wrote code archive {} ({} modules)", path.display(), self.modules.len());
        Ok(path)
    }
}

/// Entry name of a module inside the archive.
///
/// Dotted names become paths; a package compiled from `__init__` keeps that
/// file inside its directory.
pub fn module_entry_name(module: &Artifact) -> String {
    let base = module.name.replace('.', "/");
    let is_package = module
        .source
        .file_stem()
        .is_some_and(|stem| stem == "__init__");
    if is_package {
        format!("{base}/__init__.pyc")
    } else {
        format!("{base}.pyc")
    }
}

fn write_zip(path: &Path, modules: &Toc) -> Result<()> {
    let file = File::create(path).fs_context("creating code archive", path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for module in modules {
        let mut src = File::open(&module.source).fs_context("opening module", &module.source)?;
        zip.start_file(module_entry_name(module), options)?;
        io::copy(&mut src, &mut zip).fs_context("archiving module", &module.source)?;
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::analyzer::ArtifactKind;

    #[test]
    fn dotted_names_become_paths() {
        let module = Artifact::new(
            "natcap.invest.cli",
            "/build/natcap/invest/cli.pyc",
            ArtifactKind::PyModule,
        );
        assert_eq!(module_entry_name(&module), "natcap/invest/cli.pyc");
    }

    #[test]
    fn packages_keep_their_init() {
        let module = Artifact::new(
            "natcap.invest",
            "/build/natcap/invest/__init__.pyc",
            ArtifactKind::PyModule,
        );
        assert_eq!(module_entry_name(&module), "natcap/invest/__init__.pyc");
    }
}
