//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the pipeline
//! in one sequential pass: validate inputs, resolve search paths, build the
//! forced-import manifest, evaluate the platform policy, run the analyzer,
//! then assemble and collect the distribution.

use crate::bundler::{
    analyzer::{AnalysisRequest, Analyzer},
    assembler::{self, AssemblyOptions},
    error::{Error, Result},
    platform::{self, PlatformBundle},
    resolver::{DependencyManifest, SearchPathList, discover_hooks, resolve_environment_paths},
    settings::{Platform, Settings},
};
use std::{io::Write, path::PathBuf};

use super::checksum::digest_tree;

/// Result of a successful bundling run.
#[derive(Clone, Debug)]
pub struct BundledDistribution {
    /// Platform the distribution targets.
    pub platform: Platform,
    /// Executable inside the distribution directory.
    pub executable: PathBuf,
    /// Distribution directory.
    pub directory: PathBuf,
    /// Total size of the directory in bytes.
    pub size: u64,
    /// SHA-256 of the directory tree.
    pub checksum: String,
    /// Binaries laid out beside the executable.
    pub binaries: usize,
    /// Data files copied.
    pub datas: usize,
    /// Auxiliary archives copied.
    pub zipfiles: usize,
}

/// Main bundler orchestrator.
///
/// Holds the immutable [`Settings`] for one run. Every derived input
/// (search paths, manifest, platform bundle) is computed from them and passed
/// on explicitly; nothing touches process-wide state.
///
/// # Examples
///
/// ```no_run
/// use invest_bundler::bundler::{Bundler, CommandAnalyzer, SettingsBuilder};
///
/// # async fn example() -> invest_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .entry_script("src/natcap/invest/cli.py")
///     .build()?;
/// let analyzer = CommandAnalyzer::locate("invest-analyzer", vec![])?;
///
/// let dist = Bundler::new(settings).bundle(&analyzer).await?;
/// println!("Created {} ({} bytes)", dist.directory.display(), dist.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Extra search paths contributed by an isolated environment.
    pub fn environment_paths(&self) -> Vec<PathBuf> {
        resolve_environment_paths(
            self.settings.interpreter(),
            self.settings.env_root(),
            self.settings.platform(),
            self.settings.runtime_version(),
        )
    }

    /// Builtin forced imports plus configured extras.
    pub fn manifest(&self) -> DependencyManifest {
        let mut manifest = DependencyManifest::builtin();
        manifest.extend(self.settings.hidden_imports().iter().cloned());
        manifest
    }

    /// Platform policy outcome for the configured platform.
    pub fn platform_bundle(&self) -> PlatformBundle {
        platform::evaluate(self.settings.platform(), self.settings.runtime_libraries())
    }

    /// Assembly options resolved from settings and platform policy.
    pub fn assembly_options(&self, platform_bundle: &PlatformBundle) -> AssemblyOptions {
        let bundle = self.settings.bundle_settings();
        AssemblyOptions {
            name: bundle.name.clone(),
            executable_name: platform_bundle.executable_name(&bundle.name),
            dist_name: bundle.dist_name.clone(),
            console: bundle.console.unwrap_or(platform_bundle.console),
            debug: bundle.debug,
            exclude_binaries: bundle.exclude_binaries,
            bootloader: bundle.bootloader.clone(),
        }
    }

    /// Checks the mandatory inputs: entry script and hooks directory.
    pub fn validate_inputs(&self) -> Result<()> {
        let entry_script = self.settings.entry_script();
        if !entry_script.is_file() {
            return Err(Error::MissingInput {
                what: "entry script",
                path: entry_script.to_path_buf(),
            });
        }
        discover_hooks(self.settings.hooks_dir())?;
        Ok(())
    }

    /// Runs the whole pipeline with `analyzer`.
    ///
    /// Any failure aborts the run; there is no partial result.
    pub async fn bundle<A: Analyzer>(&self, analyzer: &A) -> Result<BundledDistribution> {
        self.validate_inputs()?;
        let entry_script = self.settings.entry_script();

        let environment_paths = self.environment_paths();
        report_search_paths(&environment_paths)?;
        let search_paths = SearchPathList::compose(environment_paths, self.settings.project_dir());

        let platform_bundle = self.platform_bundle();
        log::info!(
            "Bundling {} for {} ({} runtime libraries injected)",
            entry_script.display(),
            self.settings.platform(),
            platform_bundle.injected_binaries.len()
        );

        let request = AnalysisRequest {
            entry_script: entry_script.to_path_buf(),
            hook_paths: vec![self.settings.hooks_dir().to_path_buf()],
            search_paths,
            hidden_imports: self.manifest(),
            excludes: self.settings.excludes().to_vec(),
        };
        let collections = analyzer.analyze(&request).await?;

        let options = self.assembly_options(&platform_bundle);
        let spec = assembler::assemble(collections, &platform_bundle.injected_binaries, &options);
        let collected = spec
            .emit(self.settings.work_path(), self.settings.dist_path())
            .await?;

        let digest = digest_tree(&collected.directory).await?;
        log::info!("✓ Created distribution: {}", collected.directory.display());

        Ok(BundledDistribution {
            platform: self.settings.platform(),
            executable: collected.executable,
            directory: collected.directory,
            size: digest.size,
            checksum: digest.sha256,
            binaries: collected.binaries,
            datas: collected.datas,
            zipfiles: collected.zipfiles,
        })
    }
}

/// Prints the extra search paths to stdout for the build log.
fn report_search_paths(paths: &[PathBuf]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_search_paths(&mut out, paths)?;
    out.flush()?;
    Ok(())
}

fn write_search_paths(out: &mut impl Write, paths: &[PathBuf]) -> std::io::Result<()> {
    if paths.is_empty() {
        writeln!(out, "Extra search paths: none")
    } else {
        writeln!(out, "Extra search paths:")?;
        for path in paths {
            writeln!(out, "  {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_paths_are_reported_as_none() {
        let mut out = Vec::new();
        write_search_paths(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Extra search paths: none\n");
    }

    #[test]
    fn search_paths_are_reported_in_order() {
        let mut out = Vec::new();
        write_search_paths(
            &mut out,
            &[PathBuf::from("/env/Lib/site-packages"), PathBuf::from("/env/Lib")],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Extra search paths:\n  /env/Lib/site-packages\n  /env/Lib\n"
        );
    }
}
