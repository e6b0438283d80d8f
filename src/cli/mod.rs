//! Command line interface for the bundler.
//!
//! This module parses arguments, merges them with the optional configuration
//! file, runs the [`Bundler`] and reports the result.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use anyhow::Context as _;

use crate::{
    bundler::{Bundler, CommandAnalyzer, Settings, SettingsBuilder},
    config::{self, BundleConfig},
    error::{BundlerError, CliError, Result},
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime_config = RuntimeConfig::from(&args);
    let output = runtime_config.output();

    let settings = build_settings(&args)?;
    let bundler = Bundler::new(settings);
    bundler.validate_inputs()?;

    let analyzer = CommandAnalyzer::locate(&args.analyzer, args.analyzer_args.clone())?
        .with_interpreter(bundler.settings().interpreter());

    output.section(&format!(
        "Bundling {} for {}",
        bundler.settings().entry_script().display(),
        bundler.settings().platform()
    ))?;
    output.verbose(&format!("Analyzer: {}", analyzer.program().display()))?;
    output.verbose(&format!("Hooks: {}", bundler.settings().hooks_dir().display()))?;
    output.progress("Analyzing imports")?;

    let dist = bundler.bundle(&analyzer).await?;

    output.success(&format!("Created {}", dist.directory.display()))?;
    output.indent(&format!("Executable: {}", dist.executable.display()))?;
    output.indent(&format!(
        "{} binaries, {} data files, {} archives",
        dist.binaries, dist.datas, dist.zipfiles
    ))?;
    output.indent(&format!("Size: {} bytes", dist.size))?;
    output.indent(&format!("SHA256: {}", dist.checksum))?;

    Ok(0)
}

/// Resolves settings from defaults, the configuration file and `args`.
///
/// Command line flags win over the configuration file, which wins over
/// builtin defaults.
pub fn build_settings(args: &Args) -> Result<Settings> {
    let project_dir =
        std::env::current_dir().context("failed to read the current working directory")?;

    let config = match &args.config {
        Some(path) => load_explicit_config(path)?,
        None => config::discover_config(&project_dir)?.unwrap_or_default(),
    };

    let mut bundle = config.apply_bundle(Default::default());
    if let Some(name) = &args.name {
        bundle.name = name.clone();
    }
    if let Some(dist_name) = &args.dist_name {
        bundle.dist_name = dist_name.clone();
    }
    if args.onefile {
        bundle.exclude_binaries = false;
    }
    if args.windowed {
        bundle.console = Some(false);
    }
    if args.debug {
        bundle.debug = true;
    }
    if args.bootloader.is_some() {
        bundle.bootloader = args.bootloader.clone();
    }

    let mut builder = SettingsBuilder::new()
        .entry_script(&args.entry_script)
        .project_dir(&project_dir)
        .bundle_settings(bundle)
        .hidden_imports(config.imports.hidden.iter().cloned())
        .excludes(config.imports.excludes.iter().cloned())
        .runtime_libraries(config.runtime_library_table());

    if let Some(dir) = &args.hooks_dir {
        builder = builder.hooks_dir(dir);
    }
    if let Some(root) = args.env_root.as_ref().or(config.environment.root.as_ref()) {
        builder = builder.env_root(root);
    }
    if let Some(platform) = args.platform {
        builder = builder.platform(platform);
    }
    if let Some(version) = args
        .runtime_version
        .as_ref()
        .or(config.environment.runtime_version.as_ref())
    {
        builder = builder.runtime_version(version.clone());
    }
    if let Some(interpreter) = args
        .interpreter
        .as_ref()
        .or(config.environment.interpreter.as_ref())
    {
        builder = builder.interpreter(interpreter);
    }
    if let Some(dir) = &args.dist_path {
        builder = builder.dist_path(dir);
    }
    if let Some(dir) = &args.work_path {
        builder = builder.work_path(dir);
    }

    Ok(builder.build()?)
}

fn load_explicit_config(path: &std::path::Path) -> Result<BundleConfig> {
    if !path.is_file() {
        return Err(BundlerError::Cli(CliError::InvalidArguments {
            reason: format!("Configuration file not found: {}", path.display()),
        }));
    }
    config::load_config(path)
}
