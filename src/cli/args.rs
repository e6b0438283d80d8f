//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! conversion into bundler settings.

use crate::bundler::{Platform, analyzer::DEFAULT_ANALYZER};
use clap::Parser;
use std::path::PathBuf;

/// Freeze the InVEST entry script into a distributable folder
#[derive(Parser, Debug)]
#[command(
    name = "invest_bundler",
    version,
    about = "Freeze the InVEST entry script into a distributable folder",
    long_about = "Resolves search paths, forced imports and platform runtime libraries, runs the
import analyzer, and writes an executable plus a collected distribution directory.

Usage:
  invest_bundler src/natcap/invest/cli.py
  invest_bundler src/natcap/invest/cli.py --platform windows --env-root ../release_env
  invest_bundler src/natcap/invest/cli.py --onefile --dist-path out

Exit code 0 = distribution guaranteed to exist under the dist path."
)]
pub struct Args {
    /// Entry script to freeze
    #[arg(value_name = "ENTRY_SCRIPT")]
    pub entry_script: PathBuf,

    /// Hooks directory (default: `hooks/` beside the entry script)
    #[arg(long, value_name = "DIR")]
    pub hooks_dir: Option<PathBuf>,

    /// Isolated environment root (default: ../release_env)
    #[arg(long, value_name = "DIR")]
    pub env_root: Option<PathBuf>,

    /// Target platform: windows, macos, linux (default: host)
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<Platform>,

    /// Runtime version directory under `lib/` (default: python2.7)
    #[arg(long, value_name = "VERSION")]
    pub runtime_version: Option<String>,

    /// Interpreter used to detect the isolated environment (default: first python on PATH)
    #[arg(long, value_name = "PATH")]
    pub interpreter: Option<PathBuf>,

    /// Analyzer program
    #[arg(long, value_name = "PROGRAM", env = "INVEST_ANALYZER", default_value = DEFAULT_ANALYZER)]
    pub analyzer: String,

    /// Extra argument passed to the analyzer (repeatable)
    #[arg(long = "analyzer-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub analyzer_args: Vec<String>,

    /// Executable name without suffix (default: invest)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Distribution directory name (default: invest_dist)
    #[arg(long, value_name = "NAME")]
    pub dist_name: Option<String>,

    /// Where distributions are written (default: ./dist)
    #[arg(long, value_name = "DIR")]
    pub dist_path: Option<PathBuf>,

    /// Where intermediate files are written (default: ./build)
    #[arg(long, value_name = "DIR")]
    pub work_path: Option<PathBuf>,

    /// Embed binaries in the executable instead of laying them out beside it
    #[arg(long)]
    pub onefile: bool,

    /// Build a windowed (non-console) executable
    #[arg(long)]
    pub windowed: bool,

    /// Launcher prints bootstrap diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Launcher stub prepended to the executable
    #[arg(long, value_name = "FILE")]
    pub bootloader: Option<PathBuf>,

    /// Configuration file (default: ./bundle.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print detailed progress
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.entry_script.as_os_str().is_empty() {
            return Err("Entry script cannot be empty".to_string());
        }

        for (flag, value) in [("--name", &self.name), ("--dist-name", &self.dist_name)] {
            if let Some(value) = value
                && (value.is_empty() || value.contains(['/', '\\']))
            {
                return Err(format!("{flag} must be a plain file name, got `{value}`"));
            }
        }

        if self.analyzer.is_empty() {
            return Err("Analyzer cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = Args::try_parse_from(["invest_bundler", "src/natcap/invest/cli.py"]).unwrap();
        assert_eq!(args.entry_script, PathBuf::from("src/natcap/invest/cli.py"));
        assert_eq!(args.platform, None);
        assert!(!args.onefile);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn parses_platform() {
        let args =
            Args::try_parse_from(["invest_bundler", "cli.py", "--platform", "windows"]).unwrap();
        assert_eq!(args.platform, Some(Platform::Windows));
        assert!(Args::try_parse_from(["invest_bundler", "cli.py", "--platform", "amiga"]).is_err());
    }

    #[test]
    fn rejects_path_like_names() {
        let args =
            Args::try_parse_from(["invest_bundler", "cli.py", "--dist-name", "../escape"]).unwrap();
        assert!(args.validate().is_err());
    }
}
