//! Packaging orchestrator for the InVEST toolkit.
//!
//! This library computes what a frozen, platform-specific distribution of an
//! entry script needs and assembles it:
//! - ordered module search paths, preferring an isolated release environment
//! - forced imports that static analysis cannot discover
//! - platform runtime libraries and executable naming
//! - the executable and the collected distribution directory
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
