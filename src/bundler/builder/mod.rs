//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns an entry
//! script into a collected distribution.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Resolves search paths, forced imports and the platform policy
//! 3. Delegates import analysis to an [`Analyzer`](crate::bundler::Analyzer)
//! 4. Assembles the executable and collects the distribution
//! 5. Returns a [`BundledDistribution`] with size and checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum of the distribution tree
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`tool_detection`] - Interpreter lookup on `PATH`

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::{TreeDigest, digest_tree};
pub use orchestrator::{BundledDistribution, Bundler};
pub use tool_detection::{INTERPRETER_CANDIDATES, find_interpreter};
