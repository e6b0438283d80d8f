//! Packaging pipeline.
//!
//! Resolves what a frozen distribution of the entry script needs and writes
//! it to disk:
//!
//! - [`resolver`] - search paths, hook discovery, forced imports
//! - [`platform`] - runtime libraries and executable naming per platform
//! - [`analyzer`] - import analysis collaborator and artifact tables
//! - [`assembler`] - executable and collected distribution
//! - [`builder`] - the [`Bundler`] orchestrator
//! - [`settings`] - run configuration

pub mod analyzer;
pub mod assembler;
pub mod builder;
pub mod error;
pub mod platform;
pub mod resolver;
pub mod settings;
pub mod utils;

pub use analyzer::{
    AnalysisRequest, Analyzer, Artifact, ArtifactCollections, ArtifactKind, ArtifactOrigin,
    CommandAnalyzer, Toc,
};
pub use assembler::{AssemblyOptions, BundleSpec};
pub use builder::{BundledDistribution, Bundler};
pub use error::{Error, Result};
pub use platform::{PlatformBundle, RuntimeLibrary, RuntimeLibraryTable};
pub use resolver::{DependencyManifest, SearchPathList};
pub use settings::{BundleSettings, Platform, Settings, SettingsBuilder};
