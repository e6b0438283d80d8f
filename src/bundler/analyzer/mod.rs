//! Import analysis collaborator.
//!
//! The bundler never inspects imports itself. It hands an [`AnalysisRequest`]
//! to an [`Analyzer`] and receives [`ArtifactCollections`] back.
//!
//! - [`toc`] - artifact tables shared by analyzer and assembler
//! - [`command`] - analyzer backed by an external program speaking JSON

mod command;
mod toc;

pub use command::{CommandAnalyzer, DEFAULT_ANALYZER};
pub use toc::{Artifact, ArtifactCollections, ArtifactKind, ArtifactOrigin, Toc};

use crate::bundler::{
    error::Result,
    resolver::{DependencyManifest, SearchPathList},
};
use std::{future::Future, path::PathBuf};

/// Everything the analyzer needs for one run.
#[derive(Clone, Debug, serde::Serialize)]
pub struct AnalysisRequest {
    /// Script the import graph starts from.
    pub entry_script: PathBuf,
    /// Directories holding hook declarations.
    pub hook_paths: Vec<PathBuf>,
    /// Ordered module search path; earlier entries shadow later ones.
    pub search_paths: SearchPathList,
    /// Import names that must be present in the output.
    pub hidden_imports: DependencyManifest,
    /// Module names to leave out.
    pub excludes: Vec<String>,
}

/// Resolves an entry script into bundle artifacts.
///
/// Implementations are expected to fail loudly when a forced import cannot
/// be found; the bundler does not pre-validate the manifest.
pub trait Analyzer {
    /// Runs the analysis to completion.
    fn analyze(&self, request: &AnalysisRequest) -> impl Future<Output = Result<ArtifactCollections>>;
}
