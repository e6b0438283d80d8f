//! Analyzer backed by an external program.
//!
//! The program receives the [`AnalysisRequest`] as JSON on stdin and must
//! print [`ArtifactCollections`] as JSON on stdout. Any non-zero exit aborts
//! the run with the program's stderr.

use super::{AnalysisRequest, Analyzer, ArtifactCollections};
use crate::{
    bail,
    bundler::error::{Error, Result},
};
use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{io::AsyncWriteExt, process::Command};

/// Default analyzer program looked up on `PATH`.
pub const DEFAULT_ANALYZER: &str = "invest-analyzer";

/// Runs an external analyzer program.
#[derive(Clone, Debug)]
pub struct CommandAnalyzer {
    program: PathBuf,
    args: Vec<String>,
    interpreter: Option<PathBuf>,
}

impl CommandAnalyzer {
    /// Creates an analyzer that runs `program` with `args`.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            interpreter: None,
        }
    }

    /// Locates `name` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] when the program cannot be found.
    pub fn locate(name: &str, args: Vec<String>) -> Result<Self> {
        let program = which::which(name).map_err(|e| {
            log::debug!("{name} not found in PATH: {e}");
            Error::MissingInput {
                what: "analyzer program",
                path: PathBuf::from(name),
            }
        })?;
        log::debug!("Found analyzer at: {}", program.display());
        Ok(Self::new(program, args))
    }

    /// Exposes the interpreter to the analyzer as `BUNDLER_INTERPRETER`.
    pub fn with_interpreter(mut self, interpreter: Option<&Path>) -> Self {
        self.interpreter = interpreter.map(Path::to_path_buf);
        self
    }

    /// Returns the analyzer program path.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Analyzer for CommandAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ArtifactCollections> {
        let payload = serde_json::to_vec(request)?;
        let command = self.program.display().to_string();

        log::info!("Running analyzer {} on {}", command, request.entry_script.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(interpreter) = &self.interpreter {
            cmd.env("BUNDLER_INTERPRETER", interpreter);
        }

        let mut child = cmd.spawn().map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

        // Dropping stdin closes the pipe so the analyzer sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                // exited before reading; its status and stderr explain why
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    log::debug!("Analyzer closed stdin early: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(Error::AnalyzerFailed {
                program: command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            bail!("analyzer `{}` produced no output", command);
        }

        let collections: ArtifactCollections = serde_json::from_slice(&output.stdout)?;
        log::info!(
            "Analyzer found {} modules, {} scripts, {} binaries, {} data files, {} archives",
            collections.pure.len(),
            collections.scripts.len(),
            collections.binaries.len(),
            collections.datas.len(),
            collections.zipfiles.len()
        );

        Ok(collections)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::resolver::{DependencyManifest, SearchPathList};

    // run through `sh` so the freshly written file is never exec'd directly
    fn script(dir: &Path, body: &str) -> CommandAnalyzer {
        let path = dir.join("analyzer.sh");
        std::fs::write(&path, format!("cat > /dev/null\n{body}\n")).unwrap();
        CommandAnalyzer::new("/bin/sh", vec![path.display().to_string()])
    }

    fn request(dir: &Path) -> AnalysisRequest {
        AnalysisRequest {
            entry_script: dir.join("cli.py"),
            hook_paths: vec![dir.join("hooks")],
            search_paths: SearchPathList::compose(Vec::new(), dir),
            hidden_imports: DependencyManifest::builtin(),
            excludes: Vec::new(),
        }
    }

    #[tokio::test]
    async fn parses_collections_from_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let analyzer = script(
            tmp.path(),
            r#"printf '%s' '{"binaries":[{"name":"gdal111.dll","source":"/env/gdal111.dll","kind":"BINARY"}]}'"#,
        );

        let collections = analyzer.analyze(&request(tmp.path())).await.unwrap();

        assert!(collections.binaries.contains("gdal111.dll"));
        assert!(collections.pure.is_empty());
    }

    #[tokio::test]
    async fn empty_output_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let analyzer = script(tmp.path(), "printf '  \\n'");

        let err = analyzer.analyze(&request(tmp.path())).await.unwrap_err();

        assert!(matches!(err, Error::GenericError(ref m) if m.contains("produced no output")));
    }

    #[tokio::test]
    async fn malformed_output_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let analyzer = script(tmp.path(), "echo 'Analyzing cli.py...'");

        let err = analyzer.analyze(&request(tmp.path())).await.unwrap_err();

        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let analyzer = script(tmp.path(), "echo 'No module named rtree' >&2\nexit 2");

        let err = analyzer.analyze(&request(tmp.path())).await.unwrap_err();

        assert!(
            matches!(err, Error::AnalyzerFailed { ref stderr, .. } if stderr == "No module named rtree")
        );
    }
}
