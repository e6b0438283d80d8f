//! Interpreter detection.
//!
//! The isolated-environment check needs the interpreter the analyzer will
//! run under. Unless one is configured, the first candidate on `PATH` wins.

use std::path::PathBuf;

/// Interpreter names tried in order.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python", "python3"];

/// Locates the interpreter on `PATH`.
pub fn find_interpreter() -> Option<PathBuf> {
    for name in INTERPRETER_CANDIDATES {
        match which::which(name) {
            Ok(path) => {
                log::debug!("Found {} at: {}", name, path.display());
                return Some(path);
            }
            Err(e) => log::debug!("{} not found in PATH: {}", name, e),
        }
    }
    log::warn!(
        "No interpreter found in PATH ({}); assuming no isolated environment",
        INTERPRETER_CANDIDATES.join(", ")
    );
    None
}
