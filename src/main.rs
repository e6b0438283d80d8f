//! InVEST bundler - freezes the InVEST entry script into a distribution.
//!
//! This binary resolves search paths, forced imports and platform runtime
//! libraries, runs the import analyzer and writes the collected distribution.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match invest_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
