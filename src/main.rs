//! stageline - inspect declarative pipeline documents
//!
//! ## Commands
//!
//! - `stageline check` - Build a pipeline from a YAML document and print it
//! - `stageline variants` - List the registered stage and messenger types
//! - `stageline completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Validate a pipeline document
//! stageline check pipeline.yml
//!
//! # Print the assembled structure as JSON
//! stageline check pipeline.yml --format json
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if std::env::var("STAGELINE_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
