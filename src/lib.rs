//! # Stageline - declarative pipeline materializer
//!
//! Stageline turns a generic nested key/value document (as produced by a
//! YAML reader) into an executable object graph: an ordered forest of
//! stages, each with the stages that run after it, plus the pipeline's
//! reporting messenger.
//!
//! ```
//! use stageline::parser::{self, document};
//!
//! let doc = document::from_str(
//!     "pipeline:\n  - stage_name: build\n    command: make\n",
//! )?;
//! let pipeline = parser::parse(&doc)?;
//! assert_eq!(pipeline.stage_count(), 1);
//! # Ok::<(), stageline::ConfigError>(())
//! ```
//!
//! ## Building blocks
//!
//! - [`Registry`]: type name to constructor tables for stages and messengers
//! - [`FieldTable`]: a variant's declared options, bound by tag name
//! - [`Parser`]: builds the stage forest and resolves the messenger
//!
//! Running a pipeline is the job of the execution side; this crate only
//! constructs it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod macros;

pub mod infrastructure;
pub mod parser;
pub mod pipeline;
pub mod variants;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use infrastructure::{Config, init_logging};
pub use parser::{Parser, ParserOptions, parse};
pub use pipeline::{
    ConfigError, Configurable, FieldSlot, FieldTable, Messenger, Pipeline, PipelineSummary,
    Registry, Result, Stage, StageNode, VariantKind,
};

/// Version of the stageline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
