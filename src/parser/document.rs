//! Loading the generic document
//!
//! Reading YAML is delegated to `serde_yaml`; this module only insists that
//! the top level is a mapping, which is all the parser needs.

use crate::pipeline::errors::shape_of;
use crate::pipeline::{ConfigError, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Parses YAML text into a top-level mapping
///
/// # Errors
///
/// Returns [`ConfigError::Document`] for invalid YAML or a top level that
/// is not a mapping.
pub fn from_str(text: &str) -> Result<Mapping> {
    into_mapping(serde_yaml::from_str(text)?)
}

/// Reads a YAML document from any reader
///
/// # Errors
///
/// Same as [`from_str`].
pub fn from_reader<R: Read>(reader: R) -> Result<Mapping> {
    into_mapping(serde_yaml::from_reader(reader)?)
}

/// Reads a YAML document from a file
///
/// # Errors
///
/// Returns [`ConfigError::Document`] if the file cannot be read, or the
/// errors of [`from_str`].
pub fn load(path: impl AsRef<Path>) -> Result<Mapping> {
    let path = path.as_ref();
    tracing::debug!("Loading pipeline document: {}", path.display());

    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::Document(format!("{}: {e}", path.display())))?;
    from_str(&text)
}

fn into_mapping(value: Value) -> Result<Mapping> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(ConfigError::Document(format!(
            "top level must be a mapping, got {}",
            shape_of(&other)
        ))),
    }
}
