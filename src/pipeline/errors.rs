//! Error types for pipeline construction

use std::fmt;
use thiserror::Error;

/// Which registry a variant name was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// A stage variant, selected by `stage_type`
    Stage,
    /// A messenger variant, selected by the messenger block's `type`
    Messenger,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage => write!(f, "stage"),
            Self::Messenger => write!(f, "messenger"),
        }
    }
}

/// Errors that can occur while turning a document into a pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No constructor is registered under the requested name
    #[error("Unknown {kind} type '{name}'")]
    UnknownVariant {
        /// Registry the lookup was made in.
        kind: VariantKind,
        /// Normalized name that was looked up.
        name: String,
    },

    /// A required top-level block is absent or has the wrong shape
    #[error("No {0} block in the input document")]
    MissingBlock(String),

    /// A block is present but lacks a required key
    #[error("The {block} block requires a '{field}' key")]
    MissingField {
        /// Block that is incomplete.
        block: String,
        /// The missing key.
        field: String,
    },

    /// A configured value has a different shape than its target
    #[error("Option '{key}' expects {expected}, got {found}")]
    TypeMismatch {
        /// Option key in the document.
        key: String,
        /// Shape the target accepts.
        expected: String,
        /// Shape found in the document.
        found: String,
    },

    /// `run_after` nesting is deeper than the parser allows
    #[error("Stage nesting exceeds the maximum depth of {max}")]
    MaxDepthExceeded {
        /// Configured maximum depth.
        max: usize,
    },

    /// The document could not be read or is not a mapping
    #[error("Invalid document: {0}")]
    Document(String),
}

impl ConfigError {
    /// Builds a [`ConfigError::TypeMismatch`] describing `found` by its shape
    pub fn type_mismatch(
        key: impl Into<String>,
        expected: impl Into<String>,
        found: &serde_yaml::Value,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected: expected.into(),
            found: shape_of(found).to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Document(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Document(err.to_string())
    }
}

/// Short human name for the shape of a document value
pub(crate) fn shape_of(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ConfigError>;
