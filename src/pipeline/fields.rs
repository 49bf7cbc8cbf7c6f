//! Configurable-field tables and attribute binding
//!
//! Every variant declares the options it accepts as an ordered table of
//! tag names pointing at its own string fields. Binding walks that table
//! and copies matching string values out of a document mapping; keys with
//! no matching tag are left alone, so structural keys such as `stage_type`
//! or `run_after` can live in the same mapping as variant options.
//!
//! Tables are usually declared with the [`configurable!`](crate::configurable)
//! macro rather than by implementing [`Configurable`] by hand.

use super::errors::{ConfigError, Result};
use serde_yaml::{Mapping, Value};

/// A settable string field of a variant instance
#[derive(Debug)]
pub enum FieldSlot<'a> {
    /// Required text option; null is rejected
    Text(&'a mut String),
    /// Optional text option; null clears it
    Optional(&'a mut Option<String>),
}

impl FieldSlot<'_> {
    /// Name of the value shape this slot accepts
    #[must_use]
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Text(_) => "a string",
            Self::Optional(_) => "a string or null",
        }
    }

    /// Stores `value` into the slot, or fails if its shape does not fit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] when `value` is not a string
    /// (or null, for optional slots).
    pub fn assign(self, key: &str, value: &Value) -> Result<()> {
        match (self, value) {
            (Self::Text(slot), Value::String(s)) => *slot = s.clone(),
            (Self::Optional(slot), Value::String(s)) => *slot = Some(s.clone()),
            (Self::Optional(slot), Value::Null) => *slot = None,
            (slot, other) => {
                return Err(ConfigError::type_mismatch(key, slot.expected(), other));
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a mut String> for FieldSlot<'a> {
    fn from(slot: &'a mut String) -> Self {
        Self::Text(slot)
    }
}

impl<'a> From<&'a mut Option<String>> for FieldSlot<'a> {
    fn from(slot: &'a mut Option<String>) -> Self {
        Self::Optional(slot)
    }
}

/// Ordered mapping from declared tag to field slot
#[derive(Debug, Default)]
pub struct FieldTable<'a> {
    entries: Vec<(&'static str, FieldSlot<'a>)>,
}

impl<'a> FieldTable<'a> {
    /// Creates an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares a field under `tag`
    #[must_use]
    pub fn field(mut self, tag: &'static str, slot: impl Into<FieldSlot<'a>>) -> Self {
        self.entries.push((tag, slot.into()));
        self
    }

    /// Declared tags, in declaration order
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(tag, _)| *tag)
    }

    /// Number of declared fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the variant declares no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every matching value from `config` into its slot.
    ///
    /// Returns how many fields were bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] for the first tagged value whose
    /// shape doesn't fit its slot.
    pub fn bind(self, config: &Mapping) -> Result<usize> {
        let mut bound = 0;
        for (tag, slot) in self.entries {
            if let Some(value) = config.get(tag) {
                slot.assign(tag, value)?;
                bound += 1;
            }
        }
        Ok(bound)
    }
}

/// Read access to a bound field, used for summaries
pub trait FieldValue {
    /// The current text, if any
    fn as_text(&self) -> Option<&str>;
}

impl FieldValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FieldValue for Option<String> {
    fn as_text(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// A variant whose options can be bound from a document mapping
pub trait Configurable {
    /// The declared option table, borrowing this instance's fields
    fn field_table(&mut self) -> FieldTable<'_>;

    /// Current option values keyed by tag, in declaration order
    fn options(&self) -> Vec<(&'static str, Option<&str>)>;
}

/// Binds `config` onto `target` through its declared field table.
///
/// # Errors
///
/// Returns [`ConfigError::TypeMismatch`] when a tagged value is not a string.
pub fn bind<T: Configurable + ?Sized>(target: &mut T, config: &Mapping) -> Result<usize> {
    target.field_table().bind(config)
}
