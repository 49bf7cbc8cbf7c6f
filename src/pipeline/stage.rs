//! Stage variants and the stage tree
//!
//! A [`StageNode`] owns exactly one variant instance plus the ordered
//! stages that run after it. The tree has no back edges: every child is
//! built from a strictly nested `run_after` block and owned by its parent.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use super::fields::Configurable;
use std::any::Any;
use std::fmt;

/// Capability set of a stage variant
pub trait Stage: Configurable + fmt::Debug + Send + Sync {
    /// Registered type name of this variant
    fn kind(&self) -> &'static str;

    /// Access to the concrete variant
    fn as_any(&self) -> &dyn Any;
}

/// A node in the pipeline forest
#[derive(Debug)]
pub struct StageNode {
    /// Stage name from `stage_name`, if declared
    pub name: Option<String>,

    /// Resolved and configured variant
    pub variant: Box<dyn Stage>,

    /// Stages that run after this one, in declaration order
    pub children: Vec<StageNode>,
}

impl StageNode {
    /// Creates an unnamed leaf around a variant
    pub fn new(variant: Box<dyn Stage>) -> Self {
        Self {
            name: None,
            variant,
            children: Vec::new(),
        }
    }

    /// Sets the stage name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the stage name in place
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Appends a stage that runs after this one
    pub fn add_child(&mut self, child: StageNode) {
        self.children.push(child);
    }

    /// Returns the stage name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Registered type name of the variant
    pub fn kind(&self) -> &'static str {
        self.variant.kind()
    }

    /// Downcasts the variant to a concrete type
    pub fn variant_as<T: Stage + 'static>(&self) -> Option<&T> {
        self.variant.as_any().downcast_ref::<T>()
    }

    /// Returns true if nothing runs after this stage
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Height of the subtree rooted here; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Iterates this node and every descendant, depth-first pre-order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl fmt::Display for StageNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stage({}): {}",
            self.name().unwrap_or("unnamed"),
            self.kind()
        )
    }
}

/// Pre-order iterator over a stage subtree
pub struct Descendants<'a> {
    stack: Vec<&'a StageNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a StageNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
