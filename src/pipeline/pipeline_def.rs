//! Pipeline definition

#![allow(clippy::must_use_candidate)]

use super::messenger::Messenger;
use super::stage::StageNode;
use super::summary::PipelineSummary;
use std::fmt;

/// An assembled pipeline: an ordered forest of stages plus its reporter
#[derive(Debug)]
pub struct Pipeline {
    /// Root stages, in declaration order
    pub stages: Vec<StageNode>,

    /// Messenger that reports execution outcomes
    pub reporter: Box<dyn Messenger>,
}

impl Pipeline {
    /// Creates a pipeline with no stages
    pub fn new(reporter: Box<dyn Messenger>) -> Self {
        Self {
            stages: Vec::new(),
            reporter,
        }
    }

    /// Appends a root stage
    pub fn add_stage(&mut self, stage: StageNode) {
        self.stages.push(stage);
    }

    /// Returns number of root stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns number of stages in the whole forest
    pub fn total_stages(&self) -> usize {
        self.iter_stages().count()
    }

    /// Deepest `run_after` chain; zero for an empty pipeline
    pub fn depth(&self) -> usize {
        self.stages.iter().map(StageNode::depth).max().unwrap_or(0)
    }

    /// Every stage, depth-first pre-order across the roots
    pub fn iter_stages(&self) -> impl Iterator<Item = &StageNode> {
        self.stages.iter().flat_map(StageNode::descendants)
    }

    /// Serializable snapshot of the pipeline structure
    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary::from(self)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pipeline: {} stages, reporter {}",
            self.total_stages(),
            self.reporter.kind()
        )?;
        for stage in &self.stages {
            write_tree(f, stage, 1)?;
        }
        Ok(())
    }
}

fn write_tree(f: &mut fmt::Formatter<'_>, node: &StageNode, level: usize) -> fmt::Result {
    writeln!(f, "{:indent$}- {node}", "", indent = (level - 1) * 2)?;
    for child in &node.children {
        write_tree(f, child, level + 1)?;
    }
    Ok(())
}
