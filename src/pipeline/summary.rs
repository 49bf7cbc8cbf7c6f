//! Serializable snapshot of an assembled pipeline

use super::fields::Configurable;
use super::pipeline_def::Pipeline;
use super::stage::StageNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Kind and bound options of one variant instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSummary {
    /// Registered type name
    pub kind: String,
    /// Options that hold a non-empty value
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl VariantSummary {
    fn new<T: Configurable + ?Sized>(kind: &str, variant: &T) -> Self {
        let options = variant
            .options()
            .into_iter()
            .filter_map(|(tag, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| (tag.to_string(), v.to_string()))
            })
            .collect();
        Self {
            kind: kind.to_string(),
            options,
        }
    }
}

/// One stage and its `run_after` children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    /// Stage name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Variant kind and options
    #[serde(flatten)]
    pub variant: VariantSummary,
    /// Stages that run after this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<StageSummary>,
}

impl From<&StageNode> for StageSummary {
    fn from(node: &StageNode) -> Self {
        Self {
            name: node.name.clone(),
            variant: VariantSummary::new(node.kind(), &*node.variant),
            run_after: node.children.iter().map(Self::from).collect(),
        }
    }
}

/// Whole-pipeline snapshot, as printed by `stageline check --format json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    /// Resolved reporter
    pub messenger: VariantSummary,
    /// Root stages
    pub pipeline: Vec<StageSummary>,
}

impl From<&Pipeline> for PipelineSummary {
    fn from(pipeline: &Pipeline) -> Self {
        Self {
            messenger: VariantSummary::new(pipeline.reporter.kind(), &*pipeline.reporter),
            pipeline: pipeline.stages.iter().map(StageSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::{CommandStage, SlackMessenger};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_skips_unset_options() {
        let pipeline = Pipeline::new(SlackMessenger::boxed());
        let summary = pipeline.summary();

        assert_eq!(summary.messenger.kind, "slack");
        assert!(summary.messenger.options.is_empty());
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["messenger"].get("options").is_none());
    }

    #[test]
    fn test_summary_json_shape() {
        let slack = SlackMessenger {
            channel: "#ops".to_string(),
            ..SlackMessenger::default()
        };
        let build = CommandStage {
            command: "make".to_string(),
            ..CommandStage::default()
        };
        let mut pipeline = Pipeline::new(Box::new(slack));
        pipeline.add_stage(StageNode::new(Box::new(build)).with_name("build"));

        let json = serde_json::to_value(pipeline.summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messenger": {
                    "kind": "slack",
                    "options": { "channel": "#ops" }
                },
                "pipeline": [
                    { "name": "build", "kind": "command", "options": { "command": "make" } }
                ]
            })
        );
    }
}
