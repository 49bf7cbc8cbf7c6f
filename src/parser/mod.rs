//! Document to pipeline materialization
//!
//! A single synchronous, depth-first pass over an already loaded document:
//! the messenger block is resolved first, then every stage description of
//! the `pipeline` block is resolved through the [`Registry`], bound from its
//! own mapping and given its `run_after` children. The first error aborts
//! the whole parse; no partial pipeline is ever returned.

pub mod document;

use crate::infrastructure::Config;
use crate::pipeline::{
    ConfigError, FAKE_MESSENGER, Messenger, Pipeline, Registry, Result, StageNode, bind,
};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

/// Variant used for stage descriptions without `stage_type`
pub const DEFAULT_STAGE_TYPE: &str = "command";

/// Default bound on `run_after` nesting
///
/// Each `run_after` level costs the YAML reader two levels of its own
/// 128-level recursion limit, so bounds above about 60 are never reached
/// for documents read through [`document`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

const MESSENGER_KEY: &str = "messenger";
const MESSENGER_TYPE_KEY: &str = "type";
const PIPELINE_KEY: &str = "pipeline";
const STAGE_TYPE_KEY: &str = "stage_type";
const STAGE_NAME_KEY: &str = "stage_name";
const RUN_AFTER_KEY: &str = "run_after";

/// Tunables for a [`Parser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest allowed stage; root stages sit at depth 1
    ///
    /// See [`DEFAULT_MAX_DEPTH`] for the reader's own limit.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl From<&Config> for ParserOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_depth: config.max_depth,
        }
    }
}

/// Builds pipelines from documents using a fixed registry
pub struct Parser {
    registry: Registry,
    options: ParserOptions,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Registry::with_defaults())
    }
}

impl Parser {
    /// Creates a parser over `registry` with default options
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            options: ParserOptions::default(),
        }
    }

    /// Replaces the parser options
    #[must_use]
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Registry used for variant lookups
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current options
    #[must_use]
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Assembles a pipeline from a top-level document.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingBlock`] if `pipeline` is absent or not a sequence
    /// - [`ConfigError::MissingField`] if the messenger block has no `type`
    /// - [`ConfigError::UnknownVariant`] for unregistered stage or messenger types
    /// - [`ConfigError::TypeMismatch`] for values of the wrong shape
    /// - [`ConfigError::MaxDepthExceeded`] for nesting beyond the configured bound
    pub fn parse(&self, document: &Mapping) -> Result<Pipeline> {
        let reporter = self.resolve_messenger(document.get(MESSENGER_KEY))?;

        let Some(Value::Sequence(descriptions)) = document.get(PIPELINE_KEY) else {
            return Err(ConfigError::MissingBlock(PIPELINE_KEY.to_string()));
        };

        let mut pipeline = Pipeline::new(reporter);
        for stage in self.build_stages(descriptions)? {
            pipeline.add_stage(stage);
        }

        info!(
            stages = pipeline.stage_count(),
            total = pipeline.total_stages(),
            "Assembled pipeline"
        );
        Ok(pipeline)
    }

    /// Parses YAML text and assembles a pipeline from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Document`] for unreadable text, otherwise the
    /// errors of [`Parser::parse`].
    pub fn parse_str(&self, text: &str) -> Result<Pipeline> {
        self.parse(&document::from_str(text)?)
    }

    /// Resolves the reporter from an optional messenger block.
    ///
    /// An absent or null block yields the no-op messenger.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the block lacks `type`,
    /// [`ConfigError::UnknownVariant`] for an unregistered type and
    /// [`ConfigError::TypeMismatch`] for a block or option of the wrong shape.
    pub fn resolve_messenger(&self, block: Option<&Value>) -> Result<Box<dyn Messenger>> {
        let block = match block {
            None | Some(Value::Null) => {
                info!("Not found messenger block");
                return self.registry.resolve_messenger(FAKE_MESSENGER);
            }
            Some(Value::Mapping(block)) => block,
            Some(other) => {
                return Err(ConfigError::type_mismatch(MESSENGER_KEY, "a mapping", other));
            }
        };

        info!("Found messenger block");
        let messenger_type = optional_str(block, MESSENGER_TYPE_KEY)?.ok_or_else(|| {
            ConfigError::MissingField {
                block: MESSENGER_KEY.to_string(),
                field: MESSENGER_TYPE_KEY.to_string(),
            }
        })?;
        info!("type of reporter is {}", messenger_type);

        let mut messenger = self.registry.resolve_messenger(messenger_type)?;
        bind(&mut *messenger, block)?;
        Ok(messenger)
    }

    /// Builds an ordered sequence of root stages from their descriptions.
    ///
    /// # Errors
    ///
    /// Returns the first error met anywhere in the forest.
    pub fn build_stages(&self, descriptions: &[Value]) -> Result<Vec<StageNode>> {
        self.build_level(PIPELINE_KEY, descriptions, 1)
    }

    fn build_level(&self, key: &str, descriptions: &[Value], depth: usize) -> Result<Vec<StageNode>> {
        descriptions
            .iter()
            .enumerate()
            .map(|(index, description)| match description {
                Value::Mapping(description) => self.build_stage(description, depth),
                other => Err(ConfigError::type_mismatch(
                    format!("{key}[{index}]"),
                    "a mapping",
                    other,
                )),
            })
            .collect()
    }

    fn build_stage(&self, description: &Mapping, depth: usize) -> Result<StageNode> {
        if depth > self.options.max_depth {
            return Err(ConfigError::MaxDepthExceeded {
                max: self.options.max_depth,
            });
        }

        let stage_type = optional_str(description, STAGE_TYPE_KEY)?.unwrap_or(DEFAULT_STAGE_TYPE);
        let mut variant = self.registry.resolve_stage(stage_type)?;
        let name = optional_str(description, STAGE_NAME_KEY)?;
        bind(&mut *variant, description)?;

        let mut node = StageNode::new(variant);
        if let Some(name) = name {
            node.set_name(name);
        }

        match description.get(RUN_AFTER_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Sequence(children)) => {
                for child in self.build_level(RUN_AFTER_KEY, children, depth + 1)? {
                    node.add_child(child);
                }
            }
            Some(other) => {
                return Err(ConfigError::type_mismatch(RUN_AFTER_KEY, "a sequence", other));
            }
        }

        debug!(
            kind = node.kind(),
            name = node.name().unwrap_or_default(),
            depth,
            children = node.children.len(),
            "Built stage"
        );
        Ok(node)
    }
}

/// Assembles a pipeline with the built-in variants and default options.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(document: &Mapping) -> Result<Pipeline> {
    Parser::default().parse(document)
}

/// Reads an optional string key; null counts as absent
fn optional_str<'a>(map: &'a Mapping, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(ConfigError::type_mismatch(key, "a string", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::VariantKind;
    use crate::variants::{CommandStage, FakeMessenger, ShellScriptStage, SlackMessenger};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn doc(yaml: &str) -> Mapping {
        document::from_str(yaml).unwrap()
    }

    fn names(stages: &[StageNode]) -> Vec<&str> {
        stages.iter().filter_map(StageNode::name).collect()
    }

    #[test]
    fn test_parse_build_and_deploy() {
        let pipeline = parse(&doc(
            r#"
pipeline:
  - stage_name: build
  - stage_name: deploy
    run_after:
      - stage_name: notify
"#,
        ))
        .unwrap();

        assert_eq!(names(&pipeline.stages), vec!["build", "deploy"]);
        assert!(pipeline.stages[0].is_leaf());
        assert_eq!(names(&pipeline.stages[1].children), vec!["notify"]);
        assert_eq!(pipeline.reporter.kind(), FakeMessenger::KIND);
    }

    #[test]
    fn test_parse_slack_messenger_and_empty_pipeline() {
        let pipeline = parse(&doc("messenger:\n  type: slack\n  channel: '#ops'\npipeline: []")).unwrap();

        let slack = pipeline.reporter.downcast_ref::<SlackMessenger>().unwrap();
        assert_eq!(slack.channel, "#ops");
        assert_eq!(pipeline.stage_count(), 0);
    }

    #[test]
    fn test_default_stage_type_is_command() {
        let pipeline = parse(&doc("pipeline:\n  - command: echo hi")).unwrap();
        let stage = pipeline.stages[0].variant_as::<CommandStage>().unwrap();
        assert_eq!(stage.command, "echo hi");
        assert!(pipeline.stages[0].name().is_none());
    }

    #[test]
    fn test_stage_type_is_case_normalized() {
        let pipeline = parse(&doc("pipeline:\n  - stage_type: Shell\n    file: deploy.sh")).unwrap();
        let stage = pipeline.stages[0].variant_as::<ShellScriptStage>().unwrap();
        assert_eq!(stage.file, "deploy.sh");
    }

    #[rstest]
    #[case::absent("messenger: {type: fake}")]
    #[case::not_a_sequence("pipeline: build")]
    #[case::null("pipeline:")]
    #[case::mapping("pipeline: {stage_name: build}")]
    fn test_missing_pipeline_block(#[case] yaml: &str) {
        let err = parse(&doc(yaml)).unwrap_err();
        assert_eq!(err, ConfigError::MissingBlock("pipeline".to_string()));
    }

    #[test]
    fn test_messenger_without_type() {
        let err = parse(&doc("messenger:\n  channel: '#ops'\npipeline: []")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingField {
                block: "messenger".to_string(),
                field: "type".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_messenger_type() {
        let err = parse(&doc("messenger: {type: irc}\npipeline: []")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownVariant {
                kind: VariantKind::Messenger,
                name: "irc".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_nested_stage_type_aborts() {
        let err = parse(&doc(
            r#"
pipeline:
  - stage_name: build
    run_after:
      - stage_name: ok
      - stage_type: docker
"#,
        ))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::UnknownVariant {
                kind: VariantKind::Stage,
                name: "docker".to_string(),
            }
        );
    }

    #[test]
    fn test_null_messenger_uses_fake() {
        let pipeline = parse(&doc("messenger:\npipeline: []")).unwrap();
        assert_eq!(pipeline.reporter.kind(), "fake");
    }

    #[rstest]
    #[case::number_option("pipeline:\n  - command: 42", "command")]
    #[case::stage_name("pipeline:\n  - stage_name: [a, b]", "stage_name")]
    #[case::stage_type("pipeline:\n  - stage_type: 7", "stage_type")]
    #[case::run_after("pipeline:\n  - run_after: notify", "run_after")]
    #[case::element("pipeline:\n  - build", "pipeline[0]")]
    #[case::child_element("pipeline:\n  - run_after: [a]", "run_after[0]")]
    #[case::messenger_block("messenger: slack\npipeline: []", "messenger")]
    #[case::messenger_option("messenger: {type: slack, channel: 1}\npipeline: []", "channel")]
    fn test_type_mismatch(#[case] yaml: &str, #[case] expected_key: &str) {
        let err = parse(&doc(yaml)).unwrap_err();
        assert!(
            matches!(&err, ConfigError::TypeMismatch { key, .. } if key == expected_key),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_max_depth_exceeded() {
        let parser = Parser::default().with_options(ParserOptions { max_depth: 2 });
        let yaml = "pipeline:\n  - run_after:\n      - run_after:\n          - stage_name: deep";
        let err = parser.parse(&doc(yaml)).unwrap_err();
        assert_eq!(err, ConfigError::MaxDepthExceeded { max: 2 });
    }

    #[test]
    fn test_max_depth_boundary_accepted() {
        let parser = Parser::default().with_options(ParserOptions { max_depth: 2 });
        let yaml = "pipeline:\n  - run_after:\n      - stage_name: child";
        let pipeline = parser.parse(&doc(yaml)).unwrap();
        assert_eq!(pipeline.depth(), 2);
    }

    #[test]
    fn test_default_max_depth_fires_before_reader_limit() {
        let err = parse(&doc(&nested(DEFAULT_MAX_DEPTH + 1))).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MaxDepthExceeded {
                max: DEFAULT_MAX_DEPTH
            }
        );
        assert!(parse(&doc(&nested(DEFAULT_MAX_DEPTH))).is_ok());
    }

    #[test]
    fn test_custom_registry_without_command() {
        let parser = Parser::new(Registry::new());
        let err = parser.parse(&doc("pipeline:\n  - stage_name: build")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVariant { name, .. } if name == "command"));
    }

    fn nested(depth: usize) -> String {
        let mut yaml = String::from("pipeline:\n");
        for level in 0..depth {
            let indent = "  ".repeat(level * 2);
            yaml.push_str(&format!("{indent}  - stage_name: s{level}\n"));
            if level + 1 < depth {
                yaml.push_str(&format!("{indent}    run_after:\n"));
            }
        }
        yaml
    }

    proptest! {
        #[test]
        fn prop_root_order_preserved(stage_names in prop::collection::vec("[a-z]{1,8}", 0..16)) {
            let mut yaml = String::from("pipeline:\n");
            if stage_names.is_empty() {
                yaml = String::from("pipeline: []\n");
            }
            for name in &stage_names {
                yaml.push_str(&format!("  - stage_name: '{name}'\n"));
            }

            let pipeline = parse(&doc(&yaml)).unwrap();
            let parsed: Vec<String> = pipeline
                .stages
                .iter()
                .filter_map(|s| s.name().map(str::to_string))
                .collect();
            prop_assert_eq!(parsed, stage_names);
            prop_assert!(pipeline.stages.iter().all(StageNode::is_leaf));
        }

        #[test]
        fn prop_child_order_preserved(
            tree in prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 0..6), 1..6)
        ) {
            let mut yaml = String::from("pipeline:\n");
            for (index, children) in tree.iter().enumerate() {
                yaml.push_str(&format!("  - stage_name: 'root{index}'\n"));
                if !children.is_empty() {
                    yaml.push_str("    run_after:\n");
                }
                for child in children {
                    yaml.push_str(&format!("      - stage_name: '{child}'\n"));
                }
            }

            let pipeline = parse(&doc(&yaml)).unwrap();
            prop_assert_eq!(pipeline.stage_count(), tree.len());
            for (stage, children) in pipeline.stages.iter().zip(&tree) {
                let parsed: Vec<String> = stage
                    .children
                    .iter()
                    .filter_map(|s| s.name().map(str::to_string))
                    .collect();
                prop_assert_eq!(&parsed, children);
            }
        }

        #[test]
        fn prop_depth_matches_nesting(depth in 1usize..12) {
            let pipeline = parse(&doc(&nested(depth))).unwrap();
            prop_assert_eq!(pipeline.depth(), depth);
            prop_assert_eq!(pipeline.total_stages(), depth);
        }
    }
}
