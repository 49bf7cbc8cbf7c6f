//! Prelude module for common imports

pub use crate::configurable;

pub use crate::parser::document;
pub use crate::parser::{Parser, ParserOptions, parse};
pub use crate::pipeline::{
    ConfigError, Configurable, FieldSlot, FieldTable, Messenger, Pipeline, Registry, Stage,
    StageNode, VariantKind, bind,
};
pub use crate::variants::{
    CommandStage, FakeMessenger, HipChatMessenger, ShellScriptStage, SlackMessenger,
};
