//! Built-in stage and messenger variants
//!
//! These types only carry identity and bound options. Running a stage or
//! posting a report belongs to the execution side, not to construction.

mod messengers;
mod stages;

pub use messengers::{FakeMessenger, HipChatMessenger, SlackMessenger};
pub use stages::{CommandStage, ShellScriptStage};

use crate::pipeline::Registry;

/// Registers every built-in variant into `registry`
pub fn register_defaults(registry: &mut Registry) {
    registry
        .register_stage(CommandStage::KIND, CommandStage::boxed)
        .register_stage(ShellScriptStage::KIND, ShellScriptStage::boxed)
        .register_messenger(FakeMessenger::KIND, FakeMessenger::boxed)
        .register_messenger(SlackMessenger::KIND, SlackMessenger::boxed)
        .register_messenger(HipChatMessenger::KIND, HipChatMessenger::boxed);
}
