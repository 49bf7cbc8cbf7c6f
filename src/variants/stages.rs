use crate::configurable;
use crate::pipeline::Stage;
use std::any::Any;

/// Runs a single command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandStage {
    /// Command line to run
    pub command: String,
    /// Working directory
    pub directory: Option<String>,
    /// Guard command; the stage runs only if it succeeds
    pub only_if: Option<String>,
}

impl CommandStage {
    /// Registered type name; also the default `stage_type`
    pub const KIND: &'static str = "command";

    /// Fresh unconfigured instance
    #[must_use]
    pub fn boxed() -> Box<dyn Stage> {
        Box::new(Self::default())
    }
}

configurable!(CommandStage {
    "command" => command,
    "directory" => directory,
    "only_if" => only_if,
});

impl Stage for CommandStage {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Runs a script file through the shell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellScriptStage {
    /// Script path
    pub file: String,
    /// Working directory
    pub directory: Option<String>,
}

impl ShellScriptStage {
    /// Registered type name
    pub const KIND: &'static str = "shell";

    /// Fresh unconfigured instance
    #[must_use]
    pub fn boxed() -> Box<dyn Stage> {
        Box::new(Self::default())
    }
}

configurable!(ShellScriptStage {
    "file" => file,
    "directory" => directory,
});

impl Stage for ShellScriptStage {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Configurable, bind};

    #[test]
    fn test_command_stage_binds_options() {
        let config: serde_yaml::Mapping =
            serde_yaml::from_str("command: cargo test\nonly_if: test -f Cargo.toml").unwrap();
        let mut stage = CommandStage::default();
        bind(&mut stage, &config).unwrap();

        assert_eq!(stage.command, "cargo test");
        assert_eq!(stage.only_if.as_deref(), Some("test -f Cargo.toml"));
        assert!(stage.directory.is_none());
    }

    #[test]
    fn test_shell_stage_table() {
        let mut stage = ShellScriptStage::default();
        let tags: Vec<_> = stage.field_table().tags().collect();
        assert_eq!(tags, vec!["file", "directory"]);
        assert_eq!(stage.kind(), "shell");
    }
}
