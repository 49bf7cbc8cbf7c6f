//! Variant registries
//!
//! Maps lower-cased type names to constructors producing fresh,
//! default-valued stage or messenger instances. A [`Registry`] is an
//! explicit value handed to the parser; there is no global table.

use super::errors::{ConfigError, Result, VariantKind};
use super::messenger::Messenger;
use super::stage::Stage;
use std::collections::HashMap;

/// Constructor for a stage variant
pub type StageFactory = fn() -> Box<dyn Stage>;

/// Constructor for a messenger variant
pub type MessengerFactory = fn() -> Box<dyn Messenger>;

/// Name of the no-op messenger used when a document has no messenger block
pub const FAKE_MESSENGER: &str = "fake";

/// Name -> constructor table for one kind of variant
pub struct VariantTable<T: ?Sized> {
    kind: VariantKind,
    constructors: HashMap<String, fn() -> Box<T>>,
}

impl<T: ?Sized> VariantTable<T> {
    /// Creates an empty table for `kind`
    #[must_use]
    pub fn new(kind: VariantKind) -> Self {
        Self {
            kind,
            constructors: HashMap::new(),
        }
    }

    /// Registers a constructor, replacing any previous one with the same name
    pub fn register(&mut self, name: &str, constructor: fn() -> Box<T>) {
        self.constructors.insert(normalize(name), constructor);
    }

    /// Builds a fresh instance of the named variant
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVariant`] if nothing is registered
    /// under the normalized name.
    pub fn resolve(&self, name: &str) -> Result<Box<T>> {
        let name = normalize(name);
        match self.constructors.get(&name) {
            Some(constructor) => Ok(constructor()),
            None => Err(ConfigError::UnknownVariant {
                kind: self.kind,
                name,
            }),
        }
    }

    /// Checks if a variant is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&normalize(name))
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Stage and messenger tables used by the parser
pub struct Registry {
    stages: VariantTable<dyn Stage>,
    messengers: VariantTable<dyn Messenger>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding only the no-op messenger
    #[must_use]
    pub fn new() -> Self {
        let mut messengers = VariantTable::new(VariantKind::Messenger);
        messengers.register(FAKE_MESSENGER, crate::variants::FakeMessenger::boxed);
        Self {
            stages: VariantTable::new(VariantKind::Stage),
            messengers,
        }
    }

    /// Creates a registry with every built-in variant
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::variants::register_defaults(&mut registry);
        registry
    }

    /// Registers a stage variant
    pub fn register_stage(&mut self, name: &str, constructor: StageFactory) -> &mut Self {
        self.stages.register(name, constructor);
        self
    }

    /// Registers a messenger variant
    pub fn register_messenger(&mut self, name: &str, constructor: MessengerFactory) -> &mut Self {
        self.messengers.register(name, constructor);
        self
    }

    /// Builds a fresh stage variant
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVariant`] for unregistered names.
    pub fn resolve_stage(&self, name: &str) -> Result<Box<dyn Stage>> {
        self.stages.resolve(name)
    }

    /// Builds a fresh messenger variant
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVariant`] for unregistered names.
    pub fn resolve_messenger(&self, name: &str) -> Result<Box<dyn Messenger>> {
        self.messengers.resolve(name)
    }

    /// Stage table
    #[must_use]
    pub fn stages(&self) -> &VariantTable<dyn Stage> {
        &self.stages
    }

    /// Messenger table
    #[must_use]
    pub fn messengers(&self) -> &VariantTable<dyn Messenger> {
        &self.messengers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::{CommandStage, SlackMessenger};
    use rstest::rstest;

    #[test]
    fn test_new_registry_has_fake_messenger() {
        let registry = Registry::new();
        assert!(registry.messengers().contains(FAKE_MESSENGER));
        assert!(registry.stages().names().is_empty());
    }

    #[rstest]
    #[case("command")]
    #[case("Command")]
    #[case("COMMAND")]
    fn test_resolve_is_case_insensitive(#[case] name: &str) {
        let registry = Registry::with_defaults();
        let stage = registry.resolve_stage(name).unwrap();
        assert_eq!(stage.kind(), "command");
    }

    #[test]
    fn test_resolve_unknown_stage() {
        let registry = Registry::with_defaults();
        let err = registry.resolve_stage("Docker").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownVariant {
                kind: VariantKind::Stage,
                name: "docker".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_unknown_messenger() {
        let registry = Registry::with_defaults();
        let err = registry.resolve_messenger("irc").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownVariant {
                kind: VariantKind::Messenger,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_returns_fresh_instances() {
        let registry = Registry::with_defaults();
        let first = registry.resolve_messenger("slack").unwrap();
        let second = registry.resolve_messenger("slack").unwrap();
        let first = first.downcast_ref::<SlackMessenger>().unwrap();
        let second = second.downcast_ref::<SlackMessenger>().unwrap();
        assert!(!std::ptr::eq(first, second));
        assert!(first.channel.is_empty());
    }

    #[test]
    fn test_register_custom_stage() {
        let mut registry = Registry::new();
        registry.register_stage("Build", CommandStage::boxed);

        assert!(registry.stages().contains("build"));
        assert_eq!(registry.stages().names(), vec!["build"]);
    }

    #[test]
    fn test_default_names() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.stages().names(), vec!["command", "shell"]);
        assert_eq!(
            registry.messengers().names(),
            vec!["fake", "hipchat", "slack"]
        );
    }
}
