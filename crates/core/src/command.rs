//! The abstract unit of business logic and the registry that names them.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::parameter::Parameter;
use crate::value::ValueMap;

/// A unit of business logic identified by named parameters and named results.
///
/// Front-ends never look inside a command beyond what it declares here.
pub trait Command {
    fn name(&self) -> &str;

    /// One-line summary, shown when listing commands.
    fn brief_description(&self) -> &str;

    fn long_description(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error if a declared parameter is invalid.
    fn parameters(&self) -> Result<Vec<Parameter>>;

    /// Runs the command with values keyed by parameter name and returns
    /// results keyed by result name.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    fn run(&self, input: &ValueMap) -> Result<ValueMap>;
}

pub type CommandFactory = fn() -> Box<dyn Command>;

/// Statically built mapping from command name to factory.
///
/// Names are stored dashed (`word-count`); lookups accept either `_` or `-`.
#[derive(Default)]
pub struct CommandRegistry {
    factories: IndexMap<String, CommandFactory>,
}

fn to_dashed_name(name: &str) -> String {
    name.replace('_', "-")
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory, replacing any previous one with the same name.
    pub fn register(&mut self, name: &str, factory: CommandFactory) -> &mut Self {
        let name = to_dashed_name(name);
        if self.factories.insert(name.clone(), factory).is_some() {
            log::warn!("Replacing previously registered command `{name}`");
        }
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&to_dashed_name(name))
    }

    /// Available command names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// # Errors
    ///
    /// Returns [`Error::CommandNotFound`] if no command is registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn Command>> {
        self.factories
            .get(&to_dashed_name(name))
            .map(|factory| factory())
            .ok_or_else(|| Error::CommandNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    struct Echo;

    impl Command for Echo {
        fn name(&self) -> &str {
            "echo_value"
        }

        fn brief_description(&self) -> &str {
            "Echo a value"
        }

        fn long_description(&self) -> &str {
            "Returns its input unchanged"
        }

        fn parameters(&self) -> Result<Vec<Parameter>> {
            Ok(Vec::new())
        }

        fn run(&self, input: &ValueMap) -> Result<ValueMap> {
            Ok(input.clone())
        }
    }

    fn echo() -> Box<dyn Command> {
        Box::new(Echo)
    }

    #[test]
    fn test_names_are_dashed_and_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register("zeta", echo).register("echo_value", echo);

        assert_eq!(registry.names(), vec!["echo-value", "zeta"]);
        assert!(registry.contains("echo_value"));
        assert!(registry.contains("echo-value"));
    }

    #[test]
    fn test_create_runs_command() {
        let mut registry = CommandRegistry::new();
        registry.register("echo-value", echo);

        let command = registry.create("echo_value").unwrap();
        let mut input = ValueMap::new();
        input.insert("x".to_string(), Value::Int(1));
        assert_eq!(command.run(&input).unwrap(), input);
    }

    #[test]
    fn test_create_unknown_command() {
        let registry = CommandRegistry::new();
        assert!(matches!(
            registry.create("missing"),
            Err(Error::CommandNotFound(ref name)) if name == "missing"
        ));
    }
}
