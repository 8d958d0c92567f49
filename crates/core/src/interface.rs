//! The contract every front-end (CLI, future others) implements to expose a
//! [`Command`].

use std::collections::HashSet;

use log::debug;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::value::ValueMap;

/// Whether input handling produced command input or ended the call early.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Values to run the command with.
    Continue(ValueMap),
    /// The front-end already reported to the user; stop with this status.
    Exit(i32),
}

/// A front-end that turns its own input shape into command input and routes
/// command results to side effects.
///
/// Implementors supply the input and output adapters; [`Interface::call`]
/// runs the pipeline.
pub trait Interface {
    type Input: ?Sized;

    fn command(&self) -> &dyn Command;

    /// Converts front-end input into the mapping handed to the command.
    ///
    /// # Errors
    ///
    /// Returns an error if the interface was wired incorrectly. User mistakes
    /// are reported by the front-end and surface as [`Flow::Exit`].
    fn handle_input(&self, input: &Self::Input) -> Result<Flow>;

    /// Dispatches command results. `input` is the mapping the command ran with.
    ///
    /// # Errors
    ///
    /// Returns an error if an expected result is missing or a handler fails.
    fn handle_output(&self, input: &ValueMap, results: &ValueMap) -> Result<()>;

    /// Runs input handling, the command, then output handling.
    ///
    /// Returns the process status: 0 on success.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the adapters or the command.
    fn call(&self, input: &Self::Input) -> Result<i32> {
        let command_input = match self.handle_input(input)? {
            Flow::Continue(values) => values,
            Flow::Exit(status) => {
                debug!("Input handling ended the call with status {status}");
                return Ok(status);
            }
        };

        debug!("Invoking `{}`", self.command().name());
        let results = self.command().run(&command_input)?;

        self.handle_output(&command_input, &results)?;
        Ok(0)
    }
}

/// Structured help text illustrating one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageExample {
    pub short_description: String,
    pub long_description: String,
    pub example: String,
}

impl UsageExample {
    pub fn new(short_description: &str, long_description: &str, example: &str) -> Self {
        Self {
            short_description: short_description.to_string(),
            long_description: long_description.to_string(),
            example: example.to_string(),
        }
    }
}

/// Ensures at least one usage example exists.
///
/// # Errors
///
/// Returns [`Error::NoUsageExamples`] for an empty slice.
pub fn validate_usage_examples(examples: &[UsageExample]) -> Result<()> {
    if examples.is_empty() {
        return Err(Error::NoUsageExamples);
    }
    Ok(())
}

/// Ensures no two inputs are bound to the same parameter. Inputs not bound
/// to any parameter are passed as `None` and ignored.
///
/// # Errors
///
/// Returns [`Error::DuplicateParameterBinding`] naming the first repeated parameter.
pub fn validate_parameter_bindings<'a>(
    bindings: impl IntoIterator<Item = Option<&'a str>>,
) -> Result<()> {
    let mut seen = HashSet::new();

    for name in bindings.into_iter().flatten() {
        if !seen.insert(name) {
            return Err(Error::DuplicateParameterBinding(name.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Parameter;
    use crate::value::Value;
    use std::cell::RefCell;

    struct Doubler;

    impl Command for Doubler {
        fn name(&self) -> &str {
            "doubler"
        }

        fn brief_description(&self) -> &str {
            "Double a number"
        }

        fn long_description(&self) -> &str {
            "Doubles `x`"
        }

        fn parameters(&self) -> Result<Vec<Parameter>> {
            Ok(Vec::new())
        }

        fn run(&self, input: &ValueMap) -> Result<ValueMap> {
            let x = input.get("x").and_then(Value::as_int).unwrap_or_default();
            let mut results = ValueMap::new();
            results.insert("doubled".to_string(), Value::Int(x * 2));
            Ok(results)
        }
    }

    /// Accepts a number to double, or a negative number to exit early with it.
    struct NumberInterface {
        command: Doubler,
        seen: RefCell<Vec<Value>>,
    }

    impl Interface for NumberInterface {
        type Input = i64;

        fn command(&self) -> &dyn Command {
            &self.command
        }

        fn handle_input(&self, input: &i64) -> Result<Flow> {
            if *input < 0 {
                return Ok(Flow::Exit(i32::try_from(*input).unwrap_or(-1)));
            }
            let mut values = ValueMap::new();
            values.insert("x".to_string(), Value::Int(*input));
            Ok(Flow::Continue(values))
        }

        fn handle_output(&self, _input: &ValueMap, results: &ValueMap) -> Result<()> {
            let doubled = results
                .get("doubled")
                .ok_or_else(|| Error::MissingResult("doubled".to_string()))?;
            self.seen.borrow_mut().push(doubled.clone());
            Ok(())
        }
    }

    fn number_interface() -> NumberInterface {
        NumberInterface {
            command: Doubler,
            seen: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_call_runs_pipeline() {
        let interface = number_interface();
        assert_eq!(interface.call(&21).unwrap(), 0);
        assert_eq!(*interface.seen.borrow(), vec![Value::Int(42)]);
    }

    #[test]
    fn test_call_exit_skips_command() {
        let interface = number_interface();
        assert_eq!(interface.call(&-1).unwrap(), -1);
        assert!(interface.seen.borrow().is_empty());
    }

    #[test]
    fn test_validate_usage_examples() {
        assert!(matches!(
            validate_usage_examples(&[]),
            Err(Error::NoUsageExamples)
        ));
        let examples = [UsageExample::new("Basic", "Run it", "{prog} --x 1")];
        assert!(validate_usage_examples(&examples).is_ok());
    }

    #[test]
    fn test_validate_parameter_bindings() {
        assert!(validate_parameter_bindings([Some("a"), None, Some("b"), None]).is_ok());

        let result = validate_parameter_bindings([Some("a"), Some("b"), Some("a")]);
        assert!(matches!(
            result,
            Err(Error::DuplicateParameterBinding(ref name)) if name == "a"
        ));
    }
}
