//! Integration tests for cmdface-core
//!
//! These tests wire a command, a registry and a minimal interface together
//! the way a front-end would.

use cmdface_core::command::{Command, CommandRegistry};
use cmdface_core::error::{Error, Result};
use cmdface_core::interface::{
    validate_parameter_bindings, validate_usage_examples, Flow, Interface, UsageExample,
};
use cmdface_core::parameter::Parameter;
use cmdface_core::value::{DataType, Value, ValueMap};

struct Sum;

impl Command for Sum {
    fn name(&self) -> &str {
        "sum"
    }

    fn brief_description(&self) -> &str {
        "Add numbers"
    }

    fn long_description(&self) -> &str {
        "Adds a list of integers."
    }

    fn parameters(&self) -> Result<Vec<Parameter>> {
        Ok(vec![
            Parameter::builder("numbers", DataType::StrList, "Numbers to add")
                .required(true)
                .build()?,
        ])
    }

    fn run(&self, input: &ValueMap) -> Result<ValueMap> {
        let numbers = input
            .get("numbers")
            .and_then(Value::as_list)
            .ok_or_else(|| Error::command_failure("sum", "no numbers given"))?;

        let mut total = 0;
        for number in numbers {
            let parsed = number
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| Error::command_failure("sum", format!("not a number: {number}")))?;
            total += parsed;
        }

        let mut results = ValueMap::new();
        results.insert("total".to_string(), Value::Int(total));
        Ok(results)
    }
}

fn create_sum() -> Box<dyn Command> {
    Box::new(Sum)
}

/// Takes whitespace-separated numbers and keeps the last total.
struct LineInterface {
    command: Box<dyn Command>,
    last_total: std::cell::Cell<Option<i64>>,
}

impl Interface for LineInterface {
    type Input = str;

    fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    fn handle_input(&self, input: &str) -> Result<Flow> {
        if input.trim().is_empty() {
            return Ok(Flow::Exit(-1));
        }
        let mut values = ValueMap::new();
        values.insert(
            "numbers".to_string(),
            Value::List(input.split_whitespace().map(Value::from).collect()),
        );
        Ok(Flow::Continue(values))
    }

    fn handle_output(&self, _input: &ValueMap, results: &ValueMap) -> Result<()> {
        let total = results
            .get("total")
            .and_then(Value::as_int)
            .ok_or_else(|| Error::MissingResult("total".to_string()))?;
        self.last_total.set(Some(total));
        Ok(())
    }
}

fn line_interface(registry: &CommandRegistry) -> LineInterface {
    LineInterface {
        command: registry.create("sum").unwrap(),
        last_total: std::cell::Cell::new(None),
    }
}

#[test]
fn test_registry_to_interface_workflow() {
    let mut registry = CommandRegistry::new();
    registry.register("sum", create_sum);

    let interface = line_interface(&registry);
    assert_eq!(interface.call("1 2 39").unwrap(), 0);
    assert_eq!(interface.last_total.get(), Some(42));
}

#[test]
fn test_early_exit_skips_command_and_output() {
    let mut registry = CommandRegistry::new();
    registry.register("sum", create_sum);

    let interface = line_interface(&registry);
    assert_eq!(interface.call("   ").unwrap(), -1);
    assert_eq!(interface.last_total.get(), None);
}

#[test]
fn test_command_failure_propagates() {
    let mut registry = CommandRegistry::new();
    registry.register("sum", create_sum);

    let interface = line_interface(&registry);
    let result = interface.call("1 two");
    assert!(matches!(result, Err(Error::Command { .. })));
    assert!(!result.unwrap_err().is_configuration());
    assert_eq!(interface.last_total.get(), None);
}

#[test]
fn test_parameter_bindings_from_declared_parameters() {
    let parameters = Sum.parameters().unwrap();
    let names = parameters.iter().map(|parameter| Some(parameter.name()));
    assert!(validate_parameter_bindings(names).is_ok());

    let doubled = parameters
        .iter()
        .chain(parameters.iter())
        .map(|parameter| Some(parameter.name()));
    assert!(matches!(
        validate_parameter_bindings(doubled),
        Err(Error::DuplicateParameterBinding(ref name)) if name == "numbers"
    ));
}

#[test]
fn test_usage_examples_required() {
    assert!(matches!(
        validate_usage_examples(&[]),
        Err(Error::NoUsageExamples)
    ));
    assert!(validate_usage_examples(&[UsageExample::new("Basic", "Add", "sum 1 2")]).is_ok());
}

#[test]
fn test_required_parameter_with_default_rejected() {
    let result = Parameter::builder("numbers", DataType::StrList, "Numbers")
        .required(true)
        .default(Value::List(Vec::new()))
        .build();

    let error = result.unwrap_err();
    assert!(matches!(error, Error::RequiredParameterWithDefault { .. }));
    assert!(error.is_configuration());
}
