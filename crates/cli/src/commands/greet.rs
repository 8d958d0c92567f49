//! `greet`: builds a greeting for someone.

use cmdface_core::command::Command;
use cmdface_core::error::{Error, Result};
use cmdface_core::interface::UsageExample;
use cmdface_core::parameter::Parameter;
use cmdface_core::value::{DataType, Value, ValueMap};

use crate::config::InterfaceSettings;
use crate::conversion::ParameterConversion;
use crate::handlers::output::write_or_print_string;
use crate::handlers::OutputHandler;
use crate::interface::CliInterface;
use crate::option::{CliAction, CliOption, CliType};

pub const NAME: &str = "greet";

/// Upper bound on repetitions.
pub const MAX_TIMES: i64 = 1000;

pub struct Greet;

impl Command for Greet {
    fn name(&self) -> &str {
        NAME
    }

    fn brief_description(&self) -> &str {
        "Greet someone by name"
    }

    fn long_description(&self) -> &str {
        "Builds a greeting for NAME, optionally repeated and in capitals."
    }

    fn parameters(&self) -> Result<Vec<Parameter>> {
        Ok(vec![
            Parameter::builder("name", DataType::Str, "Who to greet")
                .required(true)
                .build()?,
            Parameter::builder("times", DataType::Int, "How many times to greet")
                .default(Value::Int(1))
                .build()?,
            Parameter::builder("shout", DataType::Bool, "Greet in capitals")
                .default(Value::Bool(false))
                .build()?,
        ])
    }

    fn run(&self, input: &ValueMap) -> Result<ValueMap> {
        let name = input
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::command_failure(NAME, "no name given"))?;
        let times = input.get("times").and_then(Value::as_int).unwrap_or(1);
        let shout = input
            .get("shout")
            .and_then(Value::as_bool)
            .unwrap_or_default();

        if times < 1 {
            return Err(Error::command_failure(
                NAME,
                format!("times must be at least 1, got {times}"),
            ));
        }
        if times > MAX_TIMES {
            return Err(Error::command_failure(
                NAME,
                format!("times must be at most {MAX_TIMES}, got {times}"),
            ));
        }

        let mut greeting = format!("Hello, {name}!");
        if shout {
            greeting = greeting.to_uppercase();
        }

        let greetings = vec![greeting; usize::try_from(times).unwrap_or(1)];

        let mut results = ValueMap::new();
        results.insert("greeting".to_string(), Value::Str(greetings.join("\n")));
        Ok(results)
    }
}

pub fn create() -> Box<dyn Command> {
    Box::new(Greet)
}

/// # Errors
///
/// Returns an error if the interface wiring is invalid.
pub fn interface(command: Box<dyn Command>, settings: InterfaceSettings) -> Result<CliInterface> {
    let output_path = CliOption::builder()
        .name("output_path")
        .help("Write the greeting to this file")
        .short_name(Some('o'))
        .cli_type(CliType::NewFilepath)
        .default_description("print to stdout")
        .build()?;

    CliInterface::builder(command)
        .settings(settings)
        .usage_example(UsageExample::new(
            "Basic",
            "Greet Ada once",
            "{prog} --name Ada",
        ))
        .usage_example(UsageExample::new(
            "Loud",
            "Greet Ada three times in capitals and save it",
            "{prog} -n Ada -t 3 --shout -o greeting.txt",
        ))
        .conversion(
            "name",
            ParameterConversion::new("name", CliType::String).with_short_name(Some('n')),
        )
        .conversion(
            "times",
            ParameterConversion::new("times", CliType::Int).with_short_name(Some('t')),
        )
        .conversion(
            "shout",
            ParameterConversion::new("shout", CliType::None)
                .with_action(CliAction::StoreTrue)
                .with_short_name(Some('s')),
        )
        .additional_option(output_path)
        .output_handler(OutputHandler::with_option(
            "greeting",
            "output_path",
            write_or_print_string,
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, times: i64, shout: bool) -> ValueMap {
        let mut values = ValueMap::new();
        values.insert("name".to_string(), Value::from(name));
        values.insert("times".to_string(), Value::Int(times));
        values.insert("shout".to_string(), Value::Bool(shout));
        values
    }

    #[test]
    fn test_greet_once() {
        let results = Greet.run(&input("Ada", 1, false)).unwrap();
        assert_eq!(results["greeting"], Value::from("Hello, Ada!"));
    }

    #[test]
    fn test_greet_repeated_and_shouted() {
        let results = Greet.run(&input("Ada", 2, true)).unwrap();
        assert_eq!(results["greeting"], Value::from("HELLO, ADA!\nHELLO, ADA!"));
    }

    #[test]
    fn test_greet_rejects_zero_times() {
        let result = Greet.run(&input("Ada", 0, false));
        assert!(matches!(result, Err(Error::Command { .. })));
    }

    #[test]
    fn test_greet_times_upper_bound() {
        let results = Greet.run(&input("Ada", MAX_TIMES, false)).unwrap();
        let greeting = results["greeting"].as_str().unwrap();
        assert_eq!(greeting.lines().count(), 1000);

        for times in [MAX_TIMES + 1, 1_000_000_000_000_000_000] {
            let error = Greet.run(&input("Ada", times, false)).unwrap_err();
            assert!(matches!(error, Error::Command { .. }));
            assert!(error.to_string().contains("at most 1000"));
        }
    }

    #[test]
    fn test_interface_builds() {
        let interface =
            interface(create(), InterfaceSettings::with_program_name("cmdface greet")).unwrap();

        assert_eq!(interface.options().len(), 4);
        assert_eq!(
            interface.usage_line(),
            "cmdface greet [options] {-n/--name NAME}"
        );
        assert_eq!(interface.usage_examples()[0].example, "cmdface greet --name Ada");
    }
}
