//! Adapter between [`CliOption`]s and `clap`.
//!
//! The parser is built dynamically from the option list; parsed values are
//! read back into a [`ValueMap`] keyed by option name.

use std::any::Any;
use std::path::PathBuf;

use clap::builder::ValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use cmdface_core::value::{Value, ValueMap};

use crate::config::InterfaceSettings;
use crate::option::{CliAction, CliOption, CliType};

/// Id of the hidden argument that collects tokens not attached to a flag.
pub(crate) const STRAY_ARGUMENTS_ID: &str = "__stray_arguments";

const HELP_TEMPLATE: &str = "{usage-heading} {usage}\n\n{about-with-newline}\n{all-args}{after-help}";

/// Builds the parser for one interface. Required options are listed first.
pub(crate) fn build_parser(
    settings: &InterfaceSettings,
    usage_line: String,
    usage_body: String,
    options: &[CliOption],
) -> Command {
    let mut parser = Command::new(settings.program_name.clone())
        .override_usage(usage_line)
        .about(usage_body)
        .help_template(HELP_TEMPLATE);

    parser = match &settings.version {
        Some(version) => parser.version(version.clone()),
        None => parser.disable_version_flag(true),
    };

    parser = parser.arg(
        Arg::new(STRAY_ARGUMENTS_ID)
            .num_args(1..)
            .action(ArgAction::Append)
            .value_parser(ValueParser::string())
            .hide(true),
    );

    let (required, optional): (Vec<&CliOption>, Vec<&CliOption>) =
        options.iter().partition(|option| option.required());

    parser
        .args(required.into_iter().map(CliOption::to_arg))
        .args(optional.into_iter().map(CliOption::to_arg))
}

/// Values read back from a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedArguments {
    /// One entry per option, in option order. Absent options hold their
    /// default, or [`Value::None`] without one.
    pub values: ValueMap,
    /// Tokens that were not attached to any option flag.
    pub positional: Vec<String>,
}

pub(crate) fn extract_values(matches: &ArgMatches, options: &[CliOption]) -> ParsedArguments {
    let values = options
        .iter()
        .map(|option| (option.name().to_string(), option_value(matches, option)))
        .collect();

    let positional = matches
        .get_many::<String>(STRAY_ARGUMENTS_ID)
        .map(|tokens| tokens.cloned().collect())
        .unwrap_or_default();

    ParsedArguments { values, positional }
}

fn option_value(matches: &ArgMatches, option: &CliOption) -> Value {
    if option.cli_action().is_flag() {
        return flag_value(matches, option);
    }

    match option.cli_type() {
        CliType::Float => read::<f64>(matches, option, Value::Float),
        CliType::Int => read::<i64>(matches, option, Value::Int),
        CliType::String | CliType::None => read::<String>(matches, option, Value::Str),
        CliType::ExistingFilepath
        | CliType::NewFilepath
        | CliType::ExistingDirpath
        | CliType::NewDirpath => read::<PathBuf>(matches, option, Value::Path),
    }
}

// The declared default wins over clap's implicit `false`/`true` unless the
// flag was actually given.
fn flag_value(matches: &ArgMatches, option: &CliOption) -> Value {
    let given = matches.get_flag(option.name());

    if matches.value_source(option.name()) == Some(ValueSource::CommandLine) {
        return Value::Bool(given);
    }

    option
        .default()
        .cloned()
        .unwrap_or(Value::Bool(given))
}

fn read<T>(matches: &ArgMatches, option: &CliOption, to_value: fn(T) -> Value) -> Value
where
    T: Any + Clone + Send + Sync + 'static,
{
    let parsed = match option.cli_action() {
        CliAction::Append => matches
            .get_many::<T>(option.name())
            .map(|values| Value::List(values.cloned().map(to_value).collect())),
        _ => matches.get_one::<T>(option.name()).cloned().map(to_value),
    };

    parsed
        .or_else(|| option.default().cloned())
        .unwrap_or(Value::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> InterfaceSettings {
        InterfaceSettings {
            program_name: "tool".to_string(),
            version: None,
            disallow_positional_arguments: true,
            help_on_no_arguments: true,
        }
    }

    fn options() -> Vec<CliOption> {
        vec![
            CliOption::builder()
                .name("count")
                .help("How many")
                .short_name(Some('c'))
                .cli_type(CliType::Int)
                .default(Value::Int(1))
                .build()
                .unwrap(),
            CliOption::builder()
                .name("tag")
                .help("Tags")
                .cli_type(CliType::String)
                .cli_action(CliAction::Append)
                .build()
                .unwrap(),
            CliOption::builder()
                .name("quiet")
                .help("Less output")
                .cli_action(CliAction::StoreFalse)
                .build()
                .unwrap(),
            CliOption::builder()
                .name("ratio")
                .help("A ratio")
                .cli_type(CliType::Float)
                .required(true)
                .build()
                .unwrap(),
        ]
    }

    fn parse(args: &[&str]) -> ParsedArguments {
        let options = options();
        let mut parser = build_parser(&settings(), "tool".to_string(), String::new(), &options);
        let matches = parser
            .try_get_matches_from_mut(std::iter::once("tool").chain(args.iter().copied()))
            .unwrap();
        extract_values(&matches, &options)
    }

    #[test]
    fn test_defaults_when_absent() {
        let parsed = parse(&[]);

        assert_eq!(parsed.values["count"], Value::Int(1));
        assert_eq!(parsed.values["tag"], Value::None);
        assert_eq!(parsed.values["quiet"], Value::Bool(true));
        assert_eq!(parsed.values["ratio"], Value::None);
        assert!(parsed.positional.is_empty());
    }

    #[test]
    fn test_typed_values() {
        let parsed = parse(&["-c", "3", "--ratio", "0.5", "--quiet", "--tag", "a", "--tag", "b"]);

        assert_eq!(parsed.values["count"], Value::Int(3));
        assert_eq!(parsed.values["ratio"], Value::Float(0.5));
        assert_eq!(parsed.values["quiet"], Value::Bool(false));
        assert_eq!(
            parsed.values["tag"],
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_values_follow_option_order() {
        let parsed = parse(&["--ratio", "2"]);
        let keys: Vec<&str> = parsed.values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["count", "tag", "quiet", "ratio"]);
    }

    #[test]
    fn test_stray_tokens_collected() {
        let parsed = parse(&["stray", "--ratio", "1.5"]);
        assert_eq!(parsed.positional, vec!["stray".to_string()]);
    }

    #[test]
    fn test_bad_int_is_rejected() {
        let options = options();
        let mut parser = build_parser(&settings(), "tool".to_string(), String::new(), &options);
        let error = parser
            .try_get_matches_from_mut(["tool", "--count", "many"])
            .unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_required_options_listed_first() {
        let parser = build_parser(&settings(), "tool".to_string(), String::new(), &options());
        let ids: Vec<&str> = parser
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .map(|arg| arg.get_id().as_str())
            .filter(|id| *id != "help")
            .collect();
        assert_eq!(ids, vec!["ratio", "count", "tag", "quiet"]);
    }
}
