//! The command-line front-end for a [`Command`].
//!
//! A [`CliInterface`] is assembled once from a command, a set of parameter
//! conversions, usage examples and output handlers. Construction validates
//! the whole wiring; a built interface only fails at runtime on user input
//! or on a command/handler mismatch.

use std::collections::HashSet;

use clap::error::ErrorKind;
use indexmap::IndexMap;
use log::{debug, info, warn};

use cmdface_core::command::Command;
use cmdface_core::error::{Error, Result};
use cmdface_core::interface::{
    validate_parameter_bindings, validate_usage_examples, Flow, Interface, UsageExample,
};
use cmdface_core::value::{Value, ValueMap};

use crate::config::{InterfaceSettings, HELP_ON_EMPTY_STATUS};
use crate::conversion::{ConversionRegistry, ParameterConversion};
use crate::handlers::OutputHandler;
use crate::option::CliOption;
use crate::parser::{build_parser, extract_values, STRAY_ARGUMENTS_ID};
use crate::usage::{render_examples, usage_body, usage_line, usage_text};

const RESERVED_LONG_FLAGS: [&str; 3] = ["help", "version", STRAY_ARGUMENTS_ID];
const RESERVED_SHORT_FLAGS: [char; 2] = ['h', 'V'];

/// Result of parsing one argument list.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Parsed, validated and transformed values, keyed by option name.
    Proceed(ValueMap),
    /// A usage error, or a help/version request, already formatted by clap.
    Exit(clap::Error),
    /// No arguments were given; show this text and stop.
    ShowUsage(String),
}

/// Exposes one [`Command`] as a command line.
pub struct CliInterface {
    command: Box<dyn Command>,
    settings: InterfaceSettings,
    conversions: ConversionRegistry,
    options: Vec<CliOption>,
    usage_examples: Vec<UsageExample>,
    output_handlers: IndexMap<String, OutputHandler>,
}

impl CliInterface {
    #[must_use]
    pub fn builder(command: Box<dyn Command>) -> CliInterfaceBuilder {
        CliInterfaceBuilder::new(command)
    }

    #[must_use]
    pub fn settings(&self) -> &InterfaceSettings {
        &self.settings
    }

    /// Options in declaration order: parameter-derived first, then
    /// standalone ones.
    #[must_use]
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    /// Usage examples with `{prog}` already rendered.
    #[must_use]
    pub fn usage_examples(&self) -> &[UsageExample] {
        &self.usage_examples
    }

    fn required_options(&self) -> impl Iterator<Item = &CliOption> {
        self.options.iter().filter(|option| option.required())
    }

    #[must_use]
    pub fn usage_line(&self) -> String {
        usage_line(&self.settings.program_name, self.required_options())
    }

    #[must_use]
    pub fn usage_text(&self) -> String {
        usage_text(
            &self.settings.program_name,
            self.required_options(),
            self.command.long_description(),
            &self.usage_examples,
        )
    }

    fn parser(&self) -> clap::Command {
        build_parser(
            &self.settings,
            self.usage_line(),
            usage_body(
                &self.settings.program_name,
                self.command.long_description(),
                &self.usage_examples,
            ),
            &self.options,
        )
    }

    /// Parses and validates `args` (without the program name).
    ///
    /// Required options are checked here rather than by clap so every
    /// missing option is reported the same way. Input transforms run last,
    /// in conversion registry order.
    ///
    /// # Errors
    ///
    /// User mistakes are returned as [`ParseOutcome::Exit`]; this only fails
    /// if the interface itself is inconsistent.
    pub fn parse_arguments(&self, args: &[String]) -> Result<ParseOutcome> {
        if args.is_empty() && self.settings.help_on_no_arguments {
            debug!("No arguments given, showing usage");
            return Ok(ParseOutcome::ShowUsage(format!("Usage: {}", self.usage_text())));
        }

        let mut parser = self.parser();
        let argv = std::iter::once(self.settings.program_name.as_str())
            .chain(args.iter().map(String::as_str));

        let matches = match parser.try_get_matches_from_mut(argv) {
            Ok(matches) => matches,
            Err(e) => return Ok(ParseOutcome::Exit(e)),
        };
        let mut parsed = extract_values(&matches, &self.options);

        if let Some(first) = parsed.positional.first() {
            if self.settings.disallow_positional_arguments {
                return Ok(ParseOutcome::Exit(parser.error(
                    ErrorKind::UnknownArgument,
                    format!(
                        "Positional argument detected: {first}\n \
                         Be sure all parameters are identified by their option name.\n \
                         (e.g.: include the '-i' in '-i INPUT_DIR')"
                    ),
                )));
            }
            warn!("Ignoring positional arguments: {:?}", parsed.positional);
        }

        for option in self.required_options() {
            if parsed
                .values
                .get(option.name())
                .map_or(true, Value::is_none)
            {
                return Ok(ParseOutcome::Exit(parser.error(
                    ErrorKind::MissingRequiredArgument,
                    format!("Required option --{} omitted.", option.long_name()),
                )));
            }
        }

        for (parameter_name, conversion) in self.conversions.iter() {
            let Some(in_handler) = conversion.in_handler() else {
                continue;
            };
            let Some(option) = self
                .options
                .iter()
                .find(|option| option.parameter_name() == Some(parameter_name))
            else {
                continue;
            };
            let Some(value) = parsed.values.get_mut(option.name()) else {
                continue;
            };
            if value.is_none() {
                continue;
            }

            debug!("Applying input transform to `{}`", option.name());
            match in_handler(std::mem::take(value)) {
                Ok(transformed) => *value = transformed,
                Err(message) => {
                    return Ok(ParseOutcome::Exit(parser.error(
                        ErrorKind::ValueValidation,
                        format!("Invalid value for {option}: {message}"),
                    )));
                }
            }
        }

        Ok(ParseOutcome::Proceed(parsed.values))
    }

    /// Runs the full pipeline for `args` (without the program name) and
    /// returns the process status.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or its results do not match
    /// the declared output handlers.
    pub fn invoke(&self, args: &[String]) -> Result<i32> {
        self.call(args)
    }

    fn option_value<'a>(&self, option_name: &str, input: &'a ValueMap) -> Option<&'a Value> {
        find_option(&self.options, option_name).and_then(|option| input.get(option.name()))
    }
}

/// Looks an option up by name, then by long name.
fn find_option<'a>(options: &'a [CliOption], option_name: &str) -> Option<&'a CliOption> {
    options
        .iter()
        .find(|option| option.name() == option_name)
        .or_else(|| {
            options
                .iter()
                .find(|option| option.long_name() == option_name)
        })
}

impl Interface for CliInterface {
    type Input = [String];

    fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    fn handle_input(&self, input: &[String]) -> Result<Flow> {
        match self.parse_arguments(input)? {
            ParseOutcome::Proceed(values) => Ok(Flow::Continue(values)),
            ParseOutcome::ShowUsage(text) => {
                println!("{text}");
                Ok(Flow::Exit(HELP_ON_EMPTY_STATUS))
            }
            ParseOutcome::Exit(e) => {
                e.print()?;
                Ok(Flow::Exit(e.exit_code()))
            }
        }
    }

    fn handle_output(&self, input: &ValueMap, results: &ValueMap) -> Result<()> {
        for (result_key, handler) in &self.output_handlers {
            let value = results
                .get(result_key)
                .ok_or_else(|| Error::MissingResult(result_key.clone()))?;

            let option_value = match handler.option_name() {
                Some(option_name) => Some(self.option_value(option_name, input).ok_or_else(
                    || Error::MissingOptionValue {
                        result_key: result_key.clone(),
                        option_name: option_name.to_string(),
                    },
                )?),
                None => None,
            };

            info!("Dispatching result `{result_key}`");
            handler.dispatch(value, option_value)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for CliInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliInterface")
            .field("command", &self.command.name())
            .field("settings", &self.settings)
            .field("options", &self.options)
            .field("output_handlers", &self.output_handlers)
            .finish_non_exhaustive()
    }
}

/// Collects the wiring of a [`CliInterface`].
pub struct CliInterfaceBuilder {
    command: Box<dyn Command>,
    settings: InterfaceSettings,
    usage_examples: Vec<UsageExample>,
    conversions: Vec<(String, ParameterConversion)>,
    additional_options: Vec<CliOption>,
    output_handlers: IndexMap<String, OutputHandler>,
}

impl CliInterfaceBuilder {
    #[must_use]
    pub fn new(command: Box<dyn Command>) -> Self {
        let settings = InterfaceSettings::with_program_name(command.name());
        Self {
            command,
            settings,
            usage_examples: Vec::new(),
            conversions: Vec::new(),
            additional_options: Vec::new(),
            output_handlers: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn settings(mut self, settings: InterfaceSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn usage_example(mut self, example: UsageExample) -> Self {
        self.usage_examples.push(example);
        self
    }

    #[must_use]
    pub fn usage_examples(mut self, examples: impl IntoIterator<Item = UsageExample>) -> Self {
        self.usage_examples.extend(examples);
        self
    }

    /// Declares how the parameter `parameter_name` becomes an option.
    #[must_use]
    pub fn conversion(mut self, parameter_name: &str, conversion: ParameterConversion) -> Self {
        self.conversions
            .push((parameter_name.to_string(), conversion));
        self
    }

    /// Adds an option that is not produced by a conversion.
    #[must_use]
    pub fn additional_option(mut self, option: CliOption) -> Self {
        self.additional_options.push(option);
        self
    }

    /// Registers `handler` for its result key, replacing any earlier one.
    #[must_use]
    pub fn output_handler(mut self, handler: OutputHandler) -> Self {
        let result_key = handler.result_key().to_string();
        if self.output_handlers.insert(result_key.clone(), handler).is_some() {
            warn!("Replacing output handler for `{result_key}`");
        }
        self
    }

    /// Validates the wiring and builds the interface.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no usage examples, or one is not a valid template
    /// - A command parameter has no conversion
    /// - An option is invalid (e.g. required with a default)
    /// - Two options bind the same parameter
    /// - Two options share a name or a flag, or an option uses a reserved flag
    /// - An output handler is bound to an option the interface does not define
    pub fn build(self) -> Result<CliInterface> {
        validate_usage_examples(&self.usage_examples)?;
        let usage_examples = render_examples(&self.usage_examples, &self.settings.program_name)?;

        let mut conversions = ConversionRegistry::new();
        conversions.extend(self.conversions);

        let parameters = self.command.parameters()?;
        let mut options = conversions.options_for(&parameters)?;
        options.extend(self.additional_options);

        validate_parameter_bindings(options.iter().map(CliOption::parameter_name))?;
        validate_flags(&options)?;
        validate_handler_options(&self.output_handlers, &options)?;

        debug!(
            "Built interface for `{}` with {} options",
            self.command.name(),
            options.len()
        );

        Ok(CliInterface {
            command: self.command,
            settings: self.settings,
            conversions,
            options,
            usage_examples,
            output_handlers: self.output_handlers,
        })
    }
}

fn validate_flags(options: &[CliOption]) -> Result<()> {
    let mut names = HashSet::new();
    let mut long_names = HashSet::new();
    let mut short_names = HashSet::new();

    for option in options {
        if RESERVED_LONG_FLAGS.contains(&option.name()) {
            return Err(Error::ReservedFlag(option.name().to_string()));
        }
        if RESERVED_LONG_FLAGS.contains(&option.long_name()) {
            return Err(Error::ReservedFlag(format!("--{}", option.long_name())));
        }
        if !names.insert(option.name()) {
            return Err(Error::DuplicateOptionName(option.name().to_string()));
        }
        if !long_names.insert(option.long_name()) {
            return Err(Error::DuplicateFlag(format!("--{}", option.long_name())));
        }
        if let Some(short_name) = option.short_name() {
            if RESERVED_SHORT_FLAGS.contains(&short_name) {
                return Err(Error::ReservedFlag(format!("-{short_name}")));
            }
            if !short_names.insert(short_name) {
                return Err(Error::DuplicateFlag(format!("-{short_name}")));
            }
        }
    }

    Ok(())
}

fn validate_handler_options(
    handlers: &IndexMap<String, OutputHandler>,
    options: &[CliOption],
) -> Result<()> {
    for (result_key, handler) in handlers {
        if let Some(option_name) = handler.option_name() {
            if find_option(options, option_name).is_none() {
                return Err(Error::UnknownHandlerOption {
                    result_key: result_key.clone(),
                    option_name: option_name.to_string(),
                });
            }
        }
    }
    Ok(())
}
