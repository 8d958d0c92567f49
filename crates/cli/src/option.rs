//! Command-line options: the CLI projection of command parameters.
//!
//! A [`CliOption`] is either derived from a [`Parameter`] (inheriting its
//! help, default and requiredness) or declared directly for CLI-only flags
//! such as verbosity.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use clap::builder::ValueParser;
use clap::{value_parser, Arg, ArgAction};
use cmdface_core::error::{Error, Result};
use cmdface_core::parameter::Parameter;
use cmdface_core::value::Value;

use crate::config::{expand_path, REQUIRED_OPTIONS_HEADING};

const REQUIRED_MARKER: &str = "[REQUIRED]";

/// The scalar type an option's value is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliType {
    Float,
    Int,
    String,
    ExistingFilepath,
    NewFilepath,
    ExistingDirpath,
    NewDirpath,
    /// No dedicated type: flags, or values kept as plain strings.
    None,
}

impl CliType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CliType::Float => "float",
            CliType::Int => "int",
            CliType::String => "string",
            CliType::ExistingFilepath => "existing_filepath",
            CliType::NewFilepath => "new_filepath",
            CliType::ExistingDirpath => "existing_dirpath",
            CliType::NewDirpath => "new_dirpath",
            CliType::None => "none",
        }
    }

    pub(crate) fn value_parser(self) -> ValueParser {
        match self {
            CliType::Float => value_parser!(f64).into(),
            CliType::Int => value_parser!(i64).into(),
            CliType::String | CliType::None => ValueParser::string(),
            CliType::ExistingFilepath => ValueParser::new(parse_existing_filepath),
            CliType::NewFilepath => ValueParser::new(parse_new_filepath),
            CliType::ExistingDirpath => ValueParser::new(parse_existing_dirpath),
            CliType::NewDirpath => ValueParser::new(parse_new_dirpath),
        }
    }
}

impl Display for CliType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for CliType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "float" => Ok(CliType::Float),
            "int" => Ok(CliType::Int),
            "string" => Ok(CliType::String),
            "existing_filepath" => Ok(CliType::ExistingFilepath),
            "new_filepath" => Ok(CliType::NewFilepath),
            "existing_dirpath" => Ok(CliType::ExistingDirpath),
            "new_dirpath" => Ok(CliType::NewDirpath),
            "none" => Ok(CliType::None),
            _ => Err(Error::InvalidCliType(name.to_string())),
        }
    }
}

/// What the parser does when it sees an option's flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CliAction {
    #[default]
    Store,
    StoreTrue,
    StoreFalse,
    Append,
}

impl CliAction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CliAction::Store => "store",
            CliAction::StoreTrue => "store_true",
            CliAction::StoreFalse => "store_false",
            CliAction::Append => "append",
        }
    }

    /// Flag actions take no value on the command line.
    #[must_use]
    pub fn is_flag(&self) -> bool {
        matches!(self, CliAction::StoreTrue | CliAction::StoreFalse)
    }
}

impl Display for CliAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for CliAction {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "store" => Ok(CliAction::Store),
            "store_true" => Ok(CliAction::StoreTrue),
            "store_false" => Ok(CliAction::StoreFalse),
            "append" => Ok(CliAction::Append),
            _ => Err(Error::InvalidCliAction(name.to_string())),
        }
    }
}

/// Rejects flag actions paired with a value type.
pub(crate) fn validate_action_type(cli_type: CliType, cli_action: CliAction) -> Result<()> {
    if cli_action.is_flag() && cli_type != CliType::None {
        return Err(Error::ActionTypeMismatch {
            action: cli_action.to_string(),
            cli_type: cli_type.to_string(),
        });
    }
    Ok(())
}

fn parse_existing_filepath(raw: &str) -> std::result::Result<PathBuf, String> {
    let path = expand_path(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file does not exist: `{raw}`"))
    }
}

fn parse_existing_dirpath(raw: &str) -> std::result::Result<PathBuf, String> {
    let path = expand_path(raw);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("directory does not exist: `{raw}`"))
    }
}

fn parse_new_filepath(raw: &str) -> std::result::Result<PathBuf, String> {
    let path = expand_path(raw);
    if path.exists() {
        Err(format!("output file already exists: `{raw}`"))
    } else {
        Ok(path)
    }
}

fn parse_new_dirpath(raw: &str) -> std::result::Result<PathBuf, String> {
    let path = expand_path(raw);
    if path.exists() {
        Err(format!("output directory already exists: `{raw}`"))
    } else {
        Ok(path)
    }
}

/// A concrete command-line option.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOption {
    name: String,
    long_name: String,
    short_name: Option<char>,
    cli_type: CliType,
    cli_action: CliAction,
    help: String,
    required: bool,
    default: Option<Value>,
    default_description: Option<String>,
    parameter: Option<Parameter>,
}

impl CliOption {
    #[must_use]
    pub fn builder() -> CliOptionBuilder {
        <CliOptionBuilder as Default>::default()
    }

    /// Key the parsed value is stored under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    #[must_use]
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    #[must_use]
    pub fn cli_type(&self) -> CliType {
        self.cli_type
    }

    #[must_use]
    pub fn cli_action(&self) -> CliAction {
        self.cli_action
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Name of the parameter this option was derived from, or `None` for
    /// CLI-only options.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter.as_ref().map(Parameter::name)
    }

    /// Help text as shown to the user, with the required marker or the
    /// default description appended.
    #[must_use]
    pub fn help_text(&self) -> String {
        if self.required {
            if self.help.trim_end().ends_with(REQUIRED_MARKER) {
                self.help.clone()
            } else {
                format!("{} {REQUIRED_MARKER}", self.help)
            }
        } else {
            let description = match (&self.default_description, &self.default) {
                (Some(description), _) => description.clone(),
                (None, Some(default)) => default.to_string(),
                (None, None) => Value::None.to_string(),
            };
            format!("{} [default: {description}]", self.help)
        }
    }

    /// Placeholder shown after the flag for options that take a value.
    #[must_use]
    pub fn value_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Builds the parser argument for this option.
    ///
    /// Requiredness is only reflected in the help heading; the interface
    /// enforces it after parsing.
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .long(self.long_name.clone())
            .help(self.help_text());

        if let Some(short_name) = self.short_name {
            arg = arg.short(short_name);
        }

        arg = match self.cli_action {
            CliAction::StoreTrue => arg.action(ArgAction::SetTrue),
            CliAction::StoreFalse => arg.action(ArgAction::SetFalse),
            CliAction::Store => arg
                .action(ArgAction::Set)
                .value_parser(self.cli_type.value_parser())
                .value_name(self.value_name()),
            CliAction::Append => arg
                .action(ArgAction::Append)
                .value_parser(self.cli_type.value_parser())
                .value_name(self.value_name()),
        };

        // `-3` is a value here, not a short flag
        if matches!(self.cli_type, CliType::Int | CliType::Float) {
            arg = arg.allow_negative_numbers(true);
        }

        if self.required {
            arg = arg.help_heading(REQUIRED_OPTIONS_HEADING);
        }

        arg
    }
}

impl Display for CliOption {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self.short_name {
            Some(short_name) => write!(formatter, "-{short_name}/--{}", self.long_name),
            None => write!(formatter, "--{}", self.long_name),
        }
    }
}

/// Collects the pieces of a [`CliOption`]; see [`CliOptionBuilder::build`]
/// for how a source parameter fills in the gaps.
#[derive(Debug, Clone, Default)]
pub struct CliOptionBuilder {
    parameter: Option<Parameter>,
    name: Option<String>,
    long_name: Option<String>,
    short_name: Option<char>,
    cli_type: Option<CliType>,
    cli_action: CliAction,
    help: Option<String>,
    required: bool,
    default: Option<Value>,
    default_description: Option<String>,
}

impl CliOptionBuilder {
    #[must_use]
    pub fn parameter(mut self, parameter: &Parameter) -> Self {
        self.parameter = Some(parameter.clone());
        self
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn long_name(mut self, long_name: &str) -> Self {
        self.long_name = Some(long_name.to_string());
        self
    }

    #[must_use]
    pub fn short_name(mut self, short_name: Option<char>) -> Self {
        self.short_name = short_name;
        self
    }

    #[must_use]
    pub fn cli_type(mut self, cli_type: CliType) -> Self {
        self.cli_type = Some(cli_type);
        self
    }

    #[must_use]
    pub fn cli_action(mut self, cli_action: CliAction) -> Self {
        self.cli_action = cli_action;
        self
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn default_description(mut self, description: &str) -> Self {
        self.default_description = Some(description.to_string());
        self
    }

    /// Builds the option.
    ///
    /// With a source parameter, unset name, help, default and default
    /// description come from the parameter. A required parameter always
    /// yields a required option; an optional parameter becomes required only
    /// when the builder asks for it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There is no parameter and the name or help is missing
    /// - The option ends up required with a default value
    /// - A flag action is combined with a value type
    /// - A flag is required (it always has a value, so it can never be missing)
    pub fn build(self) -> Result<CliOption> {
        let (name, help, default, default_description, required) = match &self.parameter {
            Some(parameter) => (
                self.name.unwrap_or_else(|| parameter.name().to_string()),
                self.help.unwrap_or_else(|| parameter.help().to_string()),
                self.default.or_else(|| parameter.default().cloned()),
                self.default_description
                    .or_else(|| parameter.default_description().map(str::to_string)),
                parameter.required() || self.required,
            ),
            None => (
                self.name.ok_or(Error::IncompleteOption("name"))?,
                self.help.ok_or(Error::IncompleteOption("help"))?,
                self.default,
                self.default_description,
                self.required,
            ),
        };

        if required {
            if let Some(default) = &default {
                return Err(Error::RequiredOptionWithDefault {
                    name,
                    default: default.to_string(),
                });
            }
        }

        if required && self.cli_action.is_flag() {
            return Err(Error::RequiredFlag(name));
        }

        let cli_type = self.cli_type.unwrap_or(CliType::None);
        validate_action_type(cli_type, self.cli_action)?;

        Ok(CliOption {
            long_name: self.long_name.unwrap_or_else(|| name.replace('_', "-")),
            name,
            short_name: self.short_name,
            cli_type,
            cli_action: self.cli_action,
            help,
            required,
            default,
            default_description,
            parameter: self.parameter,
        })
    }
}
