//! Output handlers and the built-in result writers.
//!
//! Writers that create files never overwrite: if the output path already
//! exists they fail before touching it.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use cmdface_core::error::{Error, Result};
use cmdface_core::value::Value;

use crate::config::expand_path;

type PlainFunction = dyn Fn(&str, &Value) -> Result<()>;
type OptionFunction = dyn Fn(&str, &Value, &Value) -> Result<()>;

enum HandlerFunction {
    Plain(Box<PlainFunction>),
    WithOption {
        option_name: String,
        function: Box<OptionFunction>,
    },
}

/// Routes one named command result to a side effect.
pub struct OutputHandler {
    result_key: String,
    function: HandlerFunction,
}

impl OutputHandler {
    /// Handler called with the result key and value.
    pub fn new(result_key: &str, function: impl Fn(&str, &Value) -> Result<()> + 'static) -> Self {
        Self {
            result_key: result_key.to_string(),
            function: HandlerFunction::Plain(Box::new(function)),
        }
    }

    /// Handler additionally called with the parsed value of `option_name`.
    pub fn with_option(
        result_key: &str,
        option_name: &str,
        function: impl Fn(&str, &Value, &Value) -> Result<()> + 'static,
    ) -> Self {
        Self {
            result_key: result_key.to_string(),
            function: HandlerFunction::WithOption {
                option_name: option_name.to_string(),
                function: Box::new(function),
            },
        }
    }

    #[must_use]
    pub fn result_key(&self) -> &str {
        &self.result_key
    }

    #[must_use]
    pub fn option_name(&self) -> Option<&str> {
        match &self.function {
            HandlerFunction::Plain(_) => None,
            HandlerFunction::WithOption { option_name, .. } => Some(option_name),
        }
    }

    pub(crate) fn dispatch(&self, value: &Value, option_value: Option<&Value>) -> Result<()> {
        match (&self.function, option_value) {
            (HandlerFunction::Plain(function), _) => function(&self.result_key, value),
            (HandlerFunction::WithOption { function, .. }, Some(option_value)) => {
                function(&self.result_key, value, option_value)
            }
            (HandlerFunction::WithOption { option_name, .. }, None) => {
                Err(Error::MissingOptionValue {
                    result_key: self.result_key.clone(),
                    option_name: option_name.clone(),
                })
            }
        }
    }
}

impl std::fmt::Debug for OutputHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputHandler")
            .field("result_key", &self.result_key)
            .field("option_name", &self.option_name())
            .finish_non_exhaustive()
    }
}

fn output_path(key: &str, option_value: &Value) -> Result<PathBuf> {
    match option_value {
        Value::Path(path) => Ok(path.clone()),
        Value::Str(s) => Ok(expand_path(s)),
        _ => Err(Error::NoOutputPath(key.to_string())),
    }
}

fn create_new_file(path: &Path) -> Result<File> {
    let display = path.display().to_string();

    if path.exists() {
        return Err(Error::OutputPathExists(display));
    }

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                Error::OutputPathExists(display.clone())
            } else {
                Error::io_error("output file", display.clone(), e)
            }
        })
}

fn string_lines(key: &str, value: &Value) -> Result<Vec<String>> {
    value
        .as_list()
        .map(|items| items.iter().map(ToString::to_string).collect())
        .ok_or_else(|| Error::UnexpectedResultShape {
            key: key.to_string(),
            expected: "a list",
        })
}

/// Prints the value to standard output.
///
/// # Errors
///
/// Never fails; the signature matches [`OutputHandler::new`].
pub fn print_value(_key: &str, value: &Value) -> Result<()> {
    println!("{value}");
    Ok(())
}

/// Prints each item of a list result on its own line.
///
/// # Errors
///
/// Returns [`Error::UnexpectedResultShape`] if the value is not a list.
pub fn print_list_of_strings(key: &str, value: &Value) -> Result<()> {
    for line in string_lines(key, value)? {
        println!("{line}");
    }
    Ok(())
}

/// Writes the value to a new file at the path given by the bound option.
///
/// # Errors
///
/// Returns an error if no path was given, the path already exists, or the
/// write fails.
pub fn write_string(key: &str, value: &Value, option_value: &Value) -> Result<()> {
    let path = output_path(key, option_value)?;
    let mut file = create_new_file(&path)?;
    debug!("Writing `{key}` to `{}`", path.display());

    write!(file, "{value}")
        .map_err(|e| Error::io_error("output file", path.display().to_string(), e))
}

/// Writes each item of a list result on its own line to a new file.
///
/// # Errors
///
/// Returns an error if the value is not a list, no path was given, the path
/// already exists, or the write fails.
pub fn write_list_of_strings(key: &str, value: &Value, option_value: &Value) -> Result<()> {
    let lines = string_lines(key, value)?;
    let path = output_path(key, option_value)?;
    let mut file = create_new_file(&path)?;
    debug!("Writing {} lines of `{key}` to `{}`", lines.len(), path.display());

    for line in lines {
        writeln!(file, "{line}")
            .map_err(|e| Error::io_error("output file", path.display().to_string(), e))?;
    }
    Ok(())
}

/// Serializes the value as YAML into a new file.
///
/// # Errors
///
/// Returns an error if no path was given, the path already exists, or
/// serialization fails.
pub fn write_yaml(key: &str, value: &Value, option_value: &Value) -> Result<()> {
    let path = output_path(key, option_value)?;
    let file = create_new_file(&path)?;
    debug!("Writing `{key}` as YAML to `{}`", path.display());

    serde_yaml::to_writer(file, value).map_err(|e| Error::yaml_error(key, e))
}

/// Writes to the bound output path when one was given, prints otherwise.
///
/// # Errors
///
/// See [`write_string`].
pub fn write_or_print_string(key: &str, value: &Value, option_value: &Value) -> Result<()> {
    if option_value.is_none() {
        print_value(key, value)
    } else {
        write_string(key, value, option_value)
    }
}

/// List flavour of [`write_or_print_string`].
///
/// # Errors
///
/// See [`write_list_of_strings`].
pub fn write_or_print_list_of_strings(
    key: &str,
    value: &Value,
    option_value: &Value,
) -> Result<()> {
    if option_value.is_none() {
        print_list_of_strings(key, value)
    } else {
        write_list_of_strings(key, value, option_value)
    }
}
