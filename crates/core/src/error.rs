use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Found required parameter `{}` with default value `{}`. Required parameters cannot have default values.", .name, .default)]
    RequiredParameterWithDefault { name: String, default: String },

    #[error("Found required option `{}` with default value `{}`. Required options cannot have default values.", .name, .default)]
    RequiredOptionWithDefault { name: String, default: String },

    #[error("Must specify a {} for the option since it doesn't have a parameter.", .0)]
    IncompleteOption(&'static str),

    #[error("Invalid CLI type specified: `{}`", .0)]
    InvalidCliType(String),

    #[error("Invalid CLI action specified: `{}`", .0)]
    InvalidCliAction(String),

    #[error("CLI action `{}` takes no value, so its CLI type must be `none` (found `{}`)", .action, .cli_type)]
    ActionTypeMismatch { action: String, cli_type: String },

    #[error("Invalid short name `{}`: a short name is a single character", .0)]
    InvalidShortName(String),

    #[error("Flag option `{}` cannot be required: it always has a value.", .0)]
    RequiredFlag(String),

    #[error("There are no usage examples associated with this command.")]
    NoUsageExamples,

    #[error("`{}` does not have parameter conversion info (parameter conversions are available for {})", .name, .available)]
    MissingConversion { name: String, available: String },

    #[error("Found more than one option mapping to the same parameter: `{}`", .0)]
    DuplicateParameterBinding(String),

    #[error("Found more than one option using the flag `{}`", .0)]
    DuplicateFlag(String),

    #[error("Found more than one option named `{}`", .0)]
    DuplicateOptionName(String),

    #[error("The flag `{}` is reserved and cannot be used by an option", .0)]
    ReservedFlag(String),

    #[error("Did not find the expected output `{}` in results.", .0)]
    MissingResult(String),

    #[error("Output handler for `{}` is bound to option `{}`, which was not parsed", .result_key, .option_name)]
    MissingOptionValue {
        result_key: String,
        option_name: String,
    },

    #[error("Output handler for `{}` is bound to option `{}`, which the interface does not define", .result_key, .option_name)]
    UnknownHandlerOption {
        result_key: String,
        option_name: String,
    },

    #[error("Output path `{}` already exists.", .0)]
    OutputPathExists(String),

    #[error("No output path was given for result `{}`", .0)]
    NoOutputPath(String),

    #[error("Result `{}` has an unexpected shape: expected {}", .key, .expected)]
    UnexpectedResultShape { key: String, expected: &'static str },

    #[error("Unknown command: `{}`", .0)]
    CommandNotFound(String),

    #[error("Command `{}` failed: {}", .command, .message)]
    Command { command: String, message: String },

    #[error("IO error with {} at path `{}`: {}", .description, .path, .original)]
    Io {
        description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Error serializing `{}` to YAML: {}", .key, .original)]
    Yaml {
        key: String,
        original: serde_yaml::Error,
    },

    #[error("Error parsing usage example template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering usage example template: {}", .0)]
    Render(#[from] RenderError),
}

impl Error {
    pub fn command_failure(command: &str, message: impl Into<String>) -> Self {
        Self::Command {
            command: command.to_string(),
            message: message.into(),
        }
    }

    pub fn io_error(description: &str, path: String, original: std::io::Error) -> Self {
        Self::Io {
            description: description.to_string(),
            path,
            original,
        }
    }

    pub fn yaml_error(key: &str, original: serde_yaml::Error) -> Self {
        Self::Yaml {
            key: key.to_string(),
            original,
        }
    }

    /// Whether this error means the command or its interface was wired
    /// incorrectly, as opposed to a runtime failure.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::RequiredParameterWithDefault { .. }
                | Self::RequiredOptionWithDefault { .. }
                | Self::IncompleteOption(_)
                | Self::InvalidCliType(_)
                | Self::InvalidCliAction(_)
                | Self::ActionTypeMismatch { .. }
                | Self::InvalidShortName(_)
                | Self::RequiredFlag(_)
                | Self::NoUsageExamples
                | Self::MissingConversion { .. }
                | Self::DuplicateParameterBinding(_)
                | Self::DuplicateFlag(_)
                | Self::DuplicateOptionName(_)
                | Self::ReservedFlag(_)
                | Self::MissingResult(_)
                | Self::MissingOptionValue { .. }
                | Self::UnknownHandlerOption { .. }
                | Self::Parse(_)
                | Self::Render(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(Error::NoUsageExamples.is_configuration());
        assert!(Error::MissingResult("out".to_string()).is_configuration());
        assert!(!Error::OutputPathExists("/tmp/x".to_string()).is_configuration());
        assert!(!Error::command_failure("greet", "boom").is_configuration());
    }

    #[test]
    fn test_missing_conversion_lists_available_keys() {
        let error = Error::MissingConversion {
            name: "input_path".to_string(),
            available: "verbose output_path".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("`input_path`"));
        assert!(message.contains("verbose output_path"));
    }
}
