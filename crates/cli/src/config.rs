//! Interface settings and fixed text for cmdface command lines.
//!
//! This module holds the per-interface switches, the legend and heading text
//! used in help output, and path expansion for path-typed option values.

use std::path::PathBuf;

/// Heading that groups required options in help output.
pub const REQUIRED_OPTIONS_HEADING: &str = "REQUIRED options";

/// Legend line explaining optional input markers.
pub const OPTIONAL_INPUT_LINE: &str = "[] indicates optional input (order unimportant)";
/// Legend line explaining required input markers.
pub const REQUIRED_INPUT_LINE: &str = "{} indicates required input (order unimportant)";

/// Status returned when usage is printed because no arguments were given.
pub const HELP_ON_EMPTY_STATUS: i32 = -1;

/// Template key replaced with the program name in usage examples.
pub const PROGRAM_NAME_KEY: &str = "prog";

/// Switches controlling how a [`crate::interface::CliInterface`] treats its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSettings {
    /// Name shown in usage lines and substituted for `{prog}` in examples.
    pub program_name: String,
    /// Printed by `--version` when set.
    pub version: Option<String>,
    /// Reject leftover tokens not attached to an option flag.
    pub disallow_positional_arguments: bool,
    /// Print usage and stop when invoked without arguments.
    pub help_on_no_arguments: bool,
}

impl Default for InterfaceSettings {
    fn default() -> Self {
        Self {
            program_name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            disallow_positional_arguments: true,
            help_on_no_arguments: true,
        }
    }
}

impl InterfaceSettings {
    #[must_use]
    pub fn with_program_name(program_name: &str) -> Self {
        Self {
            program_name: program_name.to_string(),
            ..Self::default()
        }
    }
}

/// Expands shell variables like `~` in a path given on the command line.
///
/// # Examples
///
/// ```
/// use cmdface_cli::config::expand_path;
///
/// let expanded = expand_path("~/data/input.txt");
/// assert!(!expanded.starts_with("~"));
/// ```
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}
