//! Command-line arguments of the `cmdface` binary.
//!
//! Only the command name is interpreted here; everything after it is handed
//! untouched to that command's interface.

use clap::Parser;

/// Command-line arguments for the cmdface CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use cmdface_cli::cli_args::Args;
///
/// let args = Args::parse_from(["cmdface", "greet", "--name", "Ada"]);
/// assert_eq!(args.command_name(), Some("greet"));
/// assert_eq!(args.command_arguments(), ["--name", "Ada"]);
/// ```
#[derive(Parser, Debug)]
#[command(name = "cmdface", version, about = "Run a registered command")]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// List the available commands and exit.
    #[arg(long, short = 'l', action)]
    pub list: bool,

    /// The command to run, followed by its own options.
    ///
    /// # Examples
    /// ```bash
    /// cmdface word-count -i notes.txt -s the,a
    /// ```
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command_line: Vec<String>,
}

impl Args {
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.command_line.first().map(String::as_str)
    }

    /// Arguments meant for the selected command's interface.
    #[must_use]
    pub fn command_arguments(&self) -> &[String] {
        self.command_line.get(1..).unwrap_or_default()
    }
}
