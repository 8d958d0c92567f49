//! Usage text assembly.
//!
//! Everything here is a pure function of the interface configuration: the
//! same options, description and examples always render the same text.

use std::collections::HashMap;

use itertools::Itertools;
use leon::Template;

use cmdface_core::error::Result;
use cmdface_core::interface::UsageExample;

use crate::config::{OPTIONAL_INPUT_LINE, PROGRAM_NAME_KEY, REQUIRED_INPUT_LINE};
use crate::option::CliOption;

/// Renders the `{prog}` placeholder in each example invocation.
///
/// # Errors
///
/// Returns an error if an example is not a valid template or uses an unknown
/// placeholder.
pub fn render_examples(examples: &[UsageExample], program_name: &str) -> Result<Vec<UsageExample>> {
    let context: HashMap<String, String> =
        HashMap::from([(PROGRAM_NAME_KEY.to_string(), program_name.to_string())]);

    examples
        .iter()
        .map(|example| -> Result<UsageExample> {
            let template = Template::parse(&example.example)?;
            Ok(UsageExample {
                example: template.render(&context)?,
                ..example.clone()
            })
        })
        .collect()
}

/// First usage line: the program name followed by the required options.
#[must_use]
pub fn usage_line<'a>(
    program_name: &str,
    required_options: impl IntoIterator<Item = &'a CliOption>,
) -> String {
    let required = required_options
        .into_iter()
        .map(|option| format!("{option} {}", option.value_name()))
        .join(" ");

    if required.is_empty() {
        format!("{program_name} [options]")
    } else {
        format!("{program_name} [options] {{{required}}}")
    }
}

fn format_example(example: &UsageExample) -> String {
    let short_description = example.short_description.trim_matches(':').trim();
    let long_description = example.long_description.trim_matches(':').trim();
    let invocation = example.example.trim();

    if short_description.is_empty() {
        format!("{long_description}\n  {invocation}")
    } else {
        format!("{short_description}: {long_description}\n  {invocation}")
    }
}

/// Everything after the usage line: legend, description and examples.
#[must_use]
pub fn usage_body(program_name: &str, long_description: &str, examples: &[UsageExample]) -> String {
    let formatted_examples = examples.iter().map(format_example).join("\n\n");

    [
        OPTIONAL_INPUT_LINE.to_string(),
        REQUIRED_INPUT_LINE.to_string(),
        String::new(),
        long_description.trim().to_string(),
        String::new(),
        "Example usage:".to_string(),
        "Print help message and exit".to_string(),
        format!("  {program_name} -h"),
        String::new(),
        formatted_examples,
    ]
    .join("\n")
}

/// The complete usage text.
#[must_use]
pub fn usage_text<'a>(
    program_name: &str,
    required_options: impl IntoIterator<Item = &'a CliOption>,
    long_description: &str,
    examples: &[UsageExample],
) -> String {
    format!(
        "{}\n\n{}",
        usage_line(program_name, required_options),
        usage_body(program_name, long_description, examples)
    )
}
