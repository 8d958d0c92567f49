//! `word-count`: counts the words of a text file.

use std::cmp::Reverse;
use std::fs;

use indexmap::IndexMap;
use itertools::Itertools;

use cmdface_core::command::Command;
use cmdface_core::error::{Error, Result};
use cmdface_core::interface::UsageExample;
use cmdface_core::parameter::Parameter;
use cmdface_core::value::{DataType, Value, ValueMap};

use crate::config::InterfaceSettings;
use crate::conversion::ParameterConversion;
use crate::handlers::input::split_on_commas;
use crate::handlers::output::write_or_print_list_of_strings;
use crate::handlers::OutputHandler;
use crate::interface::CliInterface;
use crate::option::{CliAction, CliOption, CliType};

pub const NAME: &str = "word-count";

pub struct WordCount;

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Counts words in `text`, most frequent first, ties broken alphabetically.
fn count_words(text: &str, stop_words: &[String]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for word in text.split_whitespace().map(normalize) {
        if word.is_empty() || stop_words.contains(&word) {
            continue;
        }
        *counts.entry(word).or_default() += 1;
    }

    counts
        .into_iter()
        .sorted_by_key(|(word, count)| (Reverse(*count), word.clone()))
        .collect()
}

impl Command for WordCount {
    fn name(&self) -> &str {
        NAME
    }

    fn brief_description(&self) -> &str {
        "Count the words in a text file"
    }

    fn long_description(&self) -> &str {
        "Counts case-insensitive word occurrences in a text file, most frequent first. \
         Punctuation around words is ignored."
    }

    fn parameters(&self) -> Result<Vec<Parameter>> {
        Ok(vec![
            Parameter::builder("input_path", DataType::FilePath, "Text file to count")
                .required(true)
                .build()?,
            Parameter::builder("stop_words", DataType::StrList, "Words to leave out")
                .default(Value::List(Vec::new()))
                .default_description("none")
                .build()?,
            Parameter::builder("verbose", DataType::Bool, "Also print the total word count")
                .default(Value::Bool(false))
                .build()?,
        ])
    }

    fn run(&self, input: &ValueMap) -> Result<ValueMap> {
        let path = input
            .get("input_path")
            .and_then(Value::as_path)
            .ok_or_else(|| Error::command_failure(NAME, "no input path given"))?;

        let stop_words: Vec<String> = input
            .get("stop_words")
            .and_then(Value::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_str)
            .map(normalize)
            .collect();

        let text = fs::read_to_string(path)
            .map_err(|e| Error::io_error("input file", path.display().to_string(), e))?;

        let counts = count_words(&text, &stop_words);
        let total: usize = counts.iter().map(|(_, count)| count).sum();

        let mut results = ValueMap::new();
        results.insert(
            "counts".to_string(),
            Value::List(
                counts
                    .into_iter()
                    .map(|(word, count)| Value::Str(format!("{word}\t{count}")))
                    .collect(),
            ),
        );
        results.insert(
            "total".to_string(),
            Value::Int(i64::try_from(total).unwrap_or(i64::MAX)),
        );
        Ok(results)
    }
}

pub fn create() -> Box<dyn Command> {
    Box::new(WordCount)
}

fn print_total(_key: &str, value: &Value, verbose: &Value) -> Result<()> {
    if verbose.as_bool().unwrap_or_default() {
        println!("Total words: {value}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the interface wiring is invalid.
pub fn interface(command: Box<dyn Command>, settings: InterfaceSettings) -> Result<CliInterface> {
    let output_path = CliOption::builder()
        .name("output_path")
        .help("Write the counts to this file")
        .short_name(Some('o'))
        .cli_type(CliType::NewFilepath)
        .default_description("print to stdout")
        .build()?;

    CliInterface::builder(command)
        .settings(settings)
        .usage_example(UsageExample::new(
            "Basic",
            "Count the words in notes.txt",
            "{prog} -i notes.txt",
        ))
        .usage_example(UsageExample::new(
            "Stop words",
            "Leave out common words and save the counts",
            "{prog} -i notes.txt -s the,a,an -o counts.txt",
        ))
        .conversion(
            "input_path",
            ParameterConversion::new("input-path", CliType::ExistingFilepath)
                .with_short_name(Some('i')),
        )
        .conversion(
            "stop_words",
            ParameterConversion::new("stop-words", CliType::String)
                .with_action(CliAction::Append)
                .with_short_name(Some('s'))
                .with_in_handler(split_on_commas),
        )
        .additional_option(output_path)
        .output_handler(OutputHandler::with_option(
            "counts",
            "output_path",
            write_or_print_list_of_strings,
        ))
        .output_handler(OutputHandler::with_option("total", "verbose", print_total))
        .build()
}
