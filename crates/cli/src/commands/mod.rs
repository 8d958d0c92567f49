//! The commands shipped with the `cmdface` binary and their interfaces.

use cmdface_core::command::CommandRegistry;
use cmdface_core::error::{Error, Result};

use crate::config::InterfaceSettings;
use crate::interface::CliInterface;

pub mod greet;
pub mod word_count;

/// Name of the binary, used as the prefix of every command's program name.
pub const PROGRAM_NAME: &str = "cmdface";

/// Every command the binary knows about.
#[must_use]
pub fn command_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register(greet::NAME, greet::create)
        .register(word_count::NAME, word_count::create);
    registry
}

/// Builds the command-line interface of the command registered as `name`.
///
/// # Errors
///
/// Returns an error if no such command exists or its interface is invalid.
pub fn build_interface(registry: &CommandRegistry, name: &str) -> Result<CliInterface> {
    let command = registry.create(name)?;
    let command_name = command.name().to_string();
    let settings = InterfaceSettings::with_program_name(&format!("{PROGRAM_NAME} {command_name}"));

    match command_name.as_str() {
        greet::NAME => greet::interface(command, settings),
        word_count::NAME => word_count::interface(command, settings),
        _ => Err(Error::CommandNotFound(name.to_string())),
    }
}

/// One line per command: name and brief description, alphabetically.
#[must_use]
pub fn command_listing(registry: &CommandRegistry) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| {
            registry
                .create(name)
                .ok()
                .map(|command| format!("{name:<12} {}", command.brief_description()))
        })
        .collect()
}
