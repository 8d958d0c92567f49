use std::process::ExitCode;

use clap::Parser;
use log::debug;

use cmdface_cli::cli_args::Args;
use cmdface_cli::commands::{build_interface, command_listing, command_registry};
use cmdface_core::error::{Error, Result};

/// Exit status when a command's interface is wired incorrectly (EX_SOFTWARE).
const MISCONFIGURED_STATUS: u8 = 70;

fn failure_status(error: &Error) -> u8 {
    if error.is_configuration() {
        MISCONFIGURED_STATUS
    } else {
        1
    }
}

fn report_failure(error: &Error) -> ExitCode {
    if error.is_configuration() {
        eprintln!("Interface misconfigured: {error}");
    } else {
        eprintln!("{error}");
    }
    ExitCode::from(failure_status(error))
}

fn print_commands() {
    println!("Available commands:");
    for line in command_listing(&command_registry()) {
        println!("  {line}");
    }
}

fn execute() -> Result<i32> {
    let args = Args::parse();
    let registry = command_registry();

    let Some(command_name) = args.command_name() else {
        print_commands();
        // Listing on request is a success; listing because nothing was asked for is not
        return Ok(if args.list { 0 } else { 1 });
    };

    if args.list {
        print_commands();
        return Ok(0);
    }

    debug!("Selected command: `{command_name}`");
    let interface = build_interface(&registry, command_name)?;
    interface.invoke(args.command_arguments())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        // Statuses outside 0-255 (e.g. -1 after printing usage) wrap like a shell would
        Ok(status) => ExitCode::from(u8::try_from(status & 0xff).unwrap_or(1)),
        Err(e) => report_failure(&e),
    }
}
