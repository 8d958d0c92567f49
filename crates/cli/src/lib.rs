//! cmdface CLI Library
//!
//! This crate exposes cmdface commands on the command line. Each command's
//! parameters are turned into options through a conversion registry, the
//! resulting parser is built with `clap`, and the command's named results are
//! routed to output handlers.
//!
//! # Key Features
//!
//! - **Parameter Conversion**: Declarative mapping from parameters to typed options
//! - **Validated Wiring**: Duplicate bindings, missing conversions and bad flags fail at construction
//! - **Usage Text**: Generated usage lines, legend and rendered examples
//! - **Input Transforms**: Per-option value transforms applied after parsing
//! - **Output Handlers**: Print or write results, never overwriting existing files
//!
//! # Architecture
//!
//! - [`option`]: CLI types, actions and the options built from parameters
//! - [`conversion`]: Parameter conversions and their registry
//! - [`interface`]: The `CliInterface` and its invocation pipeline
//! - [`usage`]: Usage text assembly
//! - [`handlers`]: Built-in input transforms and output handlers
//! - [`commands`]: The commands shipped with the `cmdface` binary
//!
//! # Examples
//!
//! ```bash
//! # List the available commands
//! cmdface --list
//!
//! # Show a command's usage
//! cmdface word-count
//!
//! # Run it
//! cmdface word-count -i notes.txt -s the,a,an -v
//! ```

pub mod cli_args;
pub mod commands;
pub mod config;
pub mod conversion;
pub mod handlers;
pub mod interface;
pub mod option;
mod parser;
pub mod usage;
