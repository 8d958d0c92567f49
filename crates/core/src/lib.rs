//! cmdface Core Library
//!
//! This crate provides the front-end independent pieces of cmdface, a
//! framework for exposing reusable commands (units of business logic with
//! named parameters and named results) through interfaces such as a
//! command line.
//!
//! # Key Features
//!
//! - **Parameters**: Declarative, validated descriptions of command inputs
//! - **Commands**: A trait for business logic that maps named values to named results
//! - **Interfaces**: A trait front-ends implement to parse input and dispatch output
//! - **Command Registry**: A statically built name to factory lookup
//! - **Error Handling**: One error type separating wiring mistakes from runtime failures
//!
//! # Examples
//!
//! Declaring the parameters of a command:
//!
//! ```
//! use cmdface_core::parameter::Parameter;
//! use cmdface_core::value::{DataType, Value};
//!
//! let parameters = vec![
//!     Parameter::builder("input_path", DataType::FilePath, "File to read")
//!         .required(true)
//!         .build()?,
//!     Parameter::builder("verbose", DataType::Bool, "Print progress")
//!         .default(Value::Bool(false))
//!         .build()?,
//! ];
//! assert_eq!(parameters.len(), 2);
//! # Ok::<(), cmdface_core::error::Error>(())
//! ```

pub mod command;
pub mod error;
pub mod interface;
pub mod parameter;
pub mod value;
