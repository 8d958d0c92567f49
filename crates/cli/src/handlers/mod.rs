//! Value transforms applied on the way into a command and side effects
//! applied to its results on the way out.
//!
//! - **Input handlers**: pure `Value -> Value` transforms registered on a
//!   [`crate::conversion::ParameterConversion`]
//! - **Output handlers**: functions bound to a result key, optionally fed the
//!   value of one option (typically an output path)

// Export public items from submodules
pub mod input;
pub mod output;

// Re-exports for convenience
pub use output::OutputHandler;
