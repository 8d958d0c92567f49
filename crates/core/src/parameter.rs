//! Declarative descriptions of the named values a command needs.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::value::{DataType, Value};

/// One named input of a [`crate::command::Command`].
///
/// A parameter is pure data: once built it is never mutated. Required
/// parameters never carry a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    data_type: DataType,
    help: String,
    required: bool,
    default: Option<Value>,
    default_description: Option<String>,
}

impl Parameter {
    /// Starts describing a parameter; finish with [`ParameterBuilder::build`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdface_core::parameter::Parameter;
    /// use cmdface_core::value::{DataType, Value};
    ///
    /// let times = Parameter::builder("times", DataType::Int, "How many times to repeat")
    ///     .default(Value::Int(1))
    ///     .build()?;
    /// assert!(!times.required());
    /// # Ok::<(), cmdface_core::error::Error>(())
    /// ```
    pub fn builder(name: &str, data_type: DataType, help: &str) -> ParameterBuilder {
        ParameterBuilder {
            name: name.to_string(),
            data_type,
            help: help.to_string(),
            required: false,
            default: None,
            default_description: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn default_description(&self) -> Option<&str> {
        self.default_description.as_deref()
    }
}

impl Display for Parameter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}` ({})", self.name, self.data_type)?;

        if self.required {
            formatter.write_str(" [required]")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    name: String,
    data_type: DataType,
    help: String,
    required: bool,
    default: Option<Value>,
    default_description: Option<String>,
}

impl ParameterBuilder {
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn default_description(mut self, description: &str) -> Self {
        self.default_description = Some(description.to_string());
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::RequiredParameterWithDefault`] if the parameter is
    /// required and also carries a default value.
    pub fn build(self) -> Result<Parameter> {
        if self.required {
            if let Some(default) = &self.default {
                return Err(Error::RequiredParameterWithDefault {
                    name: self.name,
                    default: default.to_string(),
                });
            }
        }

        Ok(Parameter {
            name: self.name,
            data_type: self.data_type,
            help: self.help,
            required: self.required,
            default: self.default,
            default_description: self.default_description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_parameter_without_default() {
        let parameter = Parameter::builder("input_path", DataType::FilePath, "The input file")
            .required(true)
            .build()
            .unwrap();

        assert_eq!(parameter.name(), "input_path");
        assert!(parameter.required());
        assert!(parameter.default().is_none());
    }

    #[test]
    fn test_required_parameter_with_default_fails() {
        let result = Parameter::builder("times", DataType::Int, "Repeat count")
            .required(true)
            .default(Value::Int(3))
            .build();

        assert!(matches!(
            result,
            Err(Error::RequiredParameterWithDefault { ref name, .. }) if name == "times"
        ));
    }

    #[test]
    fn test_optional_parameter_keeps_default_description() {
        let parameter = Parameter::builder("verbose", DataType::Bool, "Print more")
            .default(Value::Bool(false))
            .default_description("off")
            .build()
            .unwrap();

        assert_eq!(parameter.default(), Some(&Value::Bool(false)));
        assert_eq!(parameter.default_description(), Some("off"));
    }

    #[test]
    fn test_display() {
        let parameter = Parameter::builder("name", DataType::Str, "Who to greet")
            .required(true)
            .build()
            .unwrap();
        assert_eq!(format!("{parameter}"), "`name` (str) [required]");
    }
}
