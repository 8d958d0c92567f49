//! Rules for turning command parameters into command-line options.

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use cmdface_core::error::{Error, Result};
use cmdface_core::parameter::Parameter;
use cmdface_core::value::Value;

use crate::option::{validate_action_type, CliAction, CliOption, CliType};

/// Transform applied to a parsed value before the command sees it. An `Err`
/// carries a message for the user.
pub type InHandler = fn(Value) -> std::result::Result<Value, String>;

/// How one parameter becomes an option.
#[derive(Debug, Clone)]
pub struct ParameterConversion {
    long_name: String,
    cli_type: CliType,
    cli_action: CliAction,
    short_name: Option<char>,
    in_handler: Option<InHandler>,
    required: bool,
}

impl ParameterConversion {
    #[must_use]
    pub fn new(long_name: &str, cli_type: CliType) -> Self {
        Self {
            long_name: long_name.to_string(),
            cli_type,
            cli_action: CliAction::default(),
            short_name: None,
            in_handler: None,
            required: false,
        }
    }

    /// Builds a conversion from type and action names, as found in
    /// hand-written interface declarations.
    ///
    /// # Errors
    ///
    /// Returns an error if the type or action name is unknown, the short
    /// name is not a single character, or a flag action is given a value type.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdface_cli::conversion::ParameterConversion;
    ///
    /// let conversion = ParameterConversion::parse("input-path", "existing_filepath", None, Some("i"))?;
    /// assert_eq!(conversion.short_name(), Some('i'));
    ///
    /// assert!(ParameterConversion::parse("input-path", "bytes", None, None).is_err());
    /// # Ok::<(), cmdface_core::error::Error>(())
    /// ```
    pub fn parse(
        long_name: &str,
        cli_type: &str,
        cli_action: Option<&str>,
        short_name: Option<&str>,
    ) -> Result<Self> {
        let cli_type = cli_type.parse::<CliType>()?;
        let cli_action = match cli_action {
            Some(action) => action.parse::<CliAction>()?,
            None => CliAction::default(),
        };
        validate_action_type(cli_type, cli_action)?;

        let short_name = match short_name {
            Some(short) => {
                let mut chars = short.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => return Err(Error::InvalidShortName(short.to_string())),
                }
            }
            None => None,
        };

        Ok(Self::new(long_name, cli_type)
            .with_action(cli_action)
            .with_short_name(short_name))
    }

    #[must_use]
    pub fn with_action(mut self, cli_action: CliAction) -> Self {
        self.cli_action = cli_action;
        self
    }

    #[must_use]
    pub fn with_short_name(mut self, short_name: Option<char>) -> Self {
        self.short_name = short_name;
        self
    }

    #[must_use]
    pub fn with_in_handler(mut self, in_handler: InHandler) -> Self {
        self.in_handler = Some(in_handler);
        self
    }

    /// Forces the option to be required even if the parameter is optional.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    #[must_use]
    pub fn cli_type(&self) -> CliType {
        self.cli_type
    }

    #[must_use]
    pub fn cli_action(&self) -> CliAction {
        self.cli_action
    }

    #[must_use]
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    #[must_use]
    pub fn in_handler(&self) -> Option<InHandler> {
        self.in_handler
    }

    /// Promotes `parameter` to an option using this conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting option is invalid.
    pub fn to_option(&self, parameter: &Parameter) -> Result<CliOption> {
        CliOption::builder()
            .parameter(parameter)
            .long_name(&self.long_name)
            .short_name(self.short_name)
            .cli_type(self.cli_type)
            .cli_action(self.cli_action)
            .required(self.required)
            .build()
    }
}

/// Mapping from parameter name to its [`ParameterConversion`], always
/// seeded with a `verbose` flag (`-v/--verbose`).
#[derive(Debug, Clone)]
pub struct ConversionRegistry {
    conversions: IndexMap<String, ParameterConversion>,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        let mut conversions = IndexMap::new();
        conversions.insert(
            "verbose".to_string(),
            ParameterConversion::new("verbose", CliType::None)
                .with_action(CliAction::StoreTrue)
                .with_short_name(Some('v')),
        );
        Self { conversions }
    }
}

impl ConversionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overrides the conversion for `parameter_name`.
    pub fn insert(&mut self, parameter_name: &str, conversion: ParameterConversion) {
        if self
            .conversions
            .insert(parameter_name.to_string(), conversion)
            .is_some()
        {
            debug!("Overriding parameter conversion for `{parameter_name}`");
        }
    }

    #[must_use]
    pub fn get(&self, parameter_name: &str) -> Option<&ParameterConversion> {
        self.conversions.get(parameter_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterConversion)> {
        self.conversions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.conversions.keys().map(String::as_str)
    }

    /// Builds one option per parameter, in parameter order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConversion`] naming the first parameter that
    /// has no conversion, or any error from building an option.
    pub fn options_for(&self, parameters: &[Parameter]) -> Result<Vec<CliOption>> {
        parameters
            .iter()
            .map(|parameter| {
                let conversion =
                    self.get(parameter.name())
                        .ok_or_else(|| Error::MissingConversion {
                            name: parameter.name().to_string(),
                            available: self.keys().join(" "),
                        })?;
                conversion.to_option(parameter)
            })
            .collect()
    }
}

impl Extend<(String, ParameterConversion)> for ConversionRegistry {
    fn extend<T: IntoIterator<Item = (String, ParameterConversion)>>(&mut self, iter: T) {
        for (name, conversion) in iter {
            self.insert(&name, conversion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdface_core::value::DataType;

    fn upper(value: Value) -> std::result::Result<Value, String> {
        Ok(Value::from(value.to_string().to_uppercase()))
    }

    #[test]
    fn test_registry_seeds_verbose() {
        let registry = ConversionRegistry::new();
        let verbose = registry.get("verbose").unwrap();

        assert_eq!(verbose.long_name(), "verbose");
        assert_eq!(verbose.cli_action(), CliAction::StoreTrue);
        assert_eq!(verbose.short_name(), Some('v'));
    }

    #[test]
    fn test_user_entries_may_override_verbose() {
        let mut registry = ConversionRegistry::new();
        registry.insert(
            "verbose",
            ParameterConversion::new("chatty", CliType::None).with_action(CliAction::StoreTrue),
        );

        assert_eq!(registry.get("verbose").unwrap().long_name(), "chatty");
        assert_eq!(registry.keys().count(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        assert!(matches!(
            ParameterConversion::parse("x", "bytes", None, None),
            Err(Error::InvalidCliType(_))
        ));
        assert!(matches!(
            ParameterConversion::parse("x", "int", Some("count"), None),
            Err(Error::InvalidCliAction(_))
        ));
        assert!(matches!(
            ParameterConversion::parse("x", "int", None, Some("xy")),
            Err(Error::InvalidShortName(_))
        ));
        assert!(matches!(
            ParameterConversion::parse("x", "int", Some("store_true"), None),
            Err(Error::ActionTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_defaults_to_store() {
        let conversion = ParameterConversion::parse("times", "int", None, Some("t")).unwrap();
        assert_eq!(conversion.cli_type(), CliType::Int);
        assert_eq!(conversion.cli_action(), CliAction::Store);
        assert_eq!(conversion.short_name(), Some('t'));
    }

    #[test]
    fn test_options_for_missing_conversion_lists_keys() {
        let mut registry = ConversionRegistry::new();
        registry.insert("name", ParameterConversion::new("name", CliType::String));
        let parameters = vec![Parameter::builder("input_path", DataType::FilePath, "Input")
            .required(true)
            .build()
            .unwrap()];

        match registry.options_for(&parameters) {
            Err(Error::MissingConversion { name, available }) => {
                assert_eq!(name, "input_path");
                assert_eq!(available, "verbose name");
            }
            other => panic!("Expected MissingConversion, got {other:?}"),
        }
    }

    #[test]
    fn test_options_for_applies_conversion() {
        let mut registry = ConversionRegistry::new();
        registry.insert(
            "label",
            ParameterConversion::new("label-text", CliType::String)
                .with_short_name(Some('l'))
                .with_in_handler(upper)
                .with_required(true),
        );
        let parameters = vec![Parameter::builder("label", DataType::Str, "A label")
            .build()
            .unwrap()];

        let options = registry.options_for(&parameters).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name(), "label");
        assert_eq!(options[0].long_name(), "label-text");
        assert!(options[0].required());
        assert!(registry.get("label").unwrap().in_handler().is_some());
    }
}
