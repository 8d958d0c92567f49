//! Built-in input handlers.
//!
//! Each has the [`crate::conversion::InHandler`] signature and reports
//! failures as a message the interface shows to the user.

use std::fs;

use cmdface_core::value::Value;

use crate::config::expand_path;

/// Splits `"a, b,c"` into a list of trimmed strings, dropping empty entries.
/// Repeated (appended) values are split and flattened in order.
///
/// # Errors
///
/// Returns a message if the value is not a string or a list of strings.
pub fn split_on_commas(value: Value) -> Result<Value, String> {
    match value {
        Value::Str(s) => Ok(Value::List(split(&s))),
        Value::List(items) => {
            let mut flattened = Vec::new();
            for item in items {
                match item {
                    Value::Str(s) => flattened.extend(split(&s)),
                    other => return Err(format!("expected comma-separated text, got `{other}`")),
                }
            }
            Ok(Value::List(flattened))
        }
        other => Err(format!("expected comma-separated text, got `{other}`")),
    }
}

fn split(text: &str) -> Vec<Value> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Value::from)
        .collect()
}

/// Replaces a file path with the non-blank lines of that file.
///
/// # Errors
///
/// Returns a message if the value is not a path or the file cannot be read.
pub fn read_lines(value: Value) -> Result<Value, String> {
    let path = match &value {
        Value::Path(path) => path.clone(),
        Value::Str(s) => expand_path(s),
        other => return Err(format!("expected a file path, got `{other}`")),
    };

    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("could not read `{}`: {e}", path.display()))?;

    Ok(Value::List(
        contents
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(Value::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_split_on_commas() {
        let result = split_on_commas(Value::from("the, a,,an ")).unwrap();
        assert_eq!(
            result,
            Value::List(vec![Value::from("the"), Value::from("a"), Value::from("an")])
        );
    }

    #[test]
    fn test_split_on_commas_flattens_appended_values() {
        let appended = Value::List(vec![Value::from("a,b"), Value::from("c")]);
        let result = split_on_commas(appended).unwrap();
        assert_eq!(result.as_list().map(<[Value]>::len), Some(3));
    }

    #[test]
    fn test_split_on_commas_rejects_numbers() {
        assert!(split_on_commas(Value::Int(3)).is_err());
    }

    #[test]
    fn test_read_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "first\n\nsecond  \n").unwrap();

        let result = read_lines(Value::Path(file.path().to_path_buf())).unwrap();
        assert_eq!(
            result,
            Value::List(vec![Value::from("first"), Value::from("second")])
        );
    }

    #[test]
    fn test_read_lines_missing_file() {
        let message = read_lines(Value::from("/definitely/not/here.txt")).unwrap_err();
        assert!(message.contains("/definitely/not/here.txt"));
    }
}
