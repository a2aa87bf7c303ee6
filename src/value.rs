//! Resolved argument values and token conversion.
//!
//! Raw command-line tokens are strings; fields resolve them into typed
//! [`Value`]s through a [`ConvertFn`]. Defaults and choice sets are declared
//! as `Value`s directly, which pins down the one most-likely-to-surprise
//! behaviour of the resolver: a default never passes through the conversion
//! function (it is already in converted form), and choice membership is
//! always checked against converted values, never against raw text.

use std::fmt;
use std::path::{Path, PathBuf};

/// A resolved argument value
///
/// The closed set of shapes a field can resolve to. Repeated arities resolve
/// to [`Value::List`] with one element per token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
    List(Vec<Value>),
}

/// Converts one raw token into a resolved value
///
/// Errors are reported as plain messages; the resolver wraps them with the
/// field name.
pub type ConvertFn = fn(&str) -> std::result::Result<Value, String>;

impl Value {
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    pub fn int(value: i64) -> Self {
        Value::Int(value)
    }

    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    pub fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    pub fn path(value: impl Into<PathBuf>) -> Self {
        Value::Path(value.into())
    }

    pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
        Value::List(values.into_iter().collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

/// Provided conversion functions for common field types
pub mod convert {
    use super::Value;

    /// Identity conversion; the default when a field declares none
    pub fn string(raw: &str) -> Result<Value, String> {
        Ok(Value::Str(raw.to_string()))
    }

    pub fn int(raw: &str) -> Result<Value, String> {
        raw.parse::<i64>()
            .map(Value::Int)
            .map_err(|e| format!("`{}` is not an integer: {}", raw, e))
    }

    pub fn float(raw: &str) -> Result<Value, String> {
        raw.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| format!("`{}` is not a number: {}", raw, e))
    }

    pub fn bool(raw: &str) -> Result<Value, String> {
        match raw {
            "true" | "yes" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "0" | "off" => Ok(Value::Bool(false)),
            other => Err(format!("`{}` is not a boolean", other)),
        }
    }

    pub fn path(raw: &str) -> Result<Value, String> {
        Ok(Value::path(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_conversion() {
        assert_eq!(convert::int("8080"), Ok(Value::Int(8080)));
        assert!(convert::int("lol").is_err());
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(convert::bool("yes"), Ok(Value::Bool(true)));
        assert_eq!(convert::bool("off"), Ok(Value::Bool(false)));
        assert!(convert::bool("maybe").is_err());
    }

    #[test]
    fn test_path_conversion_and_accessors() {
        let value = convert::path("some/root").unwrap();
        assert_eq!(value.as_path(), Some(Path::new("some/root")));
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(
            Value::list([Value::str("a"), Value::str("b")]).to_string(),
            "[a, b]"
        );
    }
}
