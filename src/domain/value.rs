//! Typed values and type inference
//!
//! Snapshot files store every value as text; [`Value::infer`] recovers the
//! richest type a raw token supports. Inference never fails: anything
//! ambiguous or malformed falls through to a plain string.

use std::fmt;

use serde::Serialize;

/// A typed value held under a name in a snapshot mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Infers the richest type a raw text token supports.
    ///
    /// - Digits (with any `.` removed): `Float` when the text contains a
    ///   `.`, otherwise `Int`. A token that looks numeric but does not
    ///   parse (`1.2.3`) stays a string.
    /// - `[a, b, c]`: a flat list, each element trimmed and re-inferred.
    /// - `'text'` or `"text"`: exactly one quote layer stripped.
    /// - Anything else, verbatim. Note the digit check excludes `-`, so
    ///   negative numbers are kept as strings.
    pub fn infer(text: &str) -> Value {
        let digits: String = text.chars().filter(|c| *c != '.').collect();
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if text.contains('.') {
                if let Ok(f) = text.parse::<f64>() {
                    return Value::Float(f);
                }
            } else if let Ok(i) = text.parse::<i64>() {
                return Value::Int(i);
            }
        }

        if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
            let inner = &text[1..text.len() - 1];
            return Value::List(inner.split(',').map(|e| Value::infer(e.trim())).collect());
        }

        if text.len() >= 2
            && ((text.starts_with('"') && text.ends_with('"'))
                || (text.starts_with('\'') && text.ends_with('\'')))
        {
            return Value::Str(text[1..text.len() - 1].to_string());
        }

        Value::Str(text.to_string())
    }

    /// Returns true for values written unquoted in the file format
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

/// Stringification used for placeholder substitution and line encoding.
///
/// Floats always carry a decimal point (`4.0`, not `4`) and list elements
/// that are strings are single-quoted, so a displayed value re-infers to
/// the same type.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 {
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", v)
                }
            }
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match item {
                        Value::Str(s) => write!(f, "'{}'", s)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}
