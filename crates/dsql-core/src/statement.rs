//! Positional `?` placeholder binding.
//!
//! Binding is textual: each placeholder outside a quoted string is replaced
//! by the rendered parameter, and the result is parsed like any other
//! statement.

use std::fmt;

use crate::error::BindError;

/// A statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Rendered bare.
    Int(i64),
    /// Rendered bare.
    Float(f64),
    /// Rendered bare as `true` or `false`.
    Bool(bool),
    /// Rendered as a double-quoted string literal.
    Str(String),
    /// Rendered as a double-quoted string literal of the lossy UTF-8 text.
    Bytes(Vec<u8>),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<u8>> for Param {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write_quoted(f, v),
            Self::Bytes(v) => write_quoted(f, &String::from_utf8_lossy(v)),
        }
    }
}

/// Replace every `?` outside a quoted string with the next parameter.
///
/// # Errors
///
/// Returns [`BindError::MissingParameter`] when placeholders outnumber
/// parameters, [`BindError::ExtraParameters`] when parameters are left over and
/// [`BindError::NonFiniteFloat`] for a NaN or infinite float.
pub fn bind(query: &str, params: &[Param]) -> Result<String, BindError> {
    let mut out = String::with_capacity(query.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut used = 0;

    for c in query.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                out.push(c);
            }
            None if c == '?' => {
                let param = params
                    .get(used)
                    .ok_or(BindError::MissingParameter { index: used })?;
                if matches!(param, Param::Float(v) if !v.is_finite()) {
                    return Err(BindError::NonFiniteFloat { index: used });
                }
                out.push_str(&param.to_string());
                used += 1;
            }
            None => out.push(c),
        }
    }

    if used < params.len() {
        return Err(BindError::ExtraParameters {
            expected: used,
            given: params.len(),
        });
    }
    Ok(out)
}
