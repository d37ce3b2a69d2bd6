//! Reconciling schemaless items into fixed-width rows.
//!
//! Items returned by a query are independently shaped: two items may share no
//! attribute names at all. The projector settles on one column order for the
//! whole result and resolves each item against it, filling gaps with
//! [`Value::Null`] instead of failing.

use std::collections::HashSet;
use std::fmt;

use bytes::Bytes;
use dsql_model::{AttributeValue, Item};
use tracing::warn;

use crate::error::RowsError;

/// A realized cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// Raw content of a string attribute.
    Bytes(Bytes),
    /// Parsed number attribute.
    Int(i64),
    /// The attribute is absent from the item, or carries no payload.
    #[default]
    Null,
}

impl Value {
    /// Returns `true` for the absent placeholder.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Self::Int(n) => write!(f, "{n}"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// How a number attribute that is not an integer is realized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberPolicy {
    /// Substitute zero and log a warning.
    #[default]
    Lenient,
    /// Fail the row with [`RowsError::InvalidNumber`].
    Strict,
}

/// Column order for a result set.
///
/// An explicit list is used verbatim. Otherwise the order is the union of item
/// keys, each appended the first time it is seen.
#[must_use]
pub fn resolve_columns(items: &[Item], explicit: Option<&[String]>) -> Vec<String> {
    if let Some(columns) = explicit {
        return columns.to_vec();
    }

    let mut seen = HashSet::new();
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        for name in item.keys() {
            if seen.insert(name) {
                columns.push(name.to_owned());
            }
        }
    }
    columns
}

/// Realize one attribute as a cell.
///
/// An absent attribute, and one whose payload is empty, realize as
/// [`Value::Null`].
///
/// # Errors
///
/// Returns [`RowsError::InvalidNumber`] for a non-integer number under
/// [`NumberPolicy::Strict`].
pub fn realize(
    attr: Option<&AttributeValue>,
    column: &str,
    policy: NumberPolicy,
) -> Result<Value, RowsError> {
    match attr {
        None | Some(AttributeValue::Null) => Ok(Value::Null),
        Some(AttributeValue::S(s)) if s.is_empty() => Ok(Value::Null),
        Some(AttributeValue::N(text)) if text.trim().is_empty() => Ok(Value::Null),
        Some(AttributeValue::S(s)) => Ok(Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))),
        Some(AttributeValue::N(text)) => match text.trim().parse::<i64>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) if policy == NumberPolicy::Lenient => {
                warn!(column, text = %text, "number is not an integer, using 0");
                Ok(Value::Int(0))
            }
            Err(_) => Err(RowsError::InvalidNumber {
                column: column.to_owned(),
                text: text.clone(),
            }),
        },
    }
}

/// Items paired with their resolved column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Resolved column order.
    pub columns: Vec<String>,
    /// Items in response order.
    pub items: Vec<Item>,
}

impl Projection {
    /// Resolve the column order for `items`.
    #[must_use]
    pub fn new(items: Vec<Item>, explicit: Option<&[String]>) -> Self {
        let columns = resolve_columns(&items, explicit);
        Self { columns, items }
    }

}

/// Realize one item in `columns` order.
///
/// # Errors
///
/// Stops at the first cell [`realize`] rejects.
pub fn realize_row(
    columns: &[String],
    item: &Item,
    policy: NumberPolicy,
) -> Result<Vec<Value>, RowsError> {
    columns
        .iter()
        .map(|column| realize(item.get(column), column, policy))
        .collect()
}
