//! Scalar `AttributeValue` with custom serialization.
//!
//! An attribute is a tagged scalar: a string payload or a numeric payload
//! (kept as decimal text), never both. The JSON wire format uses single-key
//! objects like `{"S": "hello"}` or `{"N": "42"}`. An object carrying neither
//! payload (`{}` or `{"NULL": true}`) denotes "no value", and so does an empty
//! payload once a row is realized.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single attribute value as exchanged with the store.
///
/// Numbers stay string-encoded so no precision is lost between the statement
/// text and the wire; they are only interpreted when a row is realized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value (decimal text).
    N(String),
    /// Neither payload present.
    #[default]
    Null,
}

impl AttributeValue {
    /// Build a string attribute.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::S(s.into())
    }

    /// Build a number attribute from its decimal text.
    #[must_use]
    pub fn number(n: impl Into<String>) -> Self {
        Self::N(n.into())
    }

    /// Returns the string value if this is an `S` variant.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::N(n) => write!(f, "{{N: {n}}}"),
            Self::Null => f.write_str("{NULL}"),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::N(n) => map.serialize_entry("N", n)?,
            Self::Null => map.serialize_entry("NULL", &true)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with at most one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Ok(AttributeValue::Null);
        };

        let value = match key.as_str() {
            "S" => AttributeValue::S(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "NULL" => {
                map.next_value::<IgnoredAny>()?;
                AttributeValue::Null
            }
            other => {
                return Err(de::Error::unknown_field(other, &["S", "N", "NULL"]));
            }
        };

        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(
                "attribute value must carry exactly one type key",
            ));
        }

        Ok(value)
    }
}
