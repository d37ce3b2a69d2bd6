//! Shared wire types for the six request variants.
//!
//! All structs follow the store's JSON wire format with `PascalCase` field
//! names. Enum variants use idiomatic Rust naming with `#[serde(rename)]` to
//! map onto the `SCREAMING_SNAKE_CASE` tokens the store expects.

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Key type within a key schema element.
///
/// `Hash` denotes the partition key; `Range` denotes the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Partition key.
    #[serde(rename = "HASH")]
    Hash,
    /// Sort key.
    #[serde(rename = "RANGE")]
    Range,
}

impl KeyType {
    /// Returns the wire-format string representation of this key type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Range => "RANGE",
        }
    }

    /// Map a statement constraint word (`hash`, `range`) to a key type.
    ///
    /// Matching is case-insensitive; other constraint words yield `None`.
    #[must_use]
    pub fn from_constraint(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("hash") {
            Some(Self::Hash)
        } else if word.eq_ignore_ascii_case("range") {
            Some(Self::Range)
        } else {
            None
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute types accepted in an attribute definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    /// String.
    #[serde(rename = "S")]
    S,
    /// String set.
    #[serde(rename = "SS")]
    Ss,
    /// Number.
    #[serde(rename = "N")]
    N,
    /// Number set.
    #[serde(rename = "NS")]
    Ns,
    /// Binary.
    #[serde(rename = "B")]
    B,
    /// Binary set.
    #[serde(rename = "BS")]
    Bs,
}

impl AttributeType {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::Ss => "SS",
            Self::N => "N",
            Self::Ns => "NS",
            Self::B => "B",
            Self::Bs => "BS",
        }
    }

    /// Map a statement type word to its wire type.
    ///
    /// `string`→S, `stringset`→SS, `number`→N, `numberset`→NS,
    /// `binary`→B, `binaryset`→BS. Matching is case-insensitive.
    #[must_use]
    pub fn from_type_name(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "string" => Some(Self::S),
            "stringset" => Some(Self::Ss),
            "number" => Some(Self::N),
            "numberset" => Some(Self::Ns),
            "binary" => Some(Self::B),
            "binaryset" => Some(Self::Bs),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator used in key conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Equal to.
    #[serde(rename = "EQ")]
    Eq,
    /// Less than or equal to.
    #[serde(rename = "LE")]
    Le,
    /// Less than.
    #[serde(rename = "LT")]
    Lt,
    /// Greater than or equal to.
    #[serde(rename = "GE")]
    Ge,
    /// Greater than.
    #[serde(rename = "GT")]
    Gt,
    /// Attribute value begins with the specified substring.
    #[serde(rename = "BEGINS_WITH")]
    BeginsWith,
    /// Attribute value is between two values (inclusive).
    #[serde(rename = "BETWEEN")]
    Between,
}

impl ComparisonOperator {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Le => "LE",
            Self::Lt => "LT",
            Self::Ge => "GE",
            Self::Gt => "GT",
            Self::BeginsWith => "BEGINS_WITH",
            Self::Between => "BETWEEN",
        }
    }

    /// Map a statement operator (`=`, `<`, `<=`, `>`, `>=`, `like`, `between`)
    /// to the store's operator vocabulary. Words match case-insensitively.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_ascii_lowercase().as_str() {
            "=" => Some(Self::Eq),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "like" => Some(Self::BeginsWith),
            "between" => Some(Self::Between),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action to perform on an attribute during an `UpdateItem` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeAction {
    /// Set the attribute value.
    #[default]
    #[serde(rename = "PUT")]
    Put,
}

impl AttributeAction {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Put => "PUT",
        }
    }
}

impl std::fmt::Display for AttributeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Structs - Key Schema & Attributes
// ---------------------------------------------------------------------------

/// An element of the key schema for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    /// The name of the key attribute.
    pub attribute_name: String,
    /// The role of the attribute in the key schema (`HASH` or `RANGE`).
    pub key_type: KeyType,
}

/// An attribute definition specifying the attribute name and its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    /// The name of the attribute.
    pub attribute_name: String,
    /// The data type of the attribute.
    pub attribute_type: AttributeType,
}

// ---------------------------------------------------------------------------
// Structs - Throughput & Capacity
// ---------------------------------------------------------------------------

/// Provisioned throughput settings for a new table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    /// The maximum number of strongly consistent reads per second.
    pub read_capacity_units: i64,
    /// The maximum number of writes per second.
    pub write_capacity_units: i64,
}

impl Default for ProvisionedThroughput {
    /// One unit each way, the smallest value the store accepts.
    fn default() -> Self {
        Self {
            read_capacity_units: 1,
            write_capacity_units: 1,
        }
    }
}

/// Capacity consumed by an operation, as reported in a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// The name of the table that was affected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// The total capacity units consumed by the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
}

// ---------------------------------------------------------------------------
// Structs - Conditions & Updates
// ---------------------------------------------------------------------------

/// Accumulated key condition for one attribute.
///
/// Re-applying a condition to the same attribute appends to
/// `attribute_value_list`, which is how repeated equality and the two-value
/// `BETWEEN` form are expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    /// The comparison operator.
    pub comparison_operator: ComparisonOperator,
    /// The attribute values to compare against.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_value_list: Vec<AttributeValue>,
}

/// An attribute value update for the `AttributeUpdates` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeValueUpdate {
    /// The new value for the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// The action to perform on the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AttributeAction>,
}

impl AttributeValueUpdate {
    /// A `PUT` of `value`.
    #[must_use]
    pub fn put(value: AttributeValue) -> Self {
        Self {
            value: Some(value),
            action: Some(AttributeAction::Put),
        }
    }
}
