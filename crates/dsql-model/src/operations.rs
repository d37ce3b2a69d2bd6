//! Store operation enum.

use std::fmt;

/// Default prefix of the `X-Amz-Target` header value.
pub const DEFAULT_TARGET_PREFIX: &str = "DynamoDB_20120810";

/// Operations a translated statement can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DsqlOperation {
    // Table management
    /// Create a new table.
    CreateTable,
    /// Delete a table.
    DeleteTable,

    // Item writes
    /// Put (insert or replace) an item.
    PutItem,
    /// Update an item.
    UpdateItem,
    /// Delete an item by primary key.
    DeleteItem,

    // Reads
    /// Query items by key condition.
    Query,
}

impl DsqlOperation {
    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTable => "CreateTable",
            Self::DeleteTable => "DeleteTable",
            Self::PutItem => "PutItem",
            Self::UpdateItem => "UpdateItem",
            Self::DeleteItem => "DeleteItem",
            Self::Query => "Query",
        }
    }

    /// Parse an operation name string into a `DsqlOperation`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CreateTable" => Some(Self::CreateTable),
            "DeleteTable" => Some(Self::DeleteTable),
            "PutItem" => Some(Self::PutItem),
            "UpdateItem" => Some(Self::UpdateItem),
            "DeleteItem" => Some(Self::DeleteItem),
            "Query" => Some(Self::Query),
            _ => None,
        }
    }

    /// Build the full target header value, e.g. `DynamoDB_20120810.Query`.
    #[must_use]
    pub fn target(&self, prefix: &str) -> String {
        format!("{prefix}.{}", self.as_str())
    }

    /// Whether the response to this operation carries rows.
    #[must_use]
    pub fn returns_rows(&self) -> bool {
        matches!(self, Self::Query)
    }
}

impl fmt::Display for DsqlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
