//! Response payloads consumed from the store.
//!
//! Only the `Query` response carries rows. The remaining operations are
//! acknowledged with a body whose content the caller never reads.

use serde::{Deserialize, Serialize};

use crate::attribute_map::Item;
use crate::types::ConsumedCapacity;

/// Output for the `Query` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryOutput {
    /// The capacity units consumed by the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,

    /// The number of items in the response.
    #[serde(default)]
    pub count: i64,

    /// The number of items evaluated before any filter was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_count: Option<i64>,

    /// Matching items, each keyed in wire order.
    #[serde(default)]
    pub items: Vec<Item>,

    /// The primary key where the query stopped, when more pages remain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
}
