//! Wire model types for dsql.
//!
//! This crate holds the typed payloads a translated statement becomes and the
//! response shapes read back from the store. The store speaks a JSON protocol
//! with `PascalCase` fields, so the types are hand-written serde derives with
//! custom visitors only where ordering or tagging needs them.
#![allow(clippy::module_name_repetitions)]

pub mod attribute_map;
pub mod attribute_value;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_map::{AttributeMap, Item};
pub use attribute_value::AttributeValue;
pub use error::{ServiceError, ServiceErrorCode};
pub use operations::{DEFAULT_TARGET_PREFIX, DsqlOperation};
