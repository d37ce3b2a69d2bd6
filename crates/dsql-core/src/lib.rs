//! Statement translation for dsql.
//!
//! Turns SQL-like statement text into typed store requests and projects the
//! store's schemaless query responses back into fixed-width rows:
//!
//! ```text
//! text -> lexer -> parser -> Request -> Transport -> QueryOutput -> Projection -> Rows
//! ```
//!
//! Everything but the [`Transport`] is synchronous and in-memory.
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod config;
pub mod connection;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod projection;
pub mod request;
pub mod rows;
pub mod statement;

pub use config::DsqlConfig;
pub use connection::{Connection, Transport, TransportRegistry};
pub use error::{BindError, DsqlError, DsqlResult, RowsError, SyntaxError, TransportError};
pub use parser::parse;
pub use projection::{NumberPolicy, Projection, Value};
pub use request::{Expression, Request};
pub use rows::{Advance, Rows};
pub use statement::{Param, bind};
