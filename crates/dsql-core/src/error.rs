//! Error types for statement translation and row delivery.

use dsql_model::ServiceError;

use crate::lexer::TokenKind;

/// Errors produced while parsing a statement.
///
/// Every variant carries the full statement text so a caller can report the
/// failure without holding on to the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A token did not match what the grammar required at this point.
    #[error("parser: unexpected token '{found}' ({kind}), expected {expected} in '{source_text}'")]
    UnexpectedToken {
        /// The offending lexeme.
        found: String,
        /// How the offending lexeme was classified.
        kind: TokenKind,
        /// What the grammar required.
        expected: String,
        /// The statement being parsed.
        source_text: String,
    },

    /// The statement does not start with a recognized statement keyword.
    #[error("parser: unknown statement '{found}' in '{source_text}'")]
    UnknownStatement {
        /// The leading lexeme.
        found: String,
        /// The statement being parsed.
        source_text: String,
    },

    /// A `WITH (...)` throughput entry names an unknown parameter or has a
    /// non-integer value.
    #[error("parser: invalid throughput '{name} = {value}' in '{source_text}'")]
    InvalidThroughput {
        /// The parameter name as written.
        name: String,
        /// The value as written.
        value: String,
        /// The statement being parsed.
        source_text: String,
    },

    /// An INSERT lists a different number of columns and values.
    #[error("parser: {columns} columns but {values} values in '{source_text}'")]
    ColumnCountMismatch {
        /// Number of columns named.
        columns: usize,
        /// Number of values supplied.
        values: usize,
        /// The statement being parsed.
        source_text: String,
    },

    /// A LIMIT value is not a non-negative 32-bit integer.
    #[error("parser: invalid limit '{value}' in '{source_text}'")]
    InvalidLimit {
        /// The value as written.
        value: String,
        /// The statement being parsed.
        source_text: String,
    },
}

/// Errors raised while binding `?` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// More placeholders than parameters.
    #[error("no parameter for placeholder {index}")]
    MissingParameter {
        /// Zero-based placeholder position.
        index: usize,
    },

    /// More parameters than placeholders.
    #[error("{given} parameters supplied for {expected} placeholders")]
    ExtraParameters {
        /// Number of placeholders in the statement.
        expected: usize,
        /// Number of parameters supplied.
        given: usize,
    },

    /// A float parameter that is NaN or infinite has no literal form.
    #[error("parameter {index} is not a finite number")]
    NonFiniteFloat {
        /// Zero-based parameter position.
        index: usize,
    },
}

/// Errors raised by the row cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowsError {
    /// The destination buffer does not match the column count.
    #[error("row buffer holds {actual} slots but there are {expected} columns")]
    BufferWidth {
        /// Column count.
        expected: usize,
        /// Buffer length.
        actual: usize,
    },

    /// A number attribute is not an integer and strict numbers are enabled.
    #[error("column '{column}' holds non-integer number '{text}'")]
    InvalidNumber {
        /// The column being realized.
        column: String,
        /// The number text.
        text: String,
    },
}

/// Errors returned by the transport collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The store answered with an error envelope.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The call could not be completed.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Top-level error for running a statement through a connection.
#[derive(Debug, thiserror::Error)]
pub enum DsqlError {
    /// The statement did not parse.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Placeholder binding failed.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The transport failed or the store returned an error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request or response body could not be (de)serialized.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Row delivery failed.
    #[error(transparent)]
    Rows(#[from] RowsError),

    /// No transport is registered under the given name.
    #[error("no transport registered as '{0}'")]
    UnknownConnection(String),
}

/// Convenience result type for dsql operations.
pub type DsqlResult<T> = Result<T, DsqlError>;
