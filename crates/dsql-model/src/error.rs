//! Store error envelopes.
//!
//! Failed calls return a JSON body with a `__type` field holding the
//! fully-qualified error type name, e.g.
//! `com.amazonaws.dynamodb.v20120810#ResourceNotFoundException`.

use std::fmt;

use serde::Deserialize;

/// Well-known store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ServiceErrorCode {
    /// Table already exists.
    ResourceInUseException,
    /// Table not found.
    ResourceNotFoundException,
    /// Condition check failed.
    ConditionalCheckFailedException,
    /// Provisioned throughput exceeded.
    ProvisionedThroughputExceededException,
    /// Validation error.
    ValidationException,
    /// Serialization error.
    SerializationException,
    /// Internal server error.
    InternalServerError,
    /// Access denied.
    AccessDeniedException,
    /// Unknown operation or credentials.
    UnrecognizedClientException,
    /// Any other `__type`.
    #[default]
    Unknown,
}

impl ServiceErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceInUseException => "ResourceInUseException",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
            Self::InternalServerError => "InternalServerError",
            Self::AccessDeniedException => "AccessDeniedException",
            Self::UnrecognizedClientException => "UnrecognizedClientException",
            Self::Unknown => "Unknown",
        }
    }

    /// Resolve a code from a `__type` value, with or without its namespace.
    #[must_use]
    pub fn from_error_type(error_type: &str) -> Self {
        let short = error_type
            .rsplit_once('#')
            .map_or(error_type, |(_, name)| name);
        match short {
            "ResourceInUseException" => Self::ResourceInUseException,
            "ResourceNotFoundException" => Self::ResourceNotFoundException,
            "ConditionalCheckFailedException" => Self::ConditionalCheckFailedException,
            "ProvisionedThroughputExceededException" => {
                Self::ProvisionedThroughputExceededException
            }
            "ValidationException" => Self::ValidationException,
            "SerializationException" => Self::SerializationException,
            "InternalServerError" => Self::InternalServerError,
            "AccessDeniedException" => Self::AccessDeniedException,
            "UnrecognizedClientException" => Self::UnrecognizedClientException,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// The error code.
    pub code: ServiceErrorCode,
    /// The raw `__type` value as received.
    pub error_type: String,
    /// A human-readable error message.
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

impl ServiceError {
    /// Create an error from a code and message.
    #[must_use]
    pub fn with_message(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            error_type: code.as_str().to_owned(),
            message: message.into(),
        }
    }

    /// Decode an error envelope from a response body.
    ///
    /// A body that is not a JSON envelope is kept verbatim as the message
    /// under [`ServiceErrorCode::Unknown`].
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(env) => Self {
                code: ServiceErrorCode::from_error_type(&env.error_type),
                error_type: env.error_type,
                message: env.message,
            },
            Err(_) => Self::with_message(
                ServiceErrorCode::Unknown,
                String::from_utf8_lossy(body).into_owned(),
            ),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store: {} ({})", self.message, self.error_type)
    }
}

impl std::error::Error for ServiceError {}
