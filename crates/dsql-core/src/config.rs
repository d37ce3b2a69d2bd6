//! dsql configuration.

use std::env;

use dsql_model::DEFAULT_TARGET_PREFIX;

use crate::projection::NumberPolicy;

/// Translator and cursor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsqlConfig {
    /// Fail rows holding non-integer numbers instead of reading them as zero
    /// (default: false).
    pub strict_numbers: bool,
    /// Prefix of the operation target header.
    pub target_prefix: String,
    /// Log level used by the command-line binary.
    pub log_level: String,
}

impl DsqlConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            strict_numbers: env_bool("DSQL_STRICT_NUMBERS", false),
            target_prefix: env::var("DSQL_TARGET_PREFIX")
                .unwrap_or_else(|_| DEFAULT_TARGET_PREFIX.to_owned()),
            log_level: env::var("DSQL_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
        }
    }

    /// Numeric realization policy for row cursors.
    #[must_use]
    pub fn number_policy(&self) -> NumberPolicy {
        if self.strict_numbers {
            NumberPolicy::Strict
        } else {
            NumberPolicy::Lenient
        }
    }
}

impl Default for DsqlConfig {
    fn default() -> Self {
        Self {
            strict_numbers: false,
            target_prefix: DEFAULT_TARGET_PREFIX.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}
