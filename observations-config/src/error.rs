//! Error types for configuration loading and validation

use thiserror::Error;
use validator::ValidationErrors;

use crate::duration::DurationError;

/// Unified configuration error type.
///
/// Every variant is terminal for the load attempt that produced it: callers
/// must treat the section as unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The section document is not valid JSON or has the wrong shape.
    #[error("Error unmarshaling {section} config: {source}")]
    Decode {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An environment override carried a value of the wrong type.
    #[error("Environment override error: {0}")]
    Override(#[source] figment::Error),

    /// An endpoint string is not a valid multiaddr.
    #[error("{field} multiaddr {value:?}: {source}")]
    InvalidEndpoint {
        field: &'static str,
        value: String,
        #[source]
        source: multiaddr::Error,
    },

    /// A duration string could not be parsed.
    #[error("error parsing {field} duration {value:?}: {source}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: DurationError,
    },

    /// Semantic validation failed.
    #[error("Invalid configuration:\n{}", format_validation_errors(.0))]
    InvalidConfig(#[source] ValidationErrors),

    /// Serialization back to JSON failed.
    #[error("Configuration encoding error: {0}")]
    Encode(#[source] serde_json::Error),
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    for (field, errors) in errors.field_errors() {
        // Struct-level checks are reported under `__all__` and already name
        // the offending field in their message.
        if field != "__all__" {
            let _ = writeln!(output, "Field '{}':", field);
        }
        for error in errors {
            let message = match &error.message {
                Some(msg) => msg.to_string(),
                None => error.code.to_string(),
            };
            let _ = writeln!(output, "  - {}", message);
        }
    }
    output
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::InvalidConfig(errors)
    }
}
