// observations-config/src/validation.rs
//! Custom validation functions for configuration.
//!
//! Sections only validate their values while enabled, so these helpers are
//! called from struct-level schema checks rather than field attributes.

use std::borrow::Cow;

use multiaddr::Multiaddr;
use validator::ValidationError;

/// Build a validation error whose code and message both name the field.
fn invalid(field: &'static str, problem: &str) -> ValidationError {
    ValidationError::new(field).with_message(Cow::Owned(format!("{field} is {problem}")))
}

/// Validate that an endpoint has been provided.
pub fn require_endpoint(
    field: &'static str,
    endpoint: Option<&Multiaddr>,
) -> Result<(), ValidationError> {
    match endpoint {
        Some(_) => Ok(()),
        None => Err(invalid(field, "undefined")),
    }
}

/// Validate that a value is not below zero.
pub fn require_non_negative<T>(field: &'static str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        Err(invalid(field, "invalid"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn missing_endpoint_names_the_field() {
        let err = require_endpoint("metrics.prometheus_endpoint", None).unwrap_err();
        assert_eq!(err.code, "metrics.prometheus_endpoint");
        assert_eq!(
            err.message.as_deref(),
            Some("metrics.prometheus_endpoint is undefined")
        );
    }

    #[test]
    fn zero_is_not_negative() {
        assert!(require_non_negative("tracing.sampling_prob", 0.0_f64).is_ok());
        assert!(require_non_negative("metrics.reporting_interval", TimeDelta::zero()).is_ok());
        assert!(require_non_negative("tracing.sampling_prob", -0.1_f64).is_err());
        assert!(
            require_non_negative("metrics.reporting_interval", TimeDelta::milliseconds(-1))
                .is_err()
        );
    }
}
