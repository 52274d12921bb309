//! # Observations Configuration
//!
//! Configuration sections for the cluster's observability features: metrics
//! collection and distributed tracing.
//!
//! ## Features
//! - **Sections**: each section is identified by a fixed key and implements
//!   the shared [`Section`] load/serialize contract
//! - **Layering**: compiled defaults, then the JSON document, then
//!   `CLUSTER_OBSERVATIONS_*` environment variables
//! - **Validation**: disabled sections are accepted as-is; enabled sections
//!   must carry usable endpoints and non-negative values

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use figment::Provider;
use serde_json::{Map, Value};
use validator::Validate;

mod duration;
mod endpoint;
mod error;
mod metrics;
mod provider;
mod section;
mod traces;
mod validation;

pub use duration::DurationError;
pub use error::ConfigError;
pub use metrics::{
    JsonMetricsConfig, MetricsConfig, DEFAULT_ENABLE_STATS, DEFAULT_PROMETHEUS_ENDPOINT,
    DEFAULT_STATS_REPORTING_INTERVAL, METRICS_CONFIG_KEY,
};
pub use provider::{EnvField, EnvOverrides, ENV_PREFIX};
pub use section::Section;
pub use traces::{
    JsonTracingConfig, TracingConfig, DEFAULT_ENABLE_TRACING, DEFAULT_JAEGER_AGENT_ENDPOINT,
    DEFAULT_TRACING_SAMPLING_PROB, DEFAULT_TRACING_SERVICE_NAME, TRACING_CONFIG_KEY,
};

/// Top‑level container for the observations sections.
#[derive(Debug, Clone, PartialEq, Validate, Default)]
pub struct ObservationsConfig {
    /// Metrics collection parameters.
    #[validate(nested)]
    pub metrics: MetricsConfig,

    /// Distributed tracing parameters.
    #[validate(nested)]
    pub tracing: TracingConfig,
}

impl ObservationsConfig {
    /// Load both sections from a host document keyed by section.
    ///
    /// A section missing from the document falls back to its defaults, still
    /// subject to `CLUSTER_OBSERVATIONS_*` overrides.
    pub fn from_json(raw: &[u8]) -> Result<Self, ConfigError> {
        Self::from_json_with(
            raw,
            EnvOverrides::new(MetricsConfig::ENV_FIELDS),
            EnvOverrides::new(TracingConfig::ENV_FIELDS),
        )
    }

    /// Load both sections with explicit override sources.
    pub fn from_json_with<M, T>(raw: &[u8], metrics: M, tracing: T) -> Result<Self, ConfigError>
    where
        M: Provider,
        T: Provider,
    {
        let document: Map<String, Value> =
            serde_json::from_slice(raw).map_err(|source| ConfigError::Decode {
                section: "observations",
                source,
            })?;

        Ok(Self {
            metrics: load_section(&document, metrics)?,
            tracing: load_section(&document, tracing)?,
        })
    }

    /// Serialize both sections under their keys as indented JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        let mut document = Map::new();
        document.insert(
            MetricsConfig::CONFIG_KEY.into(),
            serde_json::to_value(self.metrics.to_repr()).map_err(ConfigError::Encode)?,
        );
        document.insert(
            TracingConfig::CONFIG_KEY.into(),
            serde_json::to_value(self.tracing.to_repr()).map_err(ConfigError::Encode)?,
        );
        serde_json::to_vec_pretty(&document).map_err(ConfigError::Encode)
    }
}

fn load_section<S: Section, P: Provider>(
    document: &Map<String, Value>,
    overrides: P,
) -> Result<S, ConfigError> {
    let raw = match document.get(S::CONFIG_KEY) {
        Some(value) => serde_json::to_vec(value).map_err(ConfigError::Encode)?,
        None => b"{}".to_vec(),
    };
    S::load_json_with(&raw, overrides)
}
