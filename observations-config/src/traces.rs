//! Distributed tracing configuration.
//!
//! Parameters handed to the Jaeger exporter: agent location, sampling
//! probability and the service name attached to spans.

use std::net::Ipv4Addr;

use multiaddr::{Multiaddr, Protocol};
use serde::{Deserialize, Serialize};
use validator::{self, Validate, ValidationError};

use crate::provider::{self, EnvField};
use crate::section::Section;
use crate::{endpoint, validation, ConfigError};

pub const TRACING_CONFIG_KEY: &str = "tracing";

pub const DEFAULT_ENABLE_TRACING: bool = false;
pub const DEFAULT_JAEGER_AGENT_ENDPOINT: &str = "/ip4/0.0.0.0/udp/6831";
pub const DEFAULT_TRACING_SAMPLING_PROB: f64 = 0.3;
pub const DEFAULT_TRACING_SERVICE_NAME: &str = "cluster-daemon";

const ENDPOINT_FIELD: &str = "tracing.jaeger_agent_endpoint";
const SAMPLING_FIELD: &str = "tracing.sampling_prob";

/// Distributed tracing configuration.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = validate_tracing))]
pub struct TracingConfig {
    /// Master switch for tracing.
    pub enable_tracing: bool,

    /// Address of the Jaeger agent spans are sent to.
    pub jaeger_agent_endpoint: Option<Multiaddr>,

    /// Fraction of traces sampled. Only the lower bound is enforced; the
    /// exporter clamps anything above 1.0.
    pub tracing_sampling_prob: f64,

    /// Service name attached to emitted spans.
    pub tracing_service_name: String,
}

fn default_jaeger_agent_endpoint() -> Multiaddr {
    Multiaddr::empty()
        .with(Protocol::Ip4(Ipv4Addr::UNSPECIFIED))
        .with(Protocol::Udp(6831))
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enable_tracing: DEFAULT_ENABLE_TRACING,
            jaeger_agent_endpoint: Some(default_jaeger_agent_endpoint()),
            tracing_sampling_prob: DEFAULT_TRACING_SAMPLING_PROB,
            tracing_service_name: DEFAULT_TRACING_SERVICE_NAME.into(),
        }
    }
}

fn validate_tracing(cfg: &TracingConfig) -> Result<(), ValidationError> {
    if cfg.enable_tracing {
        validation::require_endpoint(ENDPOINT_FIELD, cfg.jaeger_agent_endpoint.as_ref())?;
        validation::require_non_negative(SAMPLING_FIELD, cfg.tracing_sampling_prob)?;
    }
    Ok(())
}

/// JSON representation of [`TracingConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonTracingConfig {
    #[serde(deserialize_with = "provider::bool_or_text")]
    pub enable_tracing: bool,
    pub jaeger_agent_endpoint: String,
    #[serde(deserialize_with = "provider::f64_or_text")]
    pub sampling_prob: f64,
    pub service_name: String,
}

impl Default for JsonTracingConfig {
    fn default() -> Self {
        TracingConfig::default().to_repr()
    }
}

impl Section for TracingConfig {
    const CONFIG_KEY: &'static str = TRACING_CONFIG_KEY;

    const ENV_FIELDS: &'static [EnvField] = &[
        EnvField::new("ENABLETRACING", "enable_tracing"),
        EnvField::new("JAEGERAGENTENDPOINT", "jaeger_agent_endpoint"),
        EnvField::new("TRACINGSAMPLINGPROB", "sampling_prob"),
        EnvField::new("TRACINGSERVICENAME", "service_name"),
    ];

    type Repr = JsonTracingConfig;

    fn to_repr(&self) -> JsonTracingConfig {
        JsonTracingConfig {
            enable_tracing: self.enable_tracing,
            jaeger_agent_endpoint: endpoint::format(self.jaeger_agent_endpoint.as_ref()),
            sampling_prob: self.tracing_sampling_prob,
            service_name: self.tracing_service_name.clone(),
        }
    }

    fn from_repr(repr: JsonTracingConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            enable_tracing: repr.enable_tracing,
            jaeger_agent_endpoint: Some(endpoint::parse(
                ENDPOINT_FIELD,
                &repr.jaeger_agent_endpoint,
            )?),
            tracing_sampling_prob: repr.sampling_prob,
            tracing_service_name: repr.service_name,
        })
    }
}
