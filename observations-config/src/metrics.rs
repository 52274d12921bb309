//! Metrics collection configuration.
//!
//! Controls whether stats are recorded, where the Prometheus scrape endpoint
//! listens and how often stats are reported.

use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::TimeDelta;
use multiaddr::{Multiaddr, Protocol};
use serde::{Deserialize, Serialize};
use validator::{self, Validate, ValidationError};

use crate::provider::{self, EnvField};
use crate::section::Section;
use crate::{duration, endpoint, validation, ConfigError};

pub const METRICS_CONFIG_KEY: &str = "metrics";

pub const DEFAULT_ENABLE_STATS: bool = false;
pub const DEFAULT_PROMETHEUS_ENDPOINT: &str = "/ip4/0.0.0.0/tcp/8888";
pub const DEFAULT_STATS_REPORTING_INTERVAL: Duration = Duration::from_secs(2);

const ENDPOINT_FIELD: &str = "metrics.prometheus_endpoint";
const INTERVAL_FIELD: &str = "metrics.reporting_interval";

/// Metrics collection configuration.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = validate_metrics))]
pub struct MetricsConfig {
    /// Master switch for stats collection.
    pub enable_stats: bool,

    /// Address the Prometheus exporter is scraped on.
    pub prometheus_endpoint: Option<Multiaddr>,

    /// Cadence at which stats are reported.
    pub stats_reporting_interval: TimeDelta,
}

fn default_stats_reporting_interval() -> TimeDelta {
    TimeDelta::seconds(DEFAULT_STATS_REPORTING_INTERVAL.as_secs() as i64)
}

fn default_prometheus_endpoint() -> Multiaddr {
    Multiaddr::empty()
        .with(Protocol::Ip4(Ipv4Addr::UNSPECIFIED))
        .with(Protocol::Tcp(8888))
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable_stats: DEFAULT_ENABLE_STATS,
            prometheus_endpoint: Some(default_prometheus_endpoint()),
            stats_reporting_interval: default_stats_reporting_interval(),
        }
    }
}

fn validate_metrics(cfg: &MetricsConfig) -> Result<(), ValidationError> {
    if cfg.enable_stats {
        validation::require_endpoint(ENDPOINT_FIELD, cfg.prometheus_endpoint.as_ref())?;
        validation::require_non_negative(INTERVAL_FIELD, cfg.stats_reporting_interval)?;
    }
    Ok(())
}

/// JSON representation of [`MetricsConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonMetricsConfig {
    #[serde(deserialize_with = "provider::bool_or_text")]
    pub enable_stats: bool,
    pub prometheus_endpoint: String,
    pub reporting_interval: String,
}

impl Default for JsonMetricsConfig {
    fn default() -> Self {
        MetricsConfig::default().to_repr()
    }
}

impl Section for MetricsConfig {
    const CONFIG_KEY: &'static str = METRICS_CONFIG_KEY;

    const ENV_FIELDS: &'static [EnvField] = &[
        EnvField::new("ENABLESTATS", "enable_stats"),
        EnvField::new("PROMETHEUSENDPOINT", "prometheus_endpoint"),
        EnvField::new("STATSREPORTINGINTERVAL", "reporting_interval"),
    ];

    type Repr = JsonMetricsConfig;

    fn to_repr(&self) -> JsonMetricsConfig {
        JsonMetricsConfig {
            enable_stats: self.enable_stats,
            prometheus_endpoint: endpoint::format(self.prometheus_endpoint.as_ref()),
            reporting_interval: duration::format(self.stats_reporting_interval),
        }
    }

    fn from_repr(repr: JsonMetricsConfig) -> Result<Self, ConfigError> {
        let prometheus_endpoint = endpoint::parse(ENDPOINT_FIELD, &repr.prometheus_endpoint)?;

        // An empty interval keeps the default.
        let stats_reporting_interval = if repr.reporting_interval.is_empty() {
            default_stats_reporting_interval()
        } else {
            duration::parse(&repr.reporting_interval).map_err(|source| {
                ConfigError::InvalidDuration {
                    field: INTERVAL_FIELD,
                    value: repr.reporting_interval.clone(),
                    source,
                }
            })?
        };

        Ok(Self {
            enable_stats: repr.enable_stats,
            prometheus_endpoint: Some(prometheus_endpoint),
            stats_reporting_interval,
        })
    }
}
