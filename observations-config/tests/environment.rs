//! Environment variables take precedence over the JSON document.

use chrono::TimeDelta;
use figment::Jail;
use observations_config::{ConfigError, MetricsConfig, ObservationsConfig, Section, TracingConfig};

#[test]
fn environment_enables_disabled_stats() {
    Jail::expect_with(|jail| {
        jail.set_env("CLUSTER_OBSERVATIONS_ENABLESTATS", "true");

        let cfg = MetricsConfig::load_json(br#"{"enable_stats": false}"#).unwrap();
        assert!(cfg.enable_stats);
        assert_eq!(cfg.stats_reporting_interval, TimeDelta::seconds(2));
        Ok(())
    });
}

#[test]
fn environment_only_touches_named_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("CLUSTER_OBSERVATIONS_JAEGERAGENTENDPOINT", "/ip4/192.168.0.5/udp/6831");

        let cfg = TracingConfig::load_json(
            br#"{"enable_tracing": true, "sampling_prob": 0.5, "service_name": "api"}"#,
        )
        .unwrap();
        assert_eq!(
            cfg.jaeger_agent_endpoint.map(|addr| addr.to_string()).as_deref(),
            Some("/ip4/192.168.0.5/udp/6831")
        );
        assert_eq!(cfg.tracing_sampling_prob, 0.5);
        assert_eq!(cfg.tracing_service_name, "api");
        Ok(())
    });
}

#[test]
fn environment_values_are_validated() {
    Jail::expect_with(|jail| {
        jail.set_env("CLUSTER_OBSERVATIONS_PROMETHEUSENDPOINT", "not-a-multiaddr");
        let err = MetricsConfig::load_json(b"{}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        jail.set_env("CLUSTER_OBSERVATIONS_PROMETHEUSENDPOINT", "/ip4/0.0.0.0/tcp/8888");
        jail.set_env("CLUSTER_OBSERVATIONS_ENABLESTATS", "true");
        jail.set_env("CLUSTER_OBSERVATIONS_STATSREPORTINGINTERVAL", "-1s");
        let err = MetricsConfig::load_json(b"{}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
        Ok(())
    });
}

#[test]
fn document_sections_share_the_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("CLUSTER_OBSERVATIONS_ENABLETRACING", "true");

        let config = ObservationsConfig::from_json(br#"{"metrics": {"enable_stats": false}}"#)
            .unwrap();
        assert!(!config.metrics.enable_stats);
        assert!(config.tracing.enable_tracing);
        Ok(())
    });
}
