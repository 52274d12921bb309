//! Serialized sections load back to the same values.

use chrono::TimeDelta;
use figment::Figment;
use multiaddr::Multiaddr;
use observations_config::{MetricsConfig, Section, TracingConfig};
use proptest::prelude::*;

fn endpoint(transport: &'static str) -> impl Strategy<Value = Option<Multiaddr>> {
    (any::<[u8; 4]>(), any::<u16>()).prop_map(move |([a, b, c, d], port)| {
        format!("/ip4/{a}.{b}.{c}.{d}/{transport}/{port}").parse().ok()
    })
}

prop_compose! {
    fn metrics_config()(
        enable_stats in any::<bool>(),
        prometheus_endpoint in endpoint("tcp"),
        millis in -86_400_000i64..86_400_000,
    ) -> MetricsConfig {
        // Enabled sections must carry a non-negative interval to load.
        let millis = if enable_stats { millis.abs() } else { millis };
        MetricsConfig {
            enable_stats,
            prometheus_endpoint,
            stats_reporting_interval: TimeDelta::milliseconds(millis),
        }
    }
}

prop_compose! {
    fn tracing_config()(
        enable_tracing in any::<bool>(),
        jaeger_agent_endpoint in endpoint("udp"),
        eighths in 0u32..=16,
        tracing_service_name in "[a-z][a-z0-9-]{0,24}",
    ) -> TracingConfig {
        TracingConfig {
            enable_tracing,
            jaeger_agent_endpoint,
            tracing_sampling_prob: f64::from(eighths) / 8.0,
            tracing_service_name,
        }
    }
}

proptest! {
    #[test]
    fn metrics_round_trip(config in metrics_config()) {
        let raw = config.to_json().unwrap();
        let reloaded = MetricsConfig::load_json_with(&raw, Figment::new()).unwrap();
        prop_assert_eq!(reloaded, config);
    }

    #[test]
    fn tracing_round_trip(config in tracing_config()) {
        let raw = config.to_json().unwrap();
        let reloaded = TracingConfig::load_json_with(&raw, Figment::new()).unwrap();
        prop_assert_eq!(reloaded, config);
    }
}
