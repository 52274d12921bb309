//! Multiaddr endpoint helpers shared by the sections.

use multiaddr::Multiaddr;

use crate::ConfigError;

/// Parse an endpoint field. Every loaded endpoint must name at least one
/// protocol; an empty string is rejected like any other malformed address.
pub(crate) fn parse(field: &'static str, value: &str) -> Result<Multiaddr, ConfigError> {
    let invalid = |source| ConfigError::InvalidEndpoint {
        field,
        value: value.to_owned(),
        source,
    };

    let addr = value.parse::<Multiaddr>().map_err(invalid)?;
    if addr.is_empty() {
        return Err(invalid(multiaddr::Error::InvalidMultiaddr));
    }
    Ok(addr)
}

/// Canonical string form of an endpoint, empty when unset.
pub(crate) fn format(endpoint: Option<&Multiaddr>) -> String {
    endpoint.map(ToString::to_string).unwrap_or_default()
}
