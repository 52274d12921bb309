//! The contract shared by every observations configuration section.

use figment::{providers::Serialized, Figment, Provider};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use validator::Validate;

use crate::provider::{EnvField, EnvOverrides};
use crate::ConfigError;

/// A named, independently loadable configuration section.
///
/// [`Default`] seeds the compiled defaults and [`Validate`] performs the
/// semantic checks. The provided methods run the shared load pipeline:
///
/// 1. Decode the JSON document into [`Section::Repr`]. Keys missing from the
///    document keep their compiled defaults.
/// 2. Merge environment overrides on top of the decoded values.
/// 3. Convert the representation into typed fields ([`Section::from_repr`]).
/// 4. Validate.
pub trait Section: Default + Validate + Sized {
    /// Key under which the host document stores this section.
    const CONFIG_KEY: &'static str;

    /// Environment variables that may override fields of this section.
    const ENV_FIELDS: &'static [EnvField];

    /// JSON shape of the section. Its [`Default`] must describe the compiled
    /// defaults so that absent keys fall back to them.
    type Repr: Serialize + DeserializeOwned + Default;

    /// Convert typed fields into their JSON representation.
    fn to_repr(&self) -> Self::Repr;

    /// Parse a JSON representation into typed fields without validating.
    fn from_repr(repr: Self::Repr) -> Result<Self, ConfigError>;

    /// Key identifying this section, [`Section::CONFIG_KEY`].
    fn config_key(&self) -> &'static str {
        Self::CONFIG_KEY
    }

    /// Load the section from JSON, applying `CLUSTER_OBSERVATIONS_*`
    /// environment overrides.
    fn load_json(raw: &[u8]) -> Result<Self, ConfigError> {
        Self::load_json_with(raw, EnvOverrides::new(Self::ENV_FIELDS))
    }

    /// Load the section from JSON with an explicit override source.
    ///
    /// Values produced by `overrides` take precedence over the document.
    fn load_json_with<P: Provider>(raw: &[u8], overrides: P) -> Result<Self, ConfigError> {
        let repr: Self::Repr = serde_json::from_slice(raw).map_err(|source| {
            error!(section = Self::CONFIG_KEY, %source, "Error unmarshaling observations config");
            ConfigError::Decode {
                section: Self::CONFIG_KEY,
                source,
            }
        })?;

        let repr: Self::Repr = Figment::from(Serialized::defaults(repr))
            .merge(overrides)
            .extract()
            .map_err(ConfigError::Override)?;

        let config = Self::from_repr(repr)?;
        config.validate()?;
        debug!(section = Self::CONFIG_KEY, "loaded observations config");
        Ok(config)
    }

    /// Serialize the section as indented JSON.
    fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        serde_json::to_vec_pretty(&self.to_repr()).map_err(ConfigError::Encode)
    }
}
