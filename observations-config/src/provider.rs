//! Environment override provider.

use std::fmt::Display;
use std::str::FromStr;

use figment::{
    providers::Env,
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use serde::{Deserialize, Deserializer};

/// Prefix shared by every observations override variable.
pub const ENV_PREFIX: &str = "CLUSTER_OBSERVATIONS_";

/// Binding between an environment variable suffix and a JSON key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvField {
    /// Variable name after [`ENV_PREFIX`], matched case-insensitively.
    pub name: &'static str,
    /// Key in the section's JSON document.
    pub key: &'static str,
}

impl EnvField {
    /// Bind the variable `name` to the JSON `key`.
    pub const fn new(name: &'static str, key: &'static str) -> Self {
        Self { name, key }
    }
}

/// Reads `CLUSTER_OBSERVATIONS_<NAME>` variables for one section's fields.
///
/// Variables that do not belong to the section are ignored, so both sections
/// can share the prefix.
#[derive(Debug, Clone)]
pub struct EnvOverrides {
    prefix: &'static str,
    fields: &'static [EnvField],
}

impl EnvOverrides {
    /// Overrides read under [`ENV_PREFIX`].
    pub fn new(fields: &'static [EnvField]) -> Self {
        Self::with_prefix(ENV_PREFIX, fields)
    }

    /// Overrides read under a custom prefix.
    pub fn with_prefix(prefix: &'static str, fields: &'static [EnvField]) -> Self {
        Self { prefix, fields }
    }

    fn env(&self) -> Env {
        let fields = self.fields;
        Env::prefixed(self.prefix).filter_map(move |name| {
            fields
                .iter()
                .find(|field| name.as_str().eq_ignore_ascii_case(field.name))
                .map(|field| field.key.into())
        })
    }
}

impl Provider for EnvOverrides {
    fn metadata(&self) -> Metadata {
        self.env().metadata()
    }

    /// Values are handed over as raw strings, so a string field accepts
    /// `12345` or `true` verbatim. Typed fields parse them on extraction.
    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let env = self.env();
        let dict: Dict = env
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), Value::from(value)))
            .collect();

        let mut data = Map::new();
        data.insert(Profile::Default, dict);
        Ok(data)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar<T> {
    Native(T),
    Text(String),
}

fn from_scalar<'de, D, T, F, E>(deserializer: D, parse: F) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
    F: FnOnce(&str) -> Result<T, E>,
    E: Display,
{
    match Scalar::<T>::deserialize(deserializer)? {
        Scalar::Native(value) => Ok(value),
        Scalar::Text(text) => parse(text.trim()).map_err(serde::de::Error::custom),
    }
}

/// Accept a boolean or its textual form (`true`, `1`, `T`, `false`, ...).
pub(crate) fn bool_or_text<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    from_scalar(deserializer, |text| match text.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(format!("invalid boolean {text:?}")),
    })
}

/// Accept a number or its textual form.
pub(crate) fn f64_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    from_scalar(deserializer, f64::from_str)
}
