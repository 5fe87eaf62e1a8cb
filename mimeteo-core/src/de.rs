//! Deserialization helpers that turn shape mismatches into absence.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional value, yielding `None` when the JSON is present
/// but does not match `T`.
///
/// Use together with `#[serde(default)]` so a missing key also yields `None`.
///
/// # Errors
///
/// Only fails when the underlying input is not valid JSON at all.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| serde_json::from_value(raw).ok()))
}
