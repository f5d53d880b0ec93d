//! Lenient timestamp decoding.
//!
//! The backend serializes `datetime` values through its JSON encoder, which
//! yields RFC 2822 strings, while other deployments emit Unix milliseconds.
//! Both are kept as opaque display strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Decode an optional timestamp that may be a string, a number, or `null`.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTime>::deserialize(deserializer)?;
    Ok(raw.map(|time| match time {
        RawTime::Text(text) => text,
        RawTime::Integer(value) => value.to_string(),
        RawTime::Float(value) => value.to_string(),
    }))
}
