//! Lenient decoding for backend values

use serde::Deserialize;
use serde::Deserializer;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Decodes a boolean flag sent as `true`, `1`, `"1"`, `"true"` or `"si"`.
///
/// `null` and anything unrecognised decode as `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFlag>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawFlag::Bool(value)) => value,
        Some(RawFlag::Int(value)) => value != 0,
        Some(RawFlag::Text(value)) => matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "si" | "sí"
        ),
        None => false,
    })
}
