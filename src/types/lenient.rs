//! Forgiving field deserializers for records that arrive from import documents.

use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Reads a string, treating `null` as the empty string.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads any JSON number as `i64`, truncating fractions and saturating at
/// the bounds. `null` reads as 0; non-numbers are still rejected.
pub(crate) fn number_as_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Number>::deserialize(deserializer)?
        .map(|n| truncate(&n))
        .unwrap_or_default())
}

fn truncate(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if n.as_u64().is_some() {
        i64::MAX
    } else {
        // `as` saturates on overflow.
        n.as_f64().map_or(0, |f| f as i64)
    }
}
