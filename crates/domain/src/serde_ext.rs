//! Lenient deserializers for data coming back from the persistence service.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Distinguishes a present `null` from a missing field.
///
/// Paired with `#[serde(default)]`: a missing field stays `None`, an explicit
/// `null` becomes `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accepts either a JSON string or a JSON number as an identifier.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}

/// Accepts RFC 3339 timestamps as well as naive ISO and SQL-style ones.
///
/// Timestamps without an offset are read as UTC.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Accepts any JSON number (or null) as a millisecond/byte count.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(f64_to_u64))
            .ok_or_else(|| {
                serde::de::Error::custom(format!("expected non-negative number, found {n}"))
            }),
        other => Err(serde::de::Error::custom(format!(
            "expected number, found {other}"
        ))),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f64_to_u64(value: f64) -> u64 {
    value.round() as u64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let noon = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_datetime("2024-05-01T12:00:00Z"), Some(noon));
        assert_eq!(parse_datetime("2024-05-01T14:00:00+02:00"), Some(noon));
        assert_eq!(parse_datetime("2024-05-01 12:00:00"), Some(noon));
        assert_eq!(
            parse_datetime("2024-05-01T12:00:00.123456"),
            Some(noon + chrono::Duration::microseconds(123_456))
        );
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime("2024-05-01"), None);
    }
}
