//! Timestamp parsing and precision.
//!
//! Clients send RFC 3339 timestamps or plain `YYYY-MM-DD` dates; the latter
//! mean midnight UTC. Everything is kept at millisecond precision because
//! that is what BSON datetimes store.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Current time truncated to milliseconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(3));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("'{raw}' is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}

/// `deserialize_with` for required timestamp fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(D::Error::custom)
}

/// `deserialize_with` for optional timestamp fields; blank counts as absent.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse(&raw))
        .transpose()
        .map_err(D::Error::custom)
}
