//! UTC timestamp type used for storage and on the wire.

use std::fmt::Display;
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision.
///
/// Wraps `time::PrimitiveDateTime` so SQLite stores a plain, sortable text
/// timestamp, while serialization always speaks RFC3339. All values are UTC;
/// offsets are normalized away on construction.
///
/// # Examples
///
/// ```
/// # use mkt_sqlite::types::DateTime;
/// let now = DateTime::from(time::OffsetDateTime::now_utc());
/// println!("{now}"); // RFC3339
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "Rfc3339Stamp", into = "Rfc3339Stamp")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: time::OffsetDateTime = (*self).into();
        let text = value.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<time::OffsetDateTime> for DateTime {
    fn from(value: time::OffsetDateTime) -> Self {
        let utc = value.to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

// Helper type pinning (de)serialization to RFC3339.

#[derive(serde::Serialize, serde::Deserialize)]
struct Rfc3339Stamp(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<Rfc3339Stamp> for DateTime {
    fn from(value: Rfc3339Stamp) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for Rfc3339Stamp {
    fn from(value: DateTime) -> Self {
        Self(value.into())
    }
}
