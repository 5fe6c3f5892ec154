//! Timestamp helpers
//!
//! The export stores times as decimal epoch seconds; the catalog speaks
//! RFC 3339 with millisecond precision. Everything here works in UTC.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by the catalog's `takenAfter` / `takenBefore` filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a decimal epoch-seconds string (`"1685613600"`).
pub fn parse_epoch(value: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidEpoch(value.to_string()))?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::InvalidEpoch(value.to_string()))
}

/// Parse a catalog timestamp such as `2022-01-02T00:10:00.000Z`.
pub fn parse_catalog_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidCatalogTime(value.to_string()))
}

/// Render a timestamp the way the catalog stores `dateTimeOriginal`:
/// second precision, zero milliseconds, `Z` suffix.
pub fn format_catalog_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
}

/// UTC calendar day of a timestamp.
pub fn utc_day(value: &DateTime<Utc>) -> NaiveDate {
    value.date_naive()
}

pub fn same_utc_day(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    utc_day(a) == utc_day(b)
}

/// Inclusive capture-date window passed to the catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub after: NaiveDate,
    pub before: NaiveDate,
}

impl DateWindow {
    /// `[taken - 1 day, created + 1 day]`, both truncated to UTC dates.
    ///
    /// Fails when either bound falls outside the representable range.
    pub fn around(taken: &DateTime<Utc>, created: &DateTime<Utc>) -> Result<Self> {
        let after = taken
            .checked_sub_signed(Duration::days(1))
            .ok_or_else(|| Error::InvalidEpoch(taken.timestamp().to_string()))?;
        let before = created
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| Error::InvalidEpoch(created.timestamp().to_string()))?;
        Ok(Self {
            after: utc_day(&after),
            before: utc_day(&before),
        })
    }

    pub fn after_param(&self) -> String {
        self.after.format(DATE_FORMAT).to_string()
    }

    pub fn before_param(&self) -> String {
        self.before.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.after_param(), self.before_param())
    }
}

/// `takenAfter` / `takenBefore` bounds covering one whole UTC day.
pub fn day_bounds(date: NaiveDate) -> (String, String) {
    let day = date.format(DATE_FORMAT);
    (format!("{}T00:00:00Z", day), format!("{}T23:59:59Z", day))
}
