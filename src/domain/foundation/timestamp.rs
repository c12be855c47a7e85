//! Timestamp value object and the service calendar.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Calendar date of this instant at the given UTC offset.
    pub fn date_at(&self, offset: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&offset).date_naive()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// Decides which calendar day "today" is for quota accounting.
///
/// Daily quotas roll over at local midnight of the service time zone,
/// not at UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCalendar {
    offset: FixedOffset,
}

impl ServiceCalendar {
    const VIETNAM_OFFSET_HOURS: i32 = 7;

    /// Creates a calendar for a whole-hour UTC offset (-12..=14).
    pub fn with_offset_hours(hours: i32) -> Result<Self, ValidationError> {
        if !(-12..=14).contains(&hours) {
            return Err(ValidationError::out_of_range(
                "utc_offset_hours",
                -12,
                14,
                i64::from(hours),
            ));
        }
        FixedOffset::east_opt(hours * 3600)
            .map(|offset| Self { offset })
            .ok_or_else(|| ValidationError::invalid_format("utc_offset_hours", "invalid offset"))
    }

    /// Asia/Ho_Chi_Minh (UTC+07:00, no daylight saving).
    pub fn vietnam() -> Self {
        Self::with_offset_hours(Self::VIETNAM_OFFSET_HOURS)
            .unwrap_or(Self { offset: Utc.fix() })
    }

    /// The offset this calendar uses.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current service date.
    pub fn today(&self) -> NaiveDate {
        self.date_of(&Timestamp::now())
    }

    /// Service date of a given instant.
    pub fn date_of(&self, ts: &Timestamp) -> NaiveDate {
        ts.date_at(self.offset)
    }
}

impl Default for ServiceCalendar {
    fn default() -> Self {
        Self::vietnam()
    }
}
