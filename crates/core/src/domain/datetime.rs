// UtcDateTime Domain Model

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SubsecRound, TimeDelta, Timelike, Utc};
use serde::{Serialize, Serializer};

use super::calendar::{MAX_YEAR, MIN_YEAR};
use super::format::{self, Formatted, GENERIC_FORMAT};
use crate::error::{DateTimeError, Field, Result};
use crate::port::clock::{Clock, SystemClock};

/// A point in time in UTC with millisecond precision.
///
/// Instances are always valid: every constructor validates before the value
/// exists, and there is no way to mutate one afterwards. The supported year
/// range is [1, 9999].
///
/// Ordering, equality and hashing all compare the stored instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime {
    // Invariant: sub-millisecond part is always zero
    instant: DateTime<Utc>,
}

impl UtcDateTime {
    /// Current UTC time, truncated to whole milliseconds
    pub fn now() -> Self {
        Self::now_from(&SystemClock)
    }

    /// Same as [`UtcDateTime::now`]
    pub fn utc_now() -> Self {
        Self::now()
    }

    /// Capture the current time from an injected clock (truncated, never rounded)
    pub fn now_from(clock: &dyn Clock) -> Self {
        Self {
            instant: clock.now().trunc_subsecs(3),
        }
    }

    /// Create a date-time from UTC components
    ///
    /// # Arguments
    ///
    /// * `year` - in [1, 9999]
    /// * `month` - in [1, 12]
    /// * `day` - in [1, 31] and valid for the given month and year
    /// * `hour` - in [0, 23]
    /// * `minute` - in [0, 59]
    /// * `second` - in [0, 59]
    /// * `millisecond` - in [0, 1000), fractional part is truncated
    ///
    /// # Errors
    ///
    /// Fields are checked in the order above and the first failure is
    /// returned as [`DateTimeError::FieldOutOfRange`]. A day that does not
    /// exist in the month (e.g. February 30) is
    /// [`DateTimeError::InvalidCalendarDate`].
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: f64,
    ) -> Result<Self> {
        check_range(Field::Year, year, MIN_YEAR, MAX_YEAR)?;
        check_range(Field::Month, month, 1, 12)?;
        check_range(Field::Day, day, 1, 31)?;
        check_range(Field::Hour, hour, 0, 23)?;
        check_range(Field::Minute, minute, 0, 59)?;
        check_range(Field::Second, second, 0, 59)?;
        // Also rejects NaN
        if !(0.0..1000.0).contains(&millisecond) {
            return Err(DateTimeError::FieldOutOfRange {
                field: Field::Millisecond,
                value: millisecond,
            });
        }

        // Coarse bounds hold, so only a day past the end of the month fails here
        let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
            .ok_or(DateTimeError::InvalidCalendarDate { year, month, day })?;

        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let time_of_day = TimeDelta::hours(i64::from(hour))
            + TimeDelta::minutes(i64::from(minute))
            + TimeDelta::seconds(i64::from(second))
            + TimeDelta::milliseconds(millisecond as i64);

        Ok(Self {
            instant: midnight + time_of_day,
        })
    }

    /// Create a date-time with a zero millisecond component
    pub fn from_ymd_hms(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<Self> {
        Self::new(year, month, day, hour, minute, second, 0.0)
    }

    // ---- Date components ----

    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    pub fn month(&self) -> i32 {
        self.instant.month() as i32
    }

    pub fn day(&self) -> i32 {
        self.instant.day() as i32
    }

    pub fn weekday(&self) -> chrono::Weekday {
        self.instant.weekday()
    }

    /// Day of the year, 1..=366
    pub fn ordinal(&self) -> i32 {
        self.instant.ordinal() as i32
    }

    /// ISO 8601 week and week-based year
    pub fn iso_week(&self) -> chrono::IsoWeek {
        self.instant.iso_week()
    }

    // ---- Time components ----

    pub fn hour(&self) -> i32 {
        self.instant.hour() as i32
    }

    pub fn minute(&self) -> i32 {
        self.instant.minute() as i32
    }

    pub fn second(&self) -> i32 {
        self.instant.second() as i32
    }

    /// Sub-second remainder in milliseconds, 0 <= value < 1000
    pub fn millisecond(&self) -> f64 {
        f64::from(self.instant.timestamp_subsec_millis())
    }

    // ---- Conversions ----

    /// Whole seconds since 1970-01-01T00:00:00Z, sub-second part dropped (toward zero)
    pub fn unix_timestamp(&self) -> i64 {
        self.instant.timestamp_millis() / 1000
    }

    /// Milliseconds since 1970-01-01T00:00:00Z
    pub fn unix_timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// Render with a strftime-style template
    ///
    /// The template is checked in full before anything is written, so the
    /// result is either the complete string or [`DateTimeError::InvalidFormat`].
    ///
    /// # Example
    /// ```
    /// # use tempora_core::UtcDateTime;
    /// let dt = UtcDateTime::new(2020, 9, 11, 14, 5, 55, 123.0).unwrap();
    /// assert_eq!(dt.to_formatted_string("%F %T").unwrap(), "2020-09-11 14:05:55.123");
    /// ```
    pub fn to_formatted_string(&self, template: &str) -> Result<String> {
        format::render(self, template)
    }

    /// Lazy rendering for use with `format!` and friends
    ///
    /// An invalid template makes the surrounding `format!` fail with
    /// `fmt::Error`; use [`UtcDateTime::to_formatted_string`] for a typed error.
    pub fn format<'a>(&self, template: &'a str) -> Formatted<'a> {
        Formatted::new(*self, template)
    }

    /// Lazy rendering with the generic default template `%d-%m-%Y %H:%M:%S`
    ///
    /// Note this differs from `Display`, which renders ISO 8601.
    pub fn formatted(&self) -> Formatted<'static> {
        Formatted::new(*self, GENERIC_FORMAT)
    }
}

fn check_range(field: Field, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(DateTimeError::FieldOutOfRange {
            field,
            value: f64::from(value),
        });
    }
    Ok(())
}

/// ISO 8601, e.g. `2024-06-15T12:30:45.500Z`
impl std::fmt::Display for UtcDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second(),
            self.instant.timestamp_subsec_millis()
        )
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
