// Central Error Type for date-time construction and rendering

use thiserror::Error;

/// Calendar or clock component checked during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Field {
    /// Human-readable accepted range (coarse bound, day is checked again per month)
    pub fn bounds(&self) -> &'static str {
        match self {
            Field::Year => "[1, 9999]",
            Field::Month => "[1, 12]",
            Field::Day => "[1, 31]",
            Field::Hour => "[0, 23]",
            Field::Minute => "[0, 59]",
            Field::Second => "[0, 59]",
            Field::Millisecond => "[0, 1000)",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Year => write!(f, "year"),
            Field::Month => write!(f, "month"),
            Field::Day => write!(f, "day"),
            Field::Hour => write!(f, "hour"),
            Field::Minute => write!(f, "minute"),
            Field::Second => write!(f, "second"),
            Field::Millisecond => write!(f, "millisecond"),
        }
    }
}

/// Discriminant of [`DateTimeError`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FieldOutOfRange,
    InvalidCalendarDate,
    InvalidFormat,
}

/// Date-time error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateTimeError {
    #[error("{field} out of range: {value} (expected {})", .field.bounds())]
    FieldOutOfRange { field: Field, value: f64 },

    #[error("invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: i32, day: i32 },

    #[error("invalid date-time format string: {template:?}")]
    InvalidFormat { template: String },
}

impl DateTimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DateTimeError::FieldOutOfRange { .. } => ErrorKind::FieldOutOfRange,
            DateTimeError::InvalidCalendarDate { .. } => ErrorKind::InvalidCalendarDate,
            DateTimeError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
        }
    }

    /// Field that failed its range check, if this is a range failure
    pub fn field(&self) -> Option<Field> {
        match self {
            DateTimeError::FieldOutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Result type alias using DateTimeError
pub type Result<T> = std::result::Result<T, DateTimeError>;
