// Domain Layer - UTC date-time value, calendar rules, rendering

pub mod calendar;
pub mod datetime;
pub mod format;

// Re-exports
pub use calendar::{days_in_month, is_leap_year, MAX_YEAR, MIN_YEAR};
pub use datetime::UtcDateTime;
pub use format::{Formatted, GENERIC_FORMAT};
