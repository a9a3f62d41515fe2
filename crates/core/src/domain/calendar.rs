// Proleptic Gregorian calendar rules

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Indexed from Monday, matching chrono::Weekday::num_days_from_monday
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Divisible by 4 and (not by 100, or by 400)
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, `None` when month is outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let index = month.checked_sub(1)? as usize;
    let days = *DAYS_IN_MONTH.get(index)?;
    if month == 2 && is_leap_year(year) {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// Full English month name; `month` must be in 1..=12
pub(crate) fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

/// Three-letter month abbreviation
pub(crate) fn month_abbrev(month: u32) -> &'static str {
    &month_name(month)[..3]
}

pub(crate) fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

pub(crate) fn weekday_abbrev(weekday: chrono::Weekday) -> &'static str {
    &weekday_name(weekday)[..3]
}
