// strftime-style rendering for UtcDateTime
//
// Templates are tokenized up front so a bad placeholder is reported before
// any output is produced.

use std::fmt::{self, Write};

use super::calendar;
use super::datetime::UtcDateTime;
use crate::error::{DateTimeError, Result};

/// Default template of the generic formatter (`UtcDateTime::formatted`)
pub const GENERIC_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Placeholder recognized after a `%`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spec {
    Year,           // %Y
    YearShort,      // %y
    Century,        // %C
    Month,          // %m
    MonthAbbrev,    // %b, %h
    MonthName,      // %B
    Day,            // %d
    DayPadded,      // %e
    DayOfYear,      // %j
    Hour24,         // %H
    Hour12,         // %I
    Minute,         // %M
    Second,         // %S, always with .mmm
    AmPm,           // %p
    WeekdayAbbrev,  // %a
    WeekdayName,    // %A
    IsoWeekday,     // %u
    Weekday,        // %w
    IsoDate,        // %F
    Time,           // %T
    HourMinute,     // %R
    UsDate,         // %D
    Offset,         // %z
    Zone,           // %Z
    Percent,        // %%
    Newline,        // %n
    Tab,            // %t
    Time12,         // %r
    DateTime,       // %c
    LocaleDate,     // %x
    LocaleTime,     // %X
    WeekOfYearSun,  // %U
    WeekOfYearMon,  // %W
    IsoWeek,        // %V
    IsoYear,        // %G
    IsoYearShort,   // %g
    OffsetColon,    // %Ez, %Oz
}

impl Spec {
    fn from_char(c: char) -> Option<Self> {
        let spec = match c {
            'Y' => Spec::Year,
            'y' => Spec::YearShort,
            'C' => Spec::Century,
            'm' => Spec::Month,
            'b' | 'h' => Spec::MonthAbbrev,
            'B' => Spec::MonthName,
            'd' => Spec::Day,
            'e' => Spec::DayPadded,
            'j' => Spec::DayOfYear,
            'H' => Spec::Hour24,
            'I' => Spec::Hour12,
            'M' => Spec::Minute,
            'S' => Spec::Second,
            'p' => Spec::AmPm,
            'a' => Spec::WeekdayAbbrev,
            'A' => Spec::WeekdayName,
            'u' => Spec::IsoWeekday,
            'w' => Spec::Weekday,
            'F' => Spec::IsoDate,
            'T' => Spec::Time,
            'R' => Spec::HourMinute,
            'D' => Spec::UsDate,
            'z' => Spec::Offset,
            'Z' => Spec::Zone,
            '%' => Spec::Percent,
            'n' => Spec::Newline,
            't' => Spec::Tab,
            'r' => Spec::Time12,
            'c' => Spec::DateTime,
            'x' => Spec::LocaleDate,
            'X' => Spec::LocaleTime,
            'U' => Spec::WeekOfYearSun,
            'W' => Spec::WeekOfYearMon,
            'V' => Spec::IsoWeek,
            'G' => Spec::IsoYear,
            'g' => Spec::IsoYearShort,
            _ => return None,
        };
        Some(spec)
    }

    /// `%E` / `%O` alternative forms; the C locale renders them unmodified,
    /// except the offset which gains a colon
    fn from_modified(modifier: char, c: char) -> Option<Self> {
        let allowed = match modifier {
            'E' => "cCxXyYz",
            'O' => "deHImMSuUVwWyz",
            _ => return None,
        };
        if !allowed.contains(c) {
            return None;
        }
        if c == 'z' {
            return Some(Spec::OffsetColon);
        }
        Self::from_char(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item<'a> {
    Literal(&'a str),
    Spec(Spec),
}

fn parse(template: &str) -> Result<Vec<Item<'_>>> {
    let invalid = || DateTimeError::InvalidFormat {
        template: template.to_string(),
    };

    let mut items = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices();

    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        if literal_start < pos {
            items.push(Item::Literal(&template[literal_start..pos]));
        }
        let (mut next_pos, mut spec_char) = chars.next().ok_or_else(invalid)?;
        let spec = if matches!(spec_char, 'E' | 'O') {
            let modifier = spec_char;
            (next_pos, spec_char) = chars.next().ok_or_else(invalid)?;
            Spec::from_modified(modifier, spec_char)
        } else {
            Spec::from_char(spec_char)
        };
        items.push(Item::Spec(spec.ok_or_else(invalid)?));
        literal_start = next_pos + spec_char.len_utf8();
    }

    if literal_start < template.len() {
        items.push(Item::Literal(&template[literal_start..]));
    }
    Ok(items)
}

fn write_spec<W: Write>(out: &mut W, dt: &UtcDateTime, spec: Spec) -> fmt::Result {
    match spec {
        Spec::Year => write!(out, "{:04}", dt.year()),
        Spec::YearShort => write!(out, "{:02}", dt.year() % 100),
        Spec::Century => write!(out, "{:02}", dt.year() / 100),
        Spec::Month => write!(out, "{:02}", dt.month()),
        Spec::MonthAbbrev => out.write_str(calendar::month_abbrev(dt.month() as u32)),
        Spec::MonthName => out.write_str(calendar::month_name(dt.month() as u32)),
        Spec::Day => write!(out, "{:02}", dt.day()),
        Spec::DayPadded => write!(out, "{:>2}", dt.day()),
        Spec::DayOfYear => write!(out, "{:03}", dt.ordinal()),
        Spec::Hour24 => write!(out, "{:02}", dt.hour()),
        Spec::Hour12 => {
            let hour = match dt.hour() % 12 {
                0 => 12,
                h => h,
            };
            write!(out, "{:02}", hour)
        }
        Spec::Minute => write!(out, "{:02}", dt.minute()),
        Spec::Second => write!(out, "{:02}.{:03}", dt.second(), dt.millisecond() as u32),
        Spec::AmPm => out.write_str(if dt.hour() < 12 { "AM" } else { "PM" }),
        Spec::WeekdayAbbrev => out.write_str(calendar::weekday_abbrev(dt.weekday())),
        Spec::WeekdayName => out.write_str(calendar::weekday_name(dt.weekday())),
        Spec::IsoWeekday => write!(out, "{}", dt.weekday().number_from_monday()),
        Spec::Weekday => write!(out, "{}", dt.weekday().num_days_from_sunday()),
        Spec::IsoDate => {
            write_spec(out, dt, Spec::Year)?;
            out.write_char('-')?;
            write_spec(out, dt, Spec::Month)?;
            out.write_char('-')?;
            write_spec(out, dt, Spec::Day)
        }
        Spec::Time => {
            write_spec(out, dt, Spec::HourMinute)?;
            out.write_char(':')?;
            write_spec(out, dt, Spec::Second)
        }
        Spec::HourMinute => {
            write_spec(out, dt, Spec::Hour24)?;
            out.write_char(':')?;
            write_spec(out, dt, Spec::Minute)
        }
        Spec::UsDate => {
            write_spec(out, dt, Spec::Month)?;
            out.write_char('/')?;
            write_spec(out, dt, Spec::Day)?;
            out.write_char('/')?;
            write_spec(out, dt, Spec::YearShort)
        }
        Spec::Offset => out.write_str("+0000"),
        Spec::Zone => out.write_str("UTC"),
        Spec::Percent => out.write_char('%'),
        Spec::Newline => out.write_char('\n'),
        Spec::Tab => out.write_char('\t'),
        Spec::Time12 => {
            write_spec(out, dt, Spec::Hour12)?;
            out.write_char(':')?;
            write_spec(out, dt, Spec::Minute)?;
            out.write_char(':')?;
            write_spec(out, dt, Spec::Second)?;
            out.write_char(' ')?;
            write_spec(out, dt, Spec::AmPm)
        }
        Spec::DateTime => {
            write_spec(out, dt, Spec::WeekdayAbbrev)?;
            out.write_char(' ')?;
            write_spec(out, dt, Spec::MonthAbbrev)?;
            out.write_char(' ')?;
            write_spec(out, dt, Spec::DayPadded)?;
            out.write_char(' ')?;
            write_spec(out, dt, Spec::Time)?;
            out.write_char(' ')?;
            write_spec(out, dt, Spec::Year)
        }
        Spec::LocaleDate => write_spec(out, dt, Spec::UsDate),
        Spec::LocaleTime => write_spec(out, dt, Spec::Time),
        Spec::WeekOfYearSun => {
            let days_before = dt.weekday().num_days_from_sunday() as i32;
            write!(out, "{:02}", (dt.ordinal() - 1 + 7 - days_before) / 7)
        }
        Spec::WeekOfYearMon => {
            let days_before = dt.weekday().num_days_from_monday() as i32;
            write!(out, "{:02}", (dt.ordinal() - 1 + 7 - days_before) / 7)
        }
        Spec::IsoWeek => write!(out, "{:02}", dt.iso_week().week()),
        Spec::IsoYear => write!(out, "{:04}", dt.iso_week().year()),
        Spec::IsoYearShort => write!(out, "{:02}", dt.iso_week().year() % 100),
        Spec::OffsetColon => out.write_str("+00:00"),
    }
}

fn write_items<W: Write>(out: &mut W, dt: &UtcDateTime, items: &[Item<'_>]) -> fmt::Result {
    for item in items {
        match item {
            Item::Literal(text) => out.write_str(text)?,
            Item::Spec(spec) => write_spec(out, dt, *spec)?,
        }
    }
    Ok(())
}

pub(crate) fn render(dt: &UtcDateTime, template: &str) -> Result<String> {
    let items = parse(template)?;
    let mut out = String::with_capacity(template.len() * 2);
    write_items(&mut out, dt, &items).map_err(|_| DateTimeError::InvalidFormat {
        template: template.to_string(),
    })?;
    Ok(out)
}

/// A date-time paired with a template, rendered on `Display`
///
/// Returned by [`UtcDateTime::format`] and [`UtcDateTime::formatted`].
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'a> {
    datetime: UtcDateTime,
    template: &'a str,
}

impl<'a> Formatted<'a> {
    pub(crate) fn new(datetime: UtcDateTime, template: &'a str) -> Self {
        Self { datetime, template }
    }

    pub fn template(&self) -> &'a str {
        self.template
    }
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render(&self.datetime, self.template).map_err(|_| fmt::Error)?;
        f.pad(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> UtcDateTime {
        // Friday, day 255 of a leap year
        UtcDateTime::new(2020, 9, 11, 14, 5, 55, 123.0).unwrap()
    }

    fn render_ok(dt: &UtcDateTime, template: &str) -> String {
        render(dt, template).unwrap()
    }

    #[test]
    fn test_documented_example() {
        assert_eq!(render_ok(&sample(), "%Y/%m/%d %H:%M:%S"), "2020/09/11 14:05:55.123");
    }

    #[test]
    fn test_date_placeholders() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%Y"), "2020");
        assert_eq!(render_ok(&dt, "%y"), "20");
        assert_eq!(render_ok(&dt, "%C"), "20");
        assert_eq!(render_ok(&dt, "%m"), "09");
        assert_eq!(render_ok(&dt, "%b %h"), "Sep Sep");
        assert_eq!(render_ok(&dt, "%B"), "September");
        assert_eq!(render_ok(&dt, "%d"), "11");
        assert_eq!(render_ok(&dt, "%j"), "255");
        assert_eq!(render_ok(&dt, "%a %A"), "Fri Friday");
        assert_eq!(render_ok(&dt, "%u %w"), "5 5");
    }

    #[test]
    fn test_space_padded_day() {
        let dt = UtcDateTime::from_ymd_hms(2024, 6, 5, 0, 0, 0).unwrap();
        assert_eq!(render_ok(&dt, "[%e]"), "[ 5]");
        assert_eq!(render_ok(&dt, "[%d]"), "[05]");
    }

    #[test]
    fn test_time_placeholders() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%H"), "14");
        assert_eq!(render_ok(&dt, "%I %p"), "02 PM");
        assert_eq!(render_ok(&dt, "%M"), "05");
        assert_eq!(render_ok(&dt, "%S"), "55.123");
    }

    #[test]
    fn test_seconds_always_carry_millis() {
        let dt = UtcDateTime::from_ymd_hms(2024, 1, 1, 8, 0, 7).unwrap();
        assert_eq!(render_ok(&dt, "%S"), "07.000");
        assert_eq!(render_ok(&dt, "%T"), "08:00:07.000");
    }

    #[test]
    fn test_twelve_hour_clock_edges() {
        let midnight = UtcDateTime::from_ymd_hms(2024, 6, 15, 0, 30, 0).unwrap();
        assert_eq!(render_ok(&midnight, "%I:%M %p"), "12:30 AM");

        let noon = UtcDateTime::from_ymd_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(render_ok(&noon, "%I:%M %p"), "12:00 PM");

        let evening = UtcDateTime::from_ymd_hms(2024, 6, 15, 23, 59, 0).unwrap();
        assert_eq!(render_ok(&evening, "%I %p"), "11 PM");
    }

    #[test]
    fn test_composites() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%F"), "2020-09-11");
        assert_eq!(render_ok(&dt, "%T"), "14:05:55.123");
        assert_eq!(render_ok(&dt, "%R"), "14:05");
        assert_eq!(render_ok(&dt, "%D"), "09/11/20");
        assert_eq!(render_ok(&dt, "%F %T"), "2020-09-11 14:05:55.123");
    }

    #[test]
    fn test_zone_and_escapes() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%z %Z"), "+0000 UTC");
        assert_eq!(render_ok(&dt, "100%%"), "100%");
        assert_eq!(render_ok(&dt, "%Y%n%t"), "2020\n\t");
    }

    #[test]
    fn test_literals_pass_through() {
        let dt = sample();
        assert_eq!(render_ok(&dt, ""), "");
        assert_eq!(render_ok(&dt, "no placeholders"), "no placeholders");
        assert_eq!(render_ok(&dt, "année %Y, été"), "année 2020, été");
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = render(&sample(), "%Y-%Q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(
            err,
            DateTimeError::InvalidFormat {
                template: "%Y-%Q".to_string()
            }
        );
    }

    #[test]
    fn test_trailing_percent_rejected() {
        let err = render(&sample(), "%Y %").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_percent_before_multibyte_rejected() {
        assert!(render(&sample(), "%é").is_err());
    }

    #[test]
    fn test_formatted_display() {
        let dt = sample();
        assert_eq!(format!("{}", dt.format("%F")), "2020-09-11");
        assert_eq!(dt.format("%R").to_string(), "14:05");
        assert_eq!(dt.formatted().template(), GENERIC_FORMAT);
    }

    #[test]
    fn test_locale_composites() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%r"), "02:05:55.123 PM");
        assert_eq!(render_ok(&dt, "%c"), "Fri Sep 11 14:05:55.123 2020");
        assert_eq!(render_ok(&dt, "%x"), "09/11/20");
        assert_eq!(render_ok(&dt, "%X"), "14:05:55.123");
    }

    #[test]
    fn test_week_numbers() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%U"), "36");
        assert_eq!(render_ok(&dt, "%W"), "36");
        assert_eq!(render_ok(&dt, "%V"), "37");
        assert_eq!(render_ok(&dt, "%G %g"), "2020 20");
    }

    #[test]
    fn test_week_numbers_at_year_start() {
        // Friday 2021-01-01 belongs to ISO week 53 of 2020
        let dt = UtcDateTime::from_ymd_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(render_ok(&dt, "%U %W"), "00 00");
        assert_eq!(render_ok(&dt, "%V %G %g"), "53 2020 20");

        // Sunday 2023-01-01 starts week 1 when Sunday is the first day
        let dt = UtcDateTime::from_ymd_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(render_ok(&dt, "%U %W"), "01 00");
    }

    #[test]
    fn test_modified_specifiers() {
        let dt = sample();
        assert_eq!(render_ok(&dt, "%Ez"), "+00:00");
        assert_eq!(render_ok(&dt, "%Oz"), "+00:00");
        assert_eq!(render_ok(&dt, "%EY-%Om-%Od"), "2020-09-11");
        assert_eq!(render_ok(&dt, "%OH:%OM:%OS"), "14:05:55.123");
        assert_eq!(render_ok(&dt, "%Ec"), render_ok(&dt, "%c"));
        assert_eq!(render_ok(&dt, "%Ey %OV"), "20 37");
    }

    #[test]
    fn test_bad_modifier_rejected() {
        for template in ["%E", "%O", "%Ed", "%OY", "%EQ", "%E%"] {
            let err = render(&sample(), template).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{template}");
        }
    }

    #[test]
    fn test_formatted_display_honours_padding() {
        let dt = sample();
        assert_eq!(format!("[{:>12}]", dt.format("%F")), "[  2020-09-11]");
        assert_eq!(format!("[{:<12}]", dt.format("%F")), "[2020-09-11  ]");
        assert_eq!(format!("[{:*^14}]", dt.format("%F")), "[**2020-09-11**]");
    }

    #[test]
    fn test_formatted_display_reports_bad_template() {
        let dt = sample();
        let mut out = String::new();
        assert!(write!(out, "{}", dt.format("%Q")).is_err());
    }
}
