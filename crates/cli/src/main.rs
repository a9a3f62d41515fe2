//! Tempora CLI - Command-line harness for the UTC date-time value

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tabled::{Table, Tabled};
use tempora_core::UtcDateTime;
use tracing::{debug, info, warn};

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(name = "tempora")]
#[command(about = "Tempora UTC date-time CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log output format
    #[arg(
        long,
        global = true,
        env = "TEMPORA_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current UTC time
    Now {
        /// strftime-style template (default: ISO 8601)
        #[arg(short, long, env = "TEMPORA_FORMAT")]
        format: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a date-time from components and print it
    #[command(allow_negative_numbers = true)]
    Show {
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,

        /// Millisecond component, fractional part is truncated
        #[arg(long, default_value_t = 0.0)]
        millis: f64,

        /// strftime-style template (default: ISO 8601)
        #[arg(short, long, env = "TEMPORA_FORMAT")]
        format: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two date-times given as Y,M,D,h,m,s[,ms]
    #[command(allow_negative_numbers = true)]
    Compare {
        #[arg(value_parser = parse_components)]
        left: UtcDateTime,

        #[arg(value_parser = parse_components)]
        right: UtcDateTime,
    },

    /// Walk through construction, comparison and formatting
    Demo,
}

#[derive(Tabled)]
struct ComponentRow {
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    millisecond: f64,
    unix_timestamp: i64,
}

impl From<&UtcDateTime> for ComponentRow {
    fn from(dt: &UtcDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            millisecond: dt.millisecond(),
            unix_timestamp: dt.unix_timestamp(),
        }
    }
}

/// Parse `Y,M,D,h,m,s[,ms]` into a validated date-time
fn parse_components(raw: &str) -> std::result::Result<UtcDateTime, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if !(6..=7).contains(&parts.len()) {
        return Err(format!("expected Y,M,D,h,m,s[,ms], got {:?}", raw));
    }

    let mut fields = [0i32; 6];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid component {:?}: {}", part, e))?;
    }
    let millis = match parts.get(6) {
        Some(part) => part
            .parse::<f64>()
            .map_err(|e| format!("invalid millisecond {:?}: {}", part, e))?,
        None => 0.0,
    };

    let [year, month, day, hour, minute, second] = fields;
    UtcDateTime::new(year, month, day, hour, minute, second, millis).map_err(|e| e.to_string())
}

fn render(dt: &UtcDateTime, format: Option<&str>) -> Result<String> {
    match format {
        Some(template) => dt
            .to_formatted_string(template)
            .with_context(|| format!("Cannot render with template {:?}", template)),
        None => Ok(dt.to_string()),
    }
}

fn print_datetime(dt: &UtcDateTime, format: Option<&str>, as_json: bool) -> Result<()> {
    let rendered = render(dt, format)?;

    if as_json {
        let value = json!({
            "iso": dt,
            "formatted": rendered,
            "unix_timestamp": dt.unix_timestamp(),
            "unix_timestamp_millis": dt.unix_timestamp_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", rendered.green().bold());
    }
    Ok(())
}

fn print_comparisons(left: &UtcDateTime, right: &UtcDateTime) {
    let mark = |holds: bool| if holds { "true".green() } else { "false".red() };

    println!("  {} {}", "a:".bold(), left);
    println!("  {} {}", "b:".bold(), right);
    println!();
    println!("  a == b  {}", mark(left == right));
    println!("  a != b  {}", mark(left != right));
    println!("  a <  b  {}", mark(left < right));
    println!("  a <= b  {}", mark(left <= right));
    println!("  a >  b  {}", mark(left > right));
    println!("  a >= b  {}", mark(left >= right));
}

fn run_demo() -> Result<()> {
    println!("{}", "Current time".cyan().bold());
    let now = UtcDateTime::now();
    let utc_now = UtcDateTime::utc_now();
    println!("  {} {}", "now():".bold(), now);
    println!("  {} {}", "utc_now():".bold(), utc_now);
    println!();

    println!("{}", "Explicit components".cyan().bold());
    let specific = UtcDateTime::new(2024, 6, 15, 12, 30, 45, 500.0)
        .context("Demo components should be valid")?;
    println!("  {}", specific);
    println!("{}", Table::new([ComponentRow::from(&specific)]));
    println!();

    println!("{}", "Rejected components".cyan().bold());
    for (label, result) in [
        ("February 30", UtcDateTime::from_ymd_hms(2024, 2, 30, 10, 0, 0)),
        ("25 hours", UtcDateTime::from_ymd_hms(2024, 6, 15, 25, 0, 0)),
    ] {
        match result {
            Ok(dt) => warn!(%dt, "Expected {} to be rejected", label),
            Err(e) => println!("  {} {}: {}", "✗".red(), label, e),
        }
    }
    println!();

    println!("{}", "Comparison".cyan().bold());
    let a = UtcDateTime::from_ymd_hms(2024, 6, 15, 12, 30, 45)?;
    let b = UtcDateTime::from_ymd_hms(2024, 6, 15, 13, 0, 0)?;
    print_comparisons(&a, &b);
    println!();

    println!("{}", "Formatting".cyan().bold());
    println!("  {} {}", "ISO 8601:".bold(), now);
    println!(
        "  {} {}",
        "\"%Y-%m-%d %H:%M:%S\":".bold(),
        now.to_formatted_string("%Y-%m-%d %H:%M:%S")?
    );
    println!("  {} {}", "\"%A, %e %B %Y\":".bold(), now.format("%A, %e %B %Y"));
    println!("  {} {}", "generic default:".bold(), now.formatted());
    println!();

    println!("{}", "Unix timestamp".cyan().bold());
    println!("  {} {}", "seconds:".bold(), now.unix_timestamp());
    println!("  {} {}", "milliseconds:".bold(), now.unix_timestamp_millis());

    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Now { format, json } => {
            let now = UtcDateTime::now();
            debug!(unix_millis = now.unix_timestamp_millis(), "Captured current time");
            print_datetime(&now, format.as_deref(), json)?;
        }

        Commands::Show {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millis,
            format,
            json,
        } => {
            let dt = UtcDateTime::new(year, month, day, hour, minute, second, millis)
                .context("Invalid date-time components")?;
            print_datetime(&dt, format.as_deref(), json)?;
            if !json {
                println!();
                println!("{}", Table::new([ComponentRow::from(&dt)]));
            }
        }

        Commands::Compare { left, right } => {
            println!("{}", "Comparison".cyan().bold());
            println!();
            print_comparisons(&left, &right);
        }

        Commands::Demo => {
            info!("Running demo v{}", tempora_core::VERSION);
            run_demo()?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let result = run(cli.command);
    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "Command failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components_without_millis() {
        let dt = parse_components("2020,9,11,14,5,55").unwrap();
        assert_eq!(dt.to_string(), "2020-09-11T14:05:55.000Z");
    }

    #[test]
    fn test_parse_components_with_millis_and_spaces() {
        let dt = parse_components("2020, 9, 11, 14, 5, 55, 123.9").unwrap();
        assert_eq!(dt.millisecond(), 123.0);
    }

    #[test]
    fn test_parse_components_wrong_arity() {
        let err = parse_components("2020,9,11").unwrap_err();
        assert!(err.contains("expected"));
    }

    #[test]
    fn test_parse_components_not_a_number() {
        let err = parse_components("2020,9,eleven,14,5,55").unwrap_err();
        assert!(err.contains("eleven"));
    }

    #[test]
    fn test_parse_components_reports_domain_error() {
        let err = parse_components("2024,2,30,0,0,0").unwrap_err();
        assert!(err.contains("invalid calendar date"));

        let err = parse_components("2024,6,15,-1,0,0").unwrap_err();
        assert!(err.contains("hour out of range"));
    }

    #[test]
    fn test_render_bad_template() {
        let dt = parse_components("2020,9,11,14,5,55").unwrap();
        let err = render(&dt, Some("%Q")).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid date-time format string"));
    }

    #[test]
    fn test_render_defaults_to_iso() {
        let dt = parse_components("2020,9,11,14,5,55,123").unwrap();
        assert_eq!(render(&dt, None).unwrap(), "2020-09-11T14:05:55.123Z");
        assert_eq!(render(&dt, Some("%F")).unwrap(), "2020-09-11");
    }

    #[test]
    fn test_component_row() {
        let dt = parse_components("2020,9,11,14,5,55,123").unwrap();
        let row = ComponentRow::from(&dt);
        assert_eq!(row.unix_timestamp, 1_599_833_155);
        assert_eq!(row.millisecond, 123.0);
    }

    #[test]
    fn test_cli_parses_show_with_negative_hour() {
        let cli = Cli::try_parse_from(["tempora", "show", "2024", "6", "15", "-1", "0", "0"]).unwrap();
        match cli.command {
            Commands::Show { hour, .. } => assert_eq!(hour, -1),
            _ => panic!("expected show"),
        }
    }
}
