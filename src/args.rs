//! Command-line argument parsing using clap.
//!
//! Arguments: `[date]` in `YYYY-MM-DD` form, defaulting to today.

use std::collections::BTreeMap;
use std::io::IsTerminal;

use chrono::NaiveDate;
use clap::{Parser, ValueHint};

use crate::error::CalendarError;
use crate::formatter::get_system_locale;
use crate::types::{CalendarConfig, CalendarFormat, WeekStart};

#[derive(Parser, Debug)]
#[command(name = "calview")]
#[command(about = "Displays one calendar page and steps through pages", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Week starts on Sunday (default is Monday).
    #[arg(short = 's', long, help_heading = "Calendar options")]
    pub sunday: bool,

    /// Initial display format.
    #[arg(
        short = 'f',
        long,
        default_value = "month",
        help_heading = "Calendar options",
        value_name = "format"
    )]
    pub format: CalendarFormat,

    /// Formats the toggle cycles through, in order (default: all).
    #[arg(
        long,
        value_delimiter = ',',
        help_heading = "Calendar options",
        value_name = "list"
    )]
    pub formats: Option<Vec<CalendarFormat>>,

    /// Always render this format; disables the toggle.
    #[arg(long, help_heading = "Calendar options", value_name = "format")]
    pub force_format: Option<CalendarFormat>,

    /// Mark a day, as DATE=TEXT (repeatable).
    #[arg(long = "marker", help_heading = "Calendar options", value_name = "date=text")]
    pub markers: Vec<String>,

    /// Toggle the format this many times.
    #[arg(
        short = 't',
        long,
        default_value_t = 0,
        help_heading = "Navigation",
        value_name = "num"
    )]
    pub toggle: u32,

    /// Jump to the page containing today first.
    #[arg(long, help_heading = "Navigation")]
    pub today: bool,

    /// Page back this many times.
    #[arg(
        short = 'p',
        long,
        default_value_t = 0,
        help_heading = "Navigation",
        value_name = "num"
    )]
    pub prev: u32,

    /// Page forward this many times.
    #[arg(
        short = 'n',
        long,
        default_value_t = 0,
        help_heading = "Navigation",
        value_name = "num"
    )]
    pub next: u32,

    /// Select a date after paging.
    #[arg(long, help_heading = "Navigation", value_name = "date")]
    pub select: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Date to focus and select (YYYY-MM-DD).
    #[arg(index = 1, value_name = "date", value_hint = ValueHint::Other)]
    pub date_arg: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display one calendar page.

Without any arguments, display the month containing today.

Examples:
  calview                          Current month
  calview 2024-02-15               February 2024
  calview -f week 2024-08-14       Week of Aug 12 2024
  calview -f week -n 1 2024-08-14  Following week
  calview --formats month,week -t 1
                                   Toggle from month to week
  calview --select 2024-03-01 2024-02-15
                                   Select a trailing day of the grid
  calview --marker 2024-02-14=Dinner 2024-02-15";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Whether to emit ANSI colors.
    pub fn color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl CalendarConfig {
    pub fn new(args: &Args) -> Result<Self, CalendarError> {
        let today = get_today_date();

        let initial_date = args.date_arg.as_deref().map(parse_date).transpose()?;

        let available_formats = args
            .formats
            .clone()
            .unwrap_or_else(|| CalendarFormat::ALL.to_vec());

        let mut markers: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
        for raw in &args.markers {
            let (date, text) = parse_marker(raw)?;
            markers.entry(date).or_default().push(text);
        }

        Ok(CalendarConfig {
            initial_date,
            initial_format: args.format,
            available_formats,
            forced_format: args.force_format,
            week_start: if args.sunday {
                WeekStart::Sunday
            } else {
                WeekStart::Monday
            },
            today,
            markers,
            locale: get_system_locale(),
        })
    }
}

/// Get today's date, respecting CALVIEW_TEST_TIME environment variable for testing.
pub fn get_today_date() -> NaiveDate {
    if let Ok(test_time) = std::env::var("CALVIEW_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Parse a `DATE=TEXT` marker.
pub fn parse_marker(s: &str) -> Result<(NaiveDate, String), CalendarError> {
    let (date, text) = s.split_once('=').ok_or_else(|| {
        CalendarError::InvalidArgument(format!("marker {} (expected DATE=TEXT)", s))
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(CalendarError::InvalidArgument(format!("marker {} has no text", s)));
    }
    Ok((parse_date(date)?, text.to_string()))
}
