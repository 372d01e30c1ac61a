//! Type definitions and constants for the calendar page engine.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Locale, NaiveDate, Weekday};
use clap::ValueEnum;

/// Display granularity: decides the window size and the paging step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum CalendarFormat {
    /// Full-weeks grid covering one calendar month.
    Month,
    /// Two consecutive weeks.
    TwoWeeks,
    /// A single week.
    Week,
}

impl CalendarFormat {
    /// Every format variant, in declaration order.
    pub const ALL: [CalendarFormat; 3] = [
        CalendarFormat::Month,
        CalendarFormat::TwoWeeks,
        CalendarFormat::Week,
    ];

    /// Number of days in a window of this format, or `None` for months (4 to 6 weeks).
    pub fn fixed_len(self) -> Option<usize> {
        match self {
            CalendarFormat::Month => None,
            CalendarFormat::TwoWeeks => Some(2 * DAYS_PER_WEEK),
            CalendarFormat::Week => Some(DAYS_PER_WEEK),
        }
    }
}

impl fmt::Display for CalendarFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarFormat::Month => "month",
            CalendarFormat::TwoWeeks => "two-weeks",
            CalendarFormat::Week => "week",
        };
        f.write_str(name)
    }
}

/// First day of every displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Days between the start of the week and `weekday`.
    pub fn offset(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Monday => weekday.num_days_from_monday(),
            WeekStart::Sunday => weekday.num_days_from_sunday(),
        }
    }
}

/// Identity of a displayed page.
///
/// Two focused dates map to the same `PageId` exactly when they fall in the
/// same window under the same format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageId {
    Month { year: i32, month: u32 },
    /// Keyed by the first date of the window.
    TwoWeeks(NaiveDate),
    /// Keyed by the first date of the window.
    Week(NaiveDate),
}

impl PageId {
    pub fn format(&self) -> CalendarFormat {
        match self {
            PageId::Month { .. } => CalendarFormat::Month,
            PageId::TwoWeeks(_) => CalendarFormat::TwoWeeks,
            PageId::Week(_) => CalendarFormat::Week,
        }
    }
}

/// Construction-time options for a calendar component.
#[derive(Clone, Debug)]
pub struct CalendarConfig {
    /// Date to focus and select initially; `today` when absent.
    pub initial_date: Option<NaiveDate>,
    pub initial_format: CalendarFormat,
    /// Ordered formats the toggle cycles through.
    pub available_formats: Vec<CalendarFormat>,
    /// Overrides the rendered format and disables the toggle while set.
    pub forced_format: Option<CalendarFormat>,
    pub week_start: WeekStart,
    /// Today's date for highlighting.
    pub today: NaiveDate,
    /// Per-day indicators, only read by the rendering layer.
    pub markers: BTreeMap<NaiveDate, Vec<String>>,
    /// Locale for month and weekday names.
    pub locale: Locale,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            initial_date: None,
            initial_format: CalendarFormat::Month,
            available_formats: CalendarFormat::ALL.to_vec(),
            forced_format: None,
            week_start: WeekStart::Monday,
            today: chrono::Local::now().date_naive(),
            markers: BTreeMap::new(),
            locale: Locale::en_US,
        }
    }
}

pub const DAYS_PER_WEEK: usize = 7;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
