//! Labels for the calendar page and the terminal rendering of a page snapshot.

use chrono::{Datelike, Locale, NaiveDate, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::calendar::CalendarLogic;
use crate::component::{CalendarSnapshot, DayCell};
use crate::types::{
    COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL,
    CalendarFormat, DAYS_PER_WEEK, WeekStart,
};

/// Width of one day cell in the terminal grid.
const CELL_WIDTH: usize = 4;
const GRID_WIDTH: usize = CELL_WIDTH * DAYS_PER_WEEK;

/// Caller-supplied naming table for months, weekdays and format labels.
#[derive(Clone, Debug)]
pub struct CalendarLocale {
    locale: Locale,
    format_labels: [String; 3],
}

impl Default for CalendarLocale {
    fn default() -> Self {
        CalendarLocale::new(Locale::en_US)
    }
}

impl CalendarLocale {
    pub fn new(locale: Locale) -> Self {
        CalendarLocale {
            locale,
            format_labels: [
                "Month".to_string(),
                "2 weeks".to_string(),
                "Week".to_string(),
            ],
        }
    }

    /// Replace the label shown on the toggle control for `format`.
    pub fn with_format_label(mut self, format: CalendarFormat, label: impl Into<String>) -> Self {
        self.format_labels[format_index(format)] = label.into();
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format_label(&self, format: CalendarFormat) -> &str {
        &self.format_labels[format_index(format)]
    }

    /// Month name in nominative case.
    pub fn month_name(&self, month: u32) -> String {
        let nominative: Option<[&str; 12]> = match self.locale {
            Locale::ru_RU => Some([
                "Январь",
                "Февраль",
                "Март",
                "Апрель",
                "Май",
                "Июнь",
                "Июль",
                "Август",
                "Сентябрь",
                "Октябрь",
                "Ноябрь",
                "Декабрь",
            ]),
            Locale::uk_UA => Some([
                "Січень",
                "Лютий",
                "Березень",
                "Квітень",
                "Травень",
                "Червень",
                "Липень",
                "Серпень",
                "Вересень",
                "Жовтень",
                "Листопад",
                "Грудень",
            ]),
            _ => None,
        };

        let month = month.clamp(1, 12);
        match nominative {
            Some(names) => names[(month - 1) as usize].to_string(),
            None => NaiveDate::from_ymd_opt(2000, month, 1)
                .map(|date| date.format_localized("%B", self.locale).to_string())
                .unwrap_or_default(),
        }
    }

    /// Abbreviated weekday name, e.g. "Mon".
    pub fn weekday_name(&self, weekday: Weekday) -> String {
        // 2000-01-03 was a Monday
        NaiveDate::from_ymd_opt(2000, 1, 3 + weekday.num_days_from_monday())
            .map(|date| date.format_localized("%a", self.locale).to_string())
            .unwrap_or_default()
    }

    /// Short date used in range headers: "Aug 12", or "Aug 12, 2024" with the year.
    fn short_date(&self, date: NaiveDate, with_year: bool) -> String {
        let pattern = if with_year { "%b %-d, %Y" } else { "%b %-d" };
        date.format_localized(pattern, self.locale).to_string()
    }
}

fn format_index(format: CalendarFormat) -> usize {
    match format {
        CalendarFormat::Month => 0,
        CalendarFormat::TwoWeeks => 1,
        CalendarFormat::Week => 2,
    }
}

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Get weekday order based on week start day.
pub fn get_weekday_order(week_start: WeekStart) -> [Weekday; 7] {
    let first = week_start.weekday();
    let mut order = [first; 7];
    for i in 1..order.len() {
        order[i] = order[i - 1].succ();
    }
    order
}

impl CalendarLogic {
    /// Header label for the current format: "August 2024" or "Aug 12 – Aug 18".
    pub fn header_text(&self, locale: &CalendarLocale) -> String {
        self.header_text_for(self.calendar_format(), locale)
    }

    pub fn header_text_for(&self, format: CalendarFormat, locale: &CalendarLocale) -> String {
        match format {
            CalendarFormat::Month => {
                let focused = self.focused_date();
                format!("{} {}", locale.month_name(focused.month()), focused.year())
            }
            CalendarFormat::TwoWeeks | CalendarFormat::Week => {
                let (first, last) = self.visible_range_for(format);
                let with_year = first.year() != last.year();
                format!(
                    "{} – {}",
                    locale.short_date(first, with_year),
                    locale.short_date(last, with_year)
                )
            }
        }
    }

    /// Label of the format a toggle would switch to.
    pub fn header_toggle_text(&self, locale: &CalendarLocale) -> String {
        locale.format_label(self.next_format()).to_string()
    }

    /// Weekday labels in display order, starting with the configured week start.
    pub fn days_of_week(&self, locale: &CalendarLocale) -> [String; 7] {
        get_weekday_order(self.week_start()).map(|weekday| locale.weekday_name(weekday))
    }
}

/// Center text within a specified width, accounting for Unicode character widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Truncate a weekday label to two columns and center it in a cell.
fn format_weekday_label(label: &str, weekend: bool, color: bool) -> String {
    let short: String = label.chars().take(2).collect();
    let cell = center_text(&short, CELL_WIDTH);
    if color && weekend {
        format!("{}{}{}", COLOR_RED, cell, COLOR_RESET)
    } else if color {
        format!("{}{}{}", COLOR_SAND_YELLOW, cell, COLOR_RESET)
    } else {
        cell
    }
}

/// Format a day cell: selection in brackets, `*` for days with markers.
///
/// Color priority: today > extra day > weekend > regular
fn format_day(cell: &DayCell, color: bool) -> String {
    let day_str = format!("{:>2}", cell.date.day());
    let day_str = if !color {
        day_str
    } else if cell.is_today {
        format!("{}{}{}", COLOR_REVERSE, day_str, COLOR_RESET)
    } else if cell.is_extra_day {
        format!("{}{}{}", COLOR_DIM, day_str, COLOR_RESET)
    } else if cell.is_weekend {
        format!("{}{}{}", COLOR_RED, day_str, COLOR_RESET)
    } else {
        day_str
    };

    let (open, close) = if cell.is_selected {
        ('[', ']')
    } else if !cell.markers.is_empty() {
        (' ', '*')
    } else {
        (' ', ' ')
    };
    format!("{}{}{}", open, day_str, close)
}

/// Lay out a snapshot as terminal lines: header, toggle label, weekday row, week rows.
pub fn format_page_grid(snapshot: &CalendarSnapshot, color: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(10);

    let header = center_text(&snapshot.header, GRID_WIDTH);
    lines.push(if color {
        format!("{}{}{}", COLOR_TEAL, header, COLOR_RESET)
    } else {
        header
    });

    if let Some(label) = &snapshot.toggle_label {
        lines.push(center_text(&format!("[{}]", label), GRID_WIDTH));
    }

    // Columns follow the week start; the first row of cells gives each column's weekday.
    let weekday_row: String = snapshot
        .days_of_week
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let weekend = snapshot.cells.get(i).is_some_and(|cell| cell.is_weekend);
            format_weekday_label(label, weekend, color)
        })
        .collect();
    lines.push(weekday_row);

    for week in snapshot.weeks() {
        let row: String = week.iter().map(|cell| format_day(cell, color)).collect();
        lines.push(row);
    }

    lines
}

/// Marker lines for every visible day that carries markers.
pub fn format_markers(snapshot: &CalendarSnapshot) -> Vec<String> {
    snapshot
        .cells
        .iter()
        .flat_map(|cell| {
            cell.markers
                .iter()
                .map(move |marker| format!("{}: {}", cell.date, marker))
        })
        .collect()
}
