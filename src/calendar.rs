//! Calendar page logic: format, focused page, selection and the visible date windows.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::{debug, trace, warn};

use crate::error::CalendarError;
use crate::types::{CalendarFormat, DAYS_PER_WEEK, PageId, WeekStart};

/// Check if a year is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Move `date` by `delta_months` calendar months, aiming for `desired_day`.
///
/// The day is clamped to the length of the target month, so Jan 31 lands on
/// Feb 28 or Feb 29. Returns `None` outside the representable date range.
pub fn shift_month(date: NaiveDate, desired_day: u32, delta_months: i32) -> Option<NaiveDate> {
    let total_months = (date.year() * 12) + (date.month() as i32 - 1) + delta_months;
    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;
    let day = desired_day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// State machine behind a calendar page: format × focused page × selection.
///
/// All windows are recomputed from `focused_date` on every read.
#[derive(Debug, Clone)]
pub struct CalendarLogic {
    calendar_format: CalendarFormat,
    available_formats: Vec<CalendarFormat>,
    focused_date: NaiveDate,
    // Day of month that month paging aims for; keeps Jan 31 -> Feb 29 -> Jan 31 exact.
    anchor_day: u32,
    selected_date: NaiveDate,
    today: NaiveDate,
    week_start: WeekStart,
}

impl CalendarLogic {
    /// Build the logic for a component.
    ///
    /// Fails when `available_formats` is empty, has duplicates, lists more
    /// formats than exist, or does not contain `initial_format`, and when the
    /// focused date's pages do not fit in the representable date range.
    pub fn new(
        initial_format: CalendarFormat,
        available_formats: Vec<CalendarFormat>,
        initial_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, CalendarError> {
        validate_formats(initial_format, &available_formats)?;

        let focused_date = initial_date.unwrap_or(today);
        if !page_fits(focused_date) {
            return Err(CalendarError::DateOutOfRange(focused_date));
        }
        debug!(
            "calendar created: format={}, focused={}, formats={:?}",
            initial_format, focused_date, available_formats
        );

        Ok(CalendarLogic {
            calendar_format: initial_format,
            available_formats,
            focused_date,
            anchor_day: focused_date.day(),
            selected_date: focused_date,
            today,
            week_start: WeekStart::Monday,
        })
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn calendar_format(&self) -> CalendarFormat {
        self.calendar_format
    }

    pub fn available_formats(&self) -> &[CalendarFormat] {
        &self.available_formats
    }

    pub fn focused_date(&self) -> NaiveDate {
        self.focused_date
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Refresh the notion of "today"; only affects [`CalendarLogic::is_today`].
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    // ---------------------------------------------------------------------
    // Windows
    // ---------------------------------------------------------------------

    /// First day of the week containing `date`.
    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let offset = self.week_start.offset(date.weekday());
        date.checked_sub_days(Days::new(offset.into())).unwrap_or(date)
    }

    /// The 7 days of the week containing the focused date.
    pub fn visible_week(&self) -> Vec<NaiveDate> {
        consecutive_days(self.start_of_week(self.focused_date), DAYS_PER_WEEK)
    }

    /// The week containing the focused date followed by the next week.
    pub fn visible_two_weeks(&self) -> Vec<NaiveDate> {
        consecutive_days(self.start_of_week(self.focused_date), 2 * DAYS_PER_WEEK)
    }

    /// Full weeks covering the focused month, from the week start on or before
    /// the 1st to the week end on or after the last day.
    pub fn visible_month(&self) -> Vec<NaiveDate> {
        let first = first_of_month(self.focused_date);
        let last = last_of_month(self.focused_date);
        let start = self.start_of_week(first);
        let trailing =
            DAYS_PER_WEEK as u64 - 1 - u64::from(self.week_start.offset(last.weekday()));
        let end = last.checked_add_days(Days::new(trailing)).unwrap_or(last);

        let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
        trace!("month window {}..={} ({} days)", start, end, days.len());
        days
    }

    /// Window for the current format.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.visible_days_for(self.calendar_format)
    }

    /// Window for `format` around the same focused date.
    pub fn visible_days_for(&self, format: CalendarFormat) -> Vec<NaiveDate> {
        match format {
            CalendarFormat::Month => self.visible_month(),
            CalendarFormat::TwoWeeks => self.visible_two_weeks(),
            CalendarFormat::Week => self.visible_week(),
        }
    }

    /// First and last date of the window for `format`.
    pub fn visible_range_for(&self, format: CalendarFormat) -> (NaiveDate, NaiveDate) {
        let days = self.visible_days_for(format);
        match (days.first(), days.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => (self.focused_date, self.focused_date),
        }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id_for(self.calendar_format)
    }

    pub fn page_id_for(&self, format: CalendarFormat) -> PageId {
        match format {
            CalendarFormat::Month => PageId::Month {
                year: self.focused_date.year(),
                month: self.focused_date.month(),
            },
            CalendarFormat::TwoWeeks => PageId::TwoWeeks(self.start_of_week(self.focused_date)),
            CalendarFormat::Week => PageId::Week(self.start_of_week(self.focused_date)),
        }
    }

    // ---------------------------------------------------------------------
    // Classification
    // ---------------------------------------------------------------------

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        date == self.selected_date
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        is_weekend(date.weekday())
    }

    /// Leading or trailing day of a month grid, outside the focused month.
    pub fn is_extra_day(&self, date: NaiveDate) -> bool {
        self.is_extra_day_in(self.calendar_format, date)
    }

    pub fn is_extra_day_in(&self, format: CalendarFormat, date: NaiveDate) -> bool {
        format == CalendarFormat::Month
            && (date.year(), date.month()) != (self.focused_date.year(), self.focused_date.month())
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Move the focused date back by one page of the current format.
    pub fn select_previous(&mut self) {
        self.shift_page(self.calendar_format, -1);
    }

    /// Move the focused date forward by one page of the current format.
    pub fn select_next(&mut self) {
        self.shift_page(self.calendar_format, 1);
    }

    /// Page back by one unit of `format`, e.g. the format forced by the renderer.
    pub fn select_previous_in(&mut self, format: CalendarFormat) {
        self.shift_page(format, -1);
    }

    pub fn select_next_in(&mut self, format: CalendarFormat) {
        self.shift_page(format, 1);
    }

    fn shift_page(&mut self, format: CalendarFormat, direction: i32) {
        let moved = match format {
            CalendarFormat::Month => shift_month(self.focused_date, self.anchor_day, direction),
            CalendarFormat::TwoWeeks => self.shift_days(direction, 2 * DAYS_PER_WEEK as u64),
            CalendarFormat::Week => self.shift_days(direction, DAYS_PER_WEEK as u64),
        };

        let Some(moved) = moved.filter(|date| page_fits(*date)) else {
            warn!(
                "cannot page {} from {}: out of date range",
                if direction < 0 { "back" } else { "forward" },
                self.focused_date
            );
            return;
        };

        if format != CalendarFormat::Month {
            self.anchor_day = moved.day();
        }
        debug!(
            "{} page: {} -> {} ({})",
            if direction < 0 { "previous" } else { "next" },
            self.focused_date,
            moved,
            format
        );
        self.focused_date = moved;
    }

    fn shift_days(&self, direction: i32, days: u64) -> Option<NaiveDate> {
        if direction < 0 {
            self.focused_date.checked_sub_days(Days::new(days))
        } else {
            self.focused_date.checked_add_days(Days::new(days))
        }
    }

    /// Move the focused page to the one containing today.
    pub fn jump_to_today(&mut self) {
        if let Err(e) = self.focus(self.today) {
            warn!("cannot jump to today: {}", e);
        }
    }

    /// Focus `date` directly, resetting the month paging anchor.
    ///
    /// Dates whose pages run past the representable range are rejected and
    /// leave the focus unchanged.
    pub fn focus(&mut self, date: NaiveDate) -> Result<(), CalendarError> {
        if !page_fits(date) {
            return Err(CalendarError::DateOutOfRange(date));
        }
        debug!("focus {} -> {}", self.focused_date, date);
        self.focused_date = date;
        self.anchor_day = date.day();
        Ok(())
    }

    /// Select `date`; the focused page is left alone even when `date` lies outside it.
    pub fn select_date(&mut self, date: NaiveDate) {
        debug!("select {} (was {})", date, self.selected_date);
        self.selected_date = date;
    }

    // ---------------------------------------------------------------------
    // Format
    // ---------------------------------------------------------------------

    pub fn can_toggle(&self) -> bool {
        self.available_formats.len() >= 2
    }

    /// Format that a toggle would switch to (the current one when toggling is disabled).
    pub fn next_format(&self) -> CalendarFormat {
        let len = self.available_formats.len();
        self.available_formats
            .iter()
            .position(|&f| f == self.calendar_format)
            .map(|idx| self.available_formats[(idx + 1) % len])
            .unwrap_or(self.calendar_format)
    }

    /// Advance to the next available format, wrapping after the last one.
    pub fn toggle_calendar_format(&mut self) -> CalendarFormat {
        if !self.can_toggle() {
            warn!("format toggle ignored: only {} available", self.calendar_format);
            return self.calendar_format;
        }
        let next = self.next_format();
        debug!("format {} -> {}", self.calendar_format, next);
        self.calendar_format = next;
        next
    }
}

fn validate_formats(
    initial_format: CalendarFormat,
    available_formats: &[CalendarFormat],
) -> Result<(), CalendarError> {
    if available_formats.is_empty() {
        return Err(CalendarError::NoFormats);
    }
    if available_formats.len() > CalendarFormat::ALL.len() {
        return Err(CalendarError::TooManyFormats(available_formats.len()));
    }
    for (i, format) in available_formats.iter().enumerate() {
        if available_formats[..i].contains(format) {
            return Err(CalendarError::DuplicateFormat(*format));
        }
    }
    if !available_formats.contains(&initial_format) {
        return Err(CalendarError::FormatNotAvailable(initial_format));
    }
    Ok(())
}

/// Whether every window around `date` lies inside chrono's date range.
///
/// Month grids reach at most 6 days before the 1st, two-week windows at most
/// 13 days past the month end; `iter_days` needs one more day after the end.
pub fn page_fits(date: NaiveDate) -> bool {
    let leading = Days::new(DAYS_PER_WEEK as u64 - 1);
    let trailing = Days::new(2 * DAYS_PER_WEEK as u64);
    first_of_month(date).checked_sub_days(leading).is_some()
        && last_of_month(date).checked_add_days(trailing).is_some()
}

fn consecutive_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start.iter_days().take(count).collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.day0().into())).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let remaining = days_in_month(date.year(), date.month()) - date.day();
    date.checked_add_days(Days::new(remaining.into())).unwrap_or(date)
}
