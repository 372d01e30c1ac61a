//! Top-level calendar component.
//!
//! Wraps [`CalendarLogic`] with what the consumer configures around it: a
//! forced format override, per-day markers, the naming locale, and listeners
//! notified after every user-driven mutation. A rendering layer reads
//! [`CalendarSnapshot`]s instead of reaching into mutable state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::calendar::CalendarLogic;
use crate::error::CalendarError;
use crate::formatter::CalendarLocale;
use crate::types::{CalendarConfig, CalendarFormat, DAYS_PER_WEEK, PageId};

/// Notification sent to subscribers once a mutation has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    DaySelected(NaiveDate),
    FormatChanged(CalendarFormat),
    /// The rendered page identity changed.
    PageChanged(PageId),
}

type Listener = Box<dyn FnMut(&CalendarEvent)>;

/// Everything the renderer needs for one date cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    pub is_extra_day: bool,
    pub markers: Vec<String>,
}

/// Immutable view of the component after the latest mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSnapshot {
    /// Internal format, as toggled by the user.
    pub format: CalendarFormat,
    /// Format whose window is shown (differs from `format` under a forced override).
    pub rendered_format: CalendarFormat,
    pub page_id: PageId,
    pub header: String,
    /// `None` when the toggle control must not be shown.
    pub toggle_label: Option<String>,
    pub days_of_week: [String; 7],
    pub cells: Vec<DayCell>,
}

impl CalendarSnapshot {
    /// Cells grouped in rows of one week.
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }
}

pub struct CalendarComponent {
    logic: CalendarLogic,
    forced_format: Option<CalendarFormat>,
    markers: BTreeMap<NaiveDate, Vec<String>>,
    locale: CalendarLocale,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for CalendarComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarComponent")
            .field("logic", &self.logic)
            .field("forced_format", &self.forced_format)
            .field("markers", &self.markers.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CalendarComponent {
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        let logic = CalendarLogic::new(
            config.initial_format,
            config.available_formats,
            config.initial_date,
            config.today,
        )?
        .with_week_start(config.week_start);

        Ok(CalendarComponent {
            logic,
            forced_format: config.forced_format,
            markers: config.markers,
            locale: CalendarLocale::new(config.locale),
            listeners: Vec::new(),
        })
    }

    /// Replace the naming table, e.g. to relabel the toggle control.
    pub fn with_locale(mut self, locale: CalendarLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn logic(&self) -> &CalendarLogic {
        &self.logic
    }

    pub fn locale(&self) -> &CalendarLocale {
        &self.locale
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Register a listener for every [`CalendarEvent`].
    pub fn subscribe(&mut self, listener: impl FnMut(&CalendarEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn on_day_selected(&mut self, mut callback: impl FnMut(NaiveDate) + 'static) {
        self.subscribe(move |event| {
            if let CalendarEvent::DaySelected(date) = event {
                callback(*date);
            }
        });
    }

    pub fn on_format_changed(&mut self, mut callback: impl FnMut(CalendarFormat) + 'static) {
        self.subscribe(move |event| {
            if let CalendarEvent::FormatChanged(format) = event {
                callback(*format);
            }
        });
    }

    fn notify(&mut self, event: CalendarEvent) {
        debug!("notify {:?} ({} listeners)", event, self.listeners.len());
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn notify_page_change(&mut self, before: PageId) {
        let after = self.page_id();
        if after != before {
            self.notify(CalendarEvent::PageChanged(after));
        }
    }

    // ---------------------------------------------------------------------
    // Forced format
    // ---------------------------------------------------------------------

    pub fn forced_format(&self) -> Option<CalendarFormat> {
        self.forced_format
    }

    /// Set or clear the override. The internal format is never touched.
    pub fn set_forced_format(&mut self, forced_format: Option<CalendarFormat>) {
        let before = self.page_id();
        self.forced_format = forced_format;
        self.notify_page_change(before);
    }

    /// Format whose window is rendered.
    pub fn rendered_format(&self) -> CalendarFormat {
        self.forced_format.unwrap_or_else(|| self.logic.calendar_format())
    }

    pub fn toggle_enabled(&self) -> bool {
        self.forced_format.is_none() && self.logic.can_toggle()
    }

    // ---------------------------------------------------------------------
    // Inbound events
    // ---------------------------------------------------------------------

    /// Page back by one unit of the rendered format.
    pub fn select_previous(&mut self) {
        let before = self.page_id();
        self.logic.select_previous_in(self.rendered_format());
        self.notify_page_change(before);
    }

    /// Page forward by one unit of the rendered format.
    pub fn select_next(&mut self) {
        let before = self.page_id();
        self.logic.select_next_in(self.rendered_format());
        self.notify_page_change(before);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.logic.select_date(date);
        self.notify(CalendarEvent::DaySelected(date));
    }

    /// Cycle to the next available format; `None` when the toggle is disabled.
    pub fn toggle_calendar_format(&mut self) -> Option<CalendarFormat> {
        if !self.toggle_enabled() {
            warn!(
                "format toggle disabled (forced={:?}, formats={:?})",
                self.forced_format,
                self.logic.available_formats()
            );
            return None;
        }
        let before = self.page_id();
        let format = self.logic.toggle_calendar_format();
        self.notify(CalendarEvent::FormatChanged(format));
        self.notify_page_change(before);
        Some(format)
    }

    pub fn jump_to_today(&mut self) {
        let before = self.page_id();
        self.logic.jump_to_today();
        self.notify_page_change(before);
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.logic.set_today(today);
    }

    // ---------------------------------------------------------------------
    // Rendering inputs
    // ---------------------------------------------------------------------

    pub fn page_id(&self) -> PageId {
        self.logic.page_id_for(self.rendered_format())
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.logic.visible_days_for(self.rendered_format())
    }

    pub fn header_text(&self) -> String {
        self.logic.header_text_for(self.rendered_format(), &self.locale)
    }

    pub fn header_toggle_text(&self) -> Option<String> {
        self.toggle_enabled().then(|| self.logic.header_toggle_text(&self.locale))
    }

    pub fn days_of_week(&self) -> [String; 7] {
        self.logic.days_of_week(&self.locale)
    }

    pub fn markers_for(&self, date: NaiveDate) -> &[String] {
        self.markers.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_extra_day(&self, date: NaiveDate) -> bool {
        self.logic.is_extra_day_in(self.rendered_format(), date)
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        let rendered_format = self.rendered_format();
        let cells = self
            .visible_days()
            .into_iter()
            .map(|date| DayCell {
                date,
                is_selected: self.logic.is_selected(date),
                is_today: self.logic.is_today(date),
                is_weekend: self.logic.is_weekend(date),
                is_extra_day: self.logic.is_extra_day_in(rendered_format, date),
                markers: self.markers_for(date).to_vec(),
            })
            .collect();

        CalendarSnapshot {
            format: self.logic.calendar_format(),
            rendered_format,
            page_id: self.page_id(),
            header: self.header_text(),
            toggle_label: self.header_toggle_text(),
            days_of_week: self.days_of_week(),
            cells,
        }
    }
}
