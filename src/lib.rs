//! Calendar page engine: decides which dates a calendar shows and how it pages.
//!
//! Features:
//! - Month, two-week and week formats with a user-cyclable format list
//! - Exact, reversible paging (month paging clamps the day, Jan 31 -> Feb 29)
//! - Selection, today, weekend and extra-day classification
//! - Forced format override, day markers and change subscriptions
//! - Customizable week start (Monday/Sunday)

pub mod args;
pub mod calendar;
pub mod component;
pub mod error;
pub mod formatter;
pub mod types;
