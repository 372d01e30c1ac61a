//! Error type for calendar construction and command-line input.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::CalendarFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Initial format is missing from the list of formats the user may cycle through.
    #[error("Format {0} is not in the list of available formats")]
    FormatNotAvailable(CalendarFormat),

    #[error("At least one available format is required")]
    NoFormats,

    #[error("Too many available formats: {0} (at most {max})", max = CalendarFormat::ALL.len())]
    TooManyFormats(usize),

    #[error("Duplicate available format: {0}")]
    DuplicateFormat(CalendarFormat),

    /// Pages around this date would run past the representable date range.
    #[error("Date out of range: {0}")]
    DateOutOfRange(NaiveDate),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
