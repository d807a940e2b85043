use crate::cell::Cell;
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// Compact calendar timestamp with seconds pinned to zero.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M00";
/// The only accepted text form for date/time cells.
pub const TEXT_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Day zero of spreadsheet date serials.
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Converts a spreadsheet date serial into a naive date-time.
///
/// The integer part counts days from 1899-12-30 and the fraction is the time
/// of day, rounded to the nearest millisecond. Returns `None` for non-finite
/// input or results outside years 1..=9999.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    let datetime = serial_epoch()
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(delta)?;
    (1..=9999).contains(&datetime.year()).then_some(datetime)
}

/// Parses text strictly against `DD.MM.YYYY HH:MM`. Surrounding whitespace
/// makes the text unusable.
pub fn parse_text_datetime(value: &str) -> Option<NaiveDateTime> {
    // chrono skips whitespace before numeric fields on its own
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TEXT_DATETIME_FORMAT).ok()
}

/// Interprets a cell as a date-time, if it holds a usable one.
pub fn cell_datetime(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Empty => None,
        Cell::Text(value) => parse_text_datetime(value),
        Cell::Number(value) => serial_to_datetime(*value),
        Cell::DateTime(value) => Some(*value),
        Cell::Bool(_) => None,
    }
}

pub fn format_timestamp(datetime: &NaiveDateTime) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Normalizes a cell into `YYYYMMDDTHHMM00`, or an empty string when the cell
/// is missing or unusable.
pub fn normalize_timestamp(cell: &Cell) -> String {
    cell_datetime(cell)
        .map(|datetime| format_timestamp(&datetime))
        .unwrap_or_default()
}
