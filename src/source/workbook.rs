use super::ScheduleTable;
use crate::cell::Cell;
use crate::error::{ConversionError, ConversionResult};
use calamine::{
    Data, ExcelDateTime, Range, Reader, open_workbook_auto, open_workbook_auto_from_rs,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// Largest sheet, in cells from A1 to the last used cell, that is laid out.
pub const MAX_TABLE_CELLS: u64 = 5_000_000;

/// Date serials beyond this magnitude fall outside years 1..=9999 under
/// either date system.
const MAX_DATE_SERIAL: f64 = 3_000_000.0;

/// Reads the first worksheet of a legacy or modern workbook on disk.
pub fn read_workbook<P: AsRef<Path>>(path: P) -> ConversionResult<ScheduleTable> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening workbook");
    let mut workbook = open_workbook_auto(path)?;
    first_sheet(&mut workbook)
}

/// Reads the first worksheet of a workbook held in memory, detecting the
/// workbook format from its contents.
pub fn read_workbook_bytes(bytes: &[u8]) -> ConversionResult<ScheduleTable> {
    debug!(len = bytes.len(), "opening workbook from memory");
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    first_sheet(&mut workbook)
}

fn first_sheet<RS>(workbook: &mut calamine::Sheets<RS>) -> ConversionResult<ScheduleTable>
where
    RS: Read + Seek,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ConversionError::EmptyWorkbook)??;
    table_from_range(&range)
}

/// Lays the range out on absolute sheet coordinates so that row 0 is sheet
/// row 1 and column 0 is column A, whatever the used range is.
///
/// Fails with `SheetTooLarge` when the span from A1 to the last used cell
/// exceeds [`MAX_TABLE_CELLS`].
pub fn table_from_range(range: &Range<Data>) -> ConversionResult<ScheduleTable> {
    let Some((end_row, end_col)) = range.end() else {
        return Ok(ScheduleTable::default());
    };
    let rows = u64::from(end_row) + 1;
    let columns = u64::from(end_col) + 1;
    if rows.saturating_mul(columns) > MAX_TABLE_CELLS {
        warn!(rows, columns, "worksheet extent too large");
        return Err(ConversionError::SheetTooLarge { rows, columns });
    }
    Ok((0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).map(cell_from_data).unwrap_or_default())
                .collect()
        })
        .collect())
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(value) => Cell::Text(value.clone()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => excel_datetime_cell(value),
        Data::DateTimeIso(value) => parse_iso_datetime(value)
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Text(value.clone())),
        Data::DurationIso(value) => Cell::Text(value.clone()),
    }
}

/// Date cells honour the workbook's date system (1900 or 1904). Duration
/// cells (`[h]:mm` formats) are not points in time and keep their clock text.
fn excel_datetime_cell(value: &ExcelDateTime) -> Cell {
    let serial = value.as_f64();
    if !serial.is_finite() || serial.abs() > MAX_DATE_SERIAL {
        return Cell::Number(serial);
    }
    if value.is_duration() {
        return duration_text(serial)
            .map(Cell::Text)
            .unwrap_or(Cell::Number(serial));
    }
    value
        .as_datetime()
        .filter(|datetime| (1..=9999).contains(&datetime.year()))
        .map(Cell::DateTime)
        .unwrap_or(Cell::Number(serial))
}

fn duration_text(days: f64) -> Option<String> {
    let delta = TimeDelta::try_milliseconds((days * 86_400_000.0).round() as i64)?;
    let seconds = delta.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.abs();
    Some(format!(
        "{sign}{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    ))
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
