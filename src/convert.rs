use crate::document::CalendarDocument;
use crate::error::ConversionResult;
use crate::event::{CalendarEvent, RequiredField, RowOutcome, ScheduleRow};
use crate::layout::ColumnLayout;
use crate::source::{self, InputFormat, ScheduleTable};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// A data row that produced no event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub missing: Vec<RequiredField>,
}

impl SkippedRow {
    pub fn to_cli_line(&self) -> String {
        let missing = self
            .missing
            .iter()
            .map(RequiredField::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        // sheet rows are numbered from 1
        format!("row {} (sheet row {}): missing {}", self.row, self.row + 1, missing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    document: CalendarDocument,
    event_rows: Vec<usize>,
    skipped: Vec<SkippedRow>,
    rows_examined: usize,
}

impl ConversionReport {
    pub fn document(&self) -> &CalendarDocument {
        &self.document
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.document.events()
    }

    /// Source row index of each event, in document order.
    pub fn event_rows(&self) -> &[usize] {
        &self.event_rows
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Data rows looked at, header excluded.
    pub fn rows_examined(&self) -> usize {
        self.rows_examined
    }

    pub fn to_ics(&self) -> String {
        self.document.to_ics()
    }

    pub fn to_cli_summary(&self) -> String {
        format!(
            "rows={}, events={}, skipped={}",
            self.rows_examined,
            self.document.len(),
            self.skipped.len()
        )
    }

    /// Emitted events as a table, one row per event.
    pub fn events_frame(&self) -> PolarsResult<DataFrame> {
        let events = self.document.events();
        df!(
            "row" => self.event_rows.iter().map(|r| *r as u32).collect::<Vec<_>>(),
            "start" => events.iter().map(|e| e.start.as_str()).collect::<Vec<_>>(),
            "end" => events.iter().map(|e| e.end.as_str()).collect::<Vec<_>>(),
            "summary" => events.iter().map(|e| e.summary.as_str()).collect::<Vec<_>>(),
            "description" => events.iter().map(|e| e.description.as_deref()).collect::<Vec<_>>(),
            "location" => events.iter().map(|e| e.location.as_deref()).collect::<Vec<_>>()
        )
    }
}

/// Runs every row after the header through event assembly, keeping input
/// order.
pub fn convert_table(table: &ScheduleTable, layout: &ColumnLayout) -> ConversionReport {
    let mut events = Vec::new();
    let mut event_rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, cells) in table.rows().iter().enumerate().skip(1) {
        let row = ScheduleRow::from_cells(index, cells, layout);
        match row.assemble() {
            RowOutcome::Event(event) => {
                events.push(event);
                event_rows.push(index);
            }
            RowOutcome::Skipped(missing) => {
                debug!(row = index, ?missing, "skipping row");
                skipped.push(SkippedRow {
                    row: index,
                    missing,
                });
            }
        }
    }

    let report = ConversionReport {
        document: CalendarDocument::new(events),
        event_rows,
        skipped,
        rows_examined: table.len().saturating_sub(1),
    };
    info!(
        rows = report.rows_examined,
        events = report.document.len(),
        skipped = report.skipped.len(),
        "converted schedule"
    );
    report
}

pub fn convert_path<P: AsRef<Path>>(
    path: P,
    layout: &ColumnLayout,
) -> ConversionResult<ConversionReport> {
    let path = path.as_ref();
    let table = source::read_table_from_path(path).inspect_err(|err| {
        warn!(path = %path.display(), error = %err, "could not read schedule");
    })?;
    Ok(convert_table(&table, layout))
}

pub fn convert_bytes(
    bytes: &[u8],
    format: Option<InputFormat>,
    layout: &ColumnLayout,
) -> ConversionResult<ConversionReport> {
    let table = source::read_table_from_bytes(bytes, format).inspect_err(|err| {
        warn!(error = %err, "could not read uploaded schedule");
    })?;
    Ok(convert_table(&table, layout))
}
