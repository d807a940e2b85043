use crate::cell::Cell;
use crate::layout::ColumnLayout;
use crate::timestamp::normalize_timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields of one spreadsheet row, picked out by a [`ColumnLayout`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleRow {
    /// Position of the row in the source, header included.
    pub index: usize,
    pub start: Cell,
    pub end: Cell,
    pub summary: Cell,
    pub descriptions: Vec<Cell>,
    pub location: Cell,
}

impl ScheduleRow {
    pub fn from_cells(index: usize, cells: &[Cell], layout: &ColumnLayout) -> Self {
        let at = |col: usize| cells.get(col).cloned().unwrap_or_default();
        Self {
            index,
            start: at(layout.start_col),
            end: at(layout.end_col),
            summary: at(layout.summary_col),
            descriptions: layout.description_cols.iter().map(|c| at(*c)).collect(),
            location: at(layout.location_col),
        }
    }

    /// Normalizes the row into an event, or reports which required fields
    /// came out empty.
    pub fn assemble(&self) -> RowOutcome {
        let start = normalize_timestamp(&self.start);
        let end = normalize_timestamp(&self.end);
        let summary = self.summary.to_text().unwrap_or_default();
        let description = self
            .descriptions
            .iter()
            .filter_map(Cell::to_text)
            .collect::<Vec<_>>()
            .join("\n");
        let location = self.location.to_text().unwrap_or_default();

        let mut missing = Vec::new();
        if start.is_empty() {
            missing.push(RequiredField::Start);
        }
        if end.is_empty() {
            missing.push(RequiredField::End);
        }
        if summary.is_empty() {
            missing.push(RequiredField::Summary);
        }
        if !missing.is_empty() {
            return RowOutcome::Skipped(missing);
        }

        RowOutcome::Event(CalendarEvent {
            start,
            end,
            summary,
            description: non_empty(description),
            location: non_empty(location),
        })
    }

    pub fn to_event(&self) -> Option<CalendarEvent> {
        match self.assemble() {
            RowOutcome::Event(event) => Some(event),
            RowOutcome::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Start,
    End,
    Summary,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Start => "start",
            RequiredField::End => "end",
            RequiredField::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Event(CalendarEvent),
    Skipped(Vec<RequiredField>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start: String,
    pub end: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "BEGIN:VEVENT".to_string(),
            format!("DTSTART:{}", self.start),
            format!("DTEND:{}", self.end),
            format!("SUMMARY:{}", escape_text(&self.summary)),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }
        if let Some(location) = &self.location {
            lines.push(format!("LOCATION:{}", escape_text(location)));
        }
        lines.push("END:VEVENT".to_string());
        lines
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Escapes a TEXT property value so it stays on a single content line.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            other => out.push(other),
        }
    }
    out
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
