use crate::event::CalendarEvent;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

pub const CALENDAR_HEADER: [&str; 3] = ["BEGIN:VCALENDAR", "VERSION:2.0", "CALSCALE:GREGORIAN"];
pub const CALENDAR_FOOTER: &str = "END:VCALENDAR";

/// File name offered for downloads.
pub const DOWNLOAD_FILE_NAME: &str = "class_schedule.ics";
pub const MIME_TYPE: &str = "text/calendar; charset=utf-8";

/// Ordered events wrapped in the calendar envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarDocument {
    events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Renders the document. Events keep their order and are joined with
    /// newlines; there is no trailing newline.
    pub fn to_ics(&self) -> String {
        let mut lines: Vec<String> = CALENDAR_HEADER.iter().map(|l| l.to_string()).collect();
        for event in &self.events {
            lines.extend(event.lines());
        }
        lines.push(CALENDAR_FOOTER.to_string());
        lines.join("\n")
    }

    /// `data:` URI carrying the rendered calendar, base64 encoded.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:text/calendar;charset=utf-8;base64,{}",
            STANDARD.encode(self.to_ics())
        )
    }
}

impl fmt::Display for CalendarDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ics())
    }
}

impl FromIterator<CalendarEvent> for CalendarDocument {
    fn from_iter<T: IntoIterator<Item = CalendarEvent>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
