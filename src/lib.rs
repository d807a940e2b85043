pub mod cell;
pub mod convert;
pub mod document;
pub mod error;
pub mod event;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod layout;
pub mod source;
pub mod timestamp;

pub use cell::Cell;
pub use convert::{ConversionReport, SkippedRow, convert_bytes, convert_path, convert_table};
pub use document::{CalendarDocument, DOWNLOAD_FILE_NAME, MIME_TYPE};
pub use error::{ConversionError, ConversionResult};
pub use event::{CalendarEvent, RequiredField, RowOutcome, ScheduleRow};
pub use layout::{ColumnLayout, LayoutField, column_letter, parse_column_ref};
pub use source::{InputFormat, ScheduleTable};
pub use timestamp::{normalize_timestamp, serial_to_datetime};
