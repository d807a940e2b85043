use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

/// Failure to read or parse a conversion input as a whole.
///
/// Individual cells never produce one of these; unusable cells degrade to
/// empty values and may cause their row to be skipped instead.
#[derive(Debug)]
pub enum ConversionError {
    Io(io::Error),
    Workbook(calamine::Error),
    Csv(csv::Error),
    Serialization(SerdeJsonError),
    UnsupportedFormat(String),
    EmptyWorkbook,
    /// The first worksheet spans more cells than the reader lays out.
    SheetTooLarge { rows: u64, columns: u64 },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Io(err) => write!(f, "io error: {err}"),
            ConversionError::Workbook(err) => write!(f, "unreadable workbook: {err}"),
            ConversionError::Csv(err) => write!(f, "csv error: {err}"),
            ConversionError::Serialization(err) => write!(f, "serialization error: {err}"),
            ConversionError::UnsupportedFormat(name) => {
                write!(f, "unsupported input format '{name}'")
            }
            ConversionError::EmptyWorkbook => write!(f, "workbook contains no worksheets"),
            ConversionError::SheetTooLarge { rows, columns } => {
                write!(f, "worksheet too large: {rows} rows x {columns} columns")
            }
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Io(err) => Some(err),
            ConversionError::Workbook(err) => Some(err),
            ConversionError::Csv(err) => Some(err),
            ConversionError::Serialization(err) => Some(err),
            ConversionError::UnsupportedFormat(_)
            | ConversionError::EmptyWorkbook
            | ConversionError::SheetTooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for ConversionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<calamine::Error> for ConversionError {
    fn from(value: calamine::Error) -> Self {
        Self::Workbook(value)
    }
}

impl From<csv::Error> for ConversionError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SerdeJsonError> for ConversionError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

pub type ConversionResult<T> = Result<T, ConversionError>;
