use crate::cell::Cell;
use crate::error::{ConversionError, ConversionResult};
use std::path::Path;

pub mod delimited;
pub mod workbook;

pub use delimited::read_csv;
pub use workbook::{read_workbook, read_workbook_bytes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xls,
    Xlsx,
    Xlsm,
    Xlsb,
    Ods,
    Csv,
}

impl InputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "xls" => Some(InputFormat::Xls),
            "xlsx" => Some(InputFormat::Xlsx),
            "xlsm" => Some(InputFormat::Xlsm),
            "xlsb" => Some(InputFormat::Xlsb),
            "ods" => Some(InputFormat::Ods),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ConversionResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ConversionError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Rows of cells from the first worksheet (or the CSV file), header row
/// included. Rows may differ in length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleTable {
    rows: Vec<Vec<Cell>>,
}

impl ScheduleTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }
}

impl FromIterator<Vec<Cell>> for ScheduleTable {
    fn from_iter<T: IntoIterator<Item = Vec<Cell>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

pub fn read_table_from_path<P: AsRef<Path>>(path: P) -> ConversionResult<ScheduleTable> {
    let path = path.as_ref();
    match InputFormat::from_path(path)? {
        InputFormat::Csv => {
            let bytes = std::fs::read(path)?;
            read_csv(&bytes)
        }
        _ => read_workbook(path),
    }
}

/// Reads an uploaded file held in memory. Without a format hint the bytes
/// are sniffed as a workbook.
pub fn read_table_from_bytes(
    bytes: &[u8],
    format: Option<InputFormat>,
) -> ConversionResult<ScheduleTable> {
    match format {
        Some(InputFormat::Csv) => read_csv(bytes),
        _ => read_workbook_bytes(bytes),
    }
}
