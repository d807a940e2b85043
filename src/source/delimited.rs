use super::ScheduleTable;
use crate::cell::Cell;
use crate::error::ConversionResult;

/// Reads a headerless CSV export. The delimiter is taken from the first line:
/// semicolon when it outnumbers commas, otherwise comma.
pub fn read_csv(bytes: &[u8]) -> ConversionResult<ScheduleTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(bytes))
        .from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::infer).collect());
    }
    Ok(ScheduleTable::new(rows))
}

fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let count = |needle: u8| first_line.iter().filter(|b| **b == needle).count();
    if count(b';') > count(b',') { b';' } else { b',' }
}
