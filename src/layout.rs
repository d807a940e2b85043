use crate::error::ConversionResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Column positions (0-based, column A = 0) consumed from each schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub start_col: usize,
    pub end_col: usize,
    pub summary_col: usize,
    #[serde(default)]
    pub description_cols: Vec<usize>,
    pub location_col: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            start_col: 0,
            end_col: 1,
            summary_col: 4,
            description_cols: vec![6, 7, 8],
            location_col: 10,
        }
    }
}

/// Layout fields addressable by name, e.g. from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutField {
    Start,
    End,
    Summary,
    Description,
    Location,
}

impl LayoutField {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "start" => Some(LayoutField::Start),
            "end" => Some(LayoutField::End),
            "summary" => Some(LayoutField::Summary),
            "description" => Some(LayoutField::Description),
            "location" => Some(LayoutField::Location),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutField::Start => "start",
            LayoutField::End => "end",
            LayoutField::Summary => "summary",
            LayoutField::Description => "description",
            LayoutField::Location => "location",
        }
    }
}

impl ColumnLayout {
    pub fn load_json<P: AsRef<Path>>(path: P) -> ConversionResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConversionResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Points `field` at the given columns. Only `Description` accepts a list;
    /// the other fields require exactly one column.
    pub fn set_field(&mut self, field: LayoutField, columns: &[usize]) -> Result<(), String> {
        let single = || match columns {
            [col] => Ok(*col),
            _ => Err(format!("{} takes exactly one column", field.as_str())),
        };
        match field {
            LayoutField::Start => self.start_col = single()?,
            LayoutField::End => self.end_col = single()?,
            LayoutField::Summary => self.summary_col = single()?,
            LayoutField::Location => self.location_col = single()?,
            LayoutField::Description => self.description_cols = columns.to_vec(),
        }
        Ok(())
    }

    pub fn to_cli_summary(&self) -> String {
        let descriptions = if self.description_cols.is_empty() {
            "-".to_string()
        } else {
            self.description_cols
                .iter()
                .map(|c| column_letter(*c))
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "start={}, end={}, summary={}, description={}, location={}",
            column_letter(self.start_col),
            column_letter(self.end_col),
            column_letter(self.summary_col),
            descriptions,
            column_letter(self.location_col)
        )
    }
}

/// Parses a column reference given either as a 0-based index (`"4"`) or as
/// spreadsheet letters (`"E"`, `"AA"`).
pub fn parse_column_ref(input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(index) = input.parse::<usize>() {
        return Some(index);
    }
    let mut index: usize = 0;
    for ch in input.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Spreadsheet letters for a 0-based column index.
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_refs_accept_indices_and_letters() {
        assert_eq!(parse_column_ref("4"), Some(4));
        assert_eq!(parse_column_ref("A"), Some(0));
        assert_eq!(parse_column_ref("k"), Some(10));
        assert_eq!(parse_column_ref("AA"), Some(26));
        assert_eq!(parse_column_ref("A1"), None);
        assert_eq!(parse_column_ref(""), None);
    }

    #[test]
    fn column_letters_round_trip_through_parser() {
        for index in [0, 1, 10, 25, 26, 51, 52, 701, 702] {
            assert_eq!(parse_column_ref(&column_letter(index)), Some(index));
        }
    }

    #[test]
    fn largest_index_has_letters() {
        let letters = column_letter(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
        let below = usize::MAX - 1;
        assert_eq!(parse_column_ref(&column_letter(below)), Some(below));
    }
}
