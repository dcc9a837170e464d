use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use triage_model::{RegistryError, Result};

/// A raw CSV table: normalized headers plus string cells.
///
/// Every row has exactly `headers.len()` cells; short rows are padded with
/// empty cells and extra cells are dropped.
#[derive(Debug, Clone)]
pub struct CsvTable {
    /// Display name of the input (file path or upload name).
    pub source_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Finds a column by exact header, falling back to a case-insensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(name))
            })
    }

    /// Cell at `row`/`column`, or an empty string when out of range.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file from disk.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = File::open(path)?;
    read_csv_table_from_reader(&path.display().to_string(), file)
}

/// Reads an uploaded CSV delivered as raw bytes.
pub fn read_csv_bytes(source_name: &str, bytes: &[u8]) -> Result<CsvTable> {
    read_csv_table_from_reader(source_name, bytes)
}

/// Reads a CSV whose first non-blank row is the header.
///
/// Blank rows are skipped. An input with no rows at all is reported as
/// [`RegistryError::EmptyInput`]; a header without data rows is a valid,
/// empty table.
pub fn read_csv_table_from_reader<R: Read>(source_name: &str, reader: R) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| RegistryError::Csv {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Err(RegistryError::EmptyInput {
            source_name: source_name.to_string(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let width = headers.len();
    let rows: Vec<Vec<String>> = raw_rows
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();
    debug!(
        source = %source_name,
        columns = width,
        rows = rows.len(),
        "csv table loaded"
    );
    Ok(CsvTable {
        source_name: source_name.to_string(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers_and_cells() {
        let table = read_csv_bytes("upload", b"\xef\xbb\xbf patient_id , BMI\n  P1 , 31.5 \n").unwrap();
        assert_eq!(table.headers, vec!["patient_id", "BMI"]);
        assert_eq!(table.rows, vec![vec!["P1".to_string(), "31.5".to_string()]]);
    }

    #[test]
    fn pads_short_rows_and_drops_extra_cells() {
        let table = read_csv_bytes("upload", b"a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn skips_blank_rows() {
        let table = read_csv_bytes("upload", b"\n,,\na,b\n,\n1,2\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn empty_input_is_reported() {
        let result = read_csv_bytes("upload", b"");
        assert!(matches!(result, Err(RegistryError::EmptyInput { .. })));
        let result = read_csv_bytes("upload", b"\n\n");
        assert!(matches!(result, Err(RegistryError::EmptyInput { .. })));
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let table = read_csv_bytes("upload", b"a,b\n").unwrap();
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn column_lookup_prefers_exact_match() {
        let table = read_csv_bytes("upload", b"bmi,BMI\n1,2\n").unwrap();
        assert_eq!(table.column_index("BMI"), Some(1));
        assert_eq!(table.column_index("Bmi"), Some(0));
        assert_eq!(table.column_index("sex"), None);
    }
}
