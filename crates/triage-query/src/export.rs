//! Critical-patient CSV export and re-import.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::{CsvWriter, SerWriter};
use tracing::info;

use triage_ingest::{
    parse_optional_age, parse_optional_f64, read_csv_bytes, resolve_columns,
};
use triage_model::{PatientStatus, RegistryError, health_columns};

use crate::critical::{CriticalList, CriticalPatient};
use crate::error::Result;

/// Default file name of the export.
pub const CRITICAL_EXPORT_FILE: &str = "critical_patients.csv";

/// Writes the critical list as CSV with a header row.
pub fn write_critical_csv<W: Write>(list: &CriticalList, writer: W) -> Result<()> {
    let mut frame = list.frame().clone();
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}

/// Renders the critical list as UTF-8 CSV bytes.
pub fn critical_csv_bytes(list: &CriticalList) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_critical_csv(list, &mut buffer)?;
    Ok(buffer)
}

/// Writes the critical list to `path`, replacing any existing file.
pub fn export_critical_csv(list: &CriticalList, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_critical_csv(list, file)?;
    info!(
        path = %path.display(),
        rows = list.len(),
        "critical list exported"
    );
    Ok(())
}

/// Parses a critical-patient CSV produced by [`write_critical_csv`].
pub fn read_critical_csv(source_name: &str, bytes: &[u8]) -> Result<Vec<CriticalPatient>> {
    let table = read_csv_bytes(source_name, bytes)?;
    let [id_col, age_col, bmi_col, clean_col, status_col] =
        resolve_columns(&table, health_columns::CRITICAL_EXPORT)?;
    let mut rows = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let row = idx + 1;
        let status_text = table.value(idx, status_col);
        let status = status_text
            .parse::<PatientStatus>()
            .map_err(|_| RegistryError::Parse {
                row,
                column: health_columns::STATUS.to_string(),
                value: status_text.to_string(),
                expected: "patient status",
            })?;
        rows.push(CriticalPatient {
            patient_id: table.value(idx, id_col).to_string(),
            age: parse_optional_age(table.value(idx, age_col), row, health_columns::AGE)?,
            bmi: parse_optional_f64(table.value(idx, bmi_col), row, health_columns::BMI)?,
            blood_pressure_clean: parse_optional_f64(
                table.value(idx, clean_col),
                row,
                health_columns::BLOOD_PRESSURE_CLEAN,
            )?,
            status,
        });
    }
    Ok(rows)
}
