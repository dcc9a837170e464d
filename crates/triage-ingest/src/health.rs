//! Health registry ingestion.

use std::path::Path;

use tracing::info;

use triage_model::{PatientRecord, Result, health_columns};

use crate::csv_table::{CsvTable, read_csv_bytes, read_csv_table};
use crate::schema::resolve_columns;
use crate::values::{optional_text, parse_optional_age, parse_optional_f64};

/// Converts a raw table into patient records.
///
/// Derived fields (`blood_pressure_clean`, `risk_level`) are left empty.
pub fn patients_from_table(table: &CsvTable) -> Result<Vec<PatientRecord>> {
    let [id_col, age_col, bmi_col, score_col, bp_col, sex_col] =
        resolve_columns(table, health_columns::REQUIRED)?;
    let mut records = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let row = idx + 1;
        let value = |column: usize| table.value(idx, column);
        records.push(PatientRecord {
            patient_id: value(id_col).to_string(),
            age: parse_optional_age(value(age_col), row, health_columns::AGE)?,
            bmi: parse_optional_f64(value(bmi_col), row, health_columns::BMI)?,
            disease_score: parse_optional_f64(
                value(score_col),
                row,
                health_columns::DISEASE_SCORE,
            )?,
            blood_pressure: optional_text(value(bp_col)),
            sex: optional_text(value(sex_col)),
            blood_pressure_clean: None,
            risk_level: None,
        });
    }
    info!(
        source = %table.source_name,
        record_count = records.len(),
        "health registry loaded"
    );
    Ok(records)
}

/// Loads a health registry CSV from disk.
pub fn read_health_csv(path: &Path) -> Result<Vec<PatientRecord>> {
    patients_from_table(&read_csv_table(path)?)
}

/// Loads an uploaded health registry CSV.
pub fn read_health_bytes(source_name: &str, bytes: &[u8]) -> Result<Vec<PatientRecord>> {
    patients_from_table(&read_csv_bytes(source_name, bytes)?)
}
