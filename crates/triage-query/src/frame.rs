//! In-memory patient table.
//!
//! Classified records are loaded column-wise into a Polars `DataFrame`
//! named after the health registry columns. The table has no key and keeps
//! duplicate rows; it is rebuilt from scratch for every upload.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use triage_model::{PatientRecord, RiskLevel, health_columns};

use crate::error::{QueryError, Result};

/// Read-only table of classified patients.
#[derive(Debug, Clone)]
pub struct PatientTable {
    data: DataFrame,
}

impl PatientTable {
    /// Builds the table. Unassessed records carry `Unknown` in `risk_level`.
    pub fn from_records(records: &[PatientRecord]) -> Result<Self> {
        let ids: Vec<&str> = records
            .iter()
            .map(|record| record.patient_id.as_str())
            .collect();
        let ages: Vec<Option<i64>> = records
            .iter()
            .map(|record| record.age.map(i64::from))
            .collect();
        let bmi: Vec<Option<f64>> = records.iter().map(|record| record.bmi).collect();
        let scores: Vec<Option<f64>> = records.iter().map(|record| record.disease_score).collect();
        let pressures: Vec<Option<&str>> = records
            .iter()
            .map(|record| record.blood_pressure.as_deref())
            .collect();
        let sexes: Vec<Option<&str>> = records.iter().map(|record| record.sex.as_deref()).collect();
        let clean: Vec<Option<f64>> = records
            .iter()
            .map(|record| record.blood_pressure_clean)
            .collect();
        let risks: Vec<&str> = records
            .iter()
            .map(|record| RiskLevel::label(record.risk_level))
            .collect();

        let columns: Vec<Column> = vec![
            Series::new(health_columns::PATIENT_ID.into(), ids).into_column(),
            Series::new(health_columns::AGE.into(), ages).into_column(),
            Series::new(health_columns::BMI.into(), bmi).into_column(),
            Series::new(health_columns::DISEASE_SCORE.into(), scores).into_column(),
            Series::new(health_columns::BLOOD_PRESSURE.into(), pressures).into_column(),
            Series::new(health_columns::SEX.into(), sexes).into_column(),
            Series::new(health_columns::BLOOD_PRESSURE_CLEAN.into(), clean).into_column(),
            Series::new(health_columns::RISK_LEVEL.into(), risks).into_column(),
        ];
        let data = DataFrame::new(columns)?;
        debug!(rows = data.height(), "patient table built");
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Underlying frame.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }
}

/// Looks up a column in a query result.
pub(crate) fn result_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| QueryError::ColumnNotFound {
        column: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_row_per_record() {
        let records = vec![
            PatientRecord {
                patient_id: "P1".to_string(),
                age: Some(40),
                risk_level: Some(RiskLevel::Medium),
                ..PatientRecord::default()
            },
            PatientRecord {
                patient_id: "P1".to_string(),
                ..PatientRecord::default()
            },
        ];
        let table = PatientTable::from_records(&records).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.data().width(), 8);

        let risk = table.data().column("risk_level").unwrap().str().unwrap();
        assert_eq!(risk.get(0), Some("Medium"));
        assert_eq!(risk.get(1), Some("Unknown"));

        let age = table.data().column("age").unwrap().i64().unwrap();
        assert_eq!(age.get(0), Some(40));
        assert_eq!(age.get(1), None);
    }

    #[test]
    fn empty_batch_builds_empty_table() {
        let table = PatientTable::from_records(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.data().width(), 8);
    }
}
