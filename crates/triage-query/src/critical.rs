use polars::prelude::{DataFrame, IntoLazy, col, lit, when};
use serde::Serialize;
use tracing::info;

use triage_model::{PatientStatus, RiskLevel, health_columns};

use crate::error::Result;
use crate::frame::{PatientTable, result_column};
use crate::values::{age_cell, real_cell, text_cell};

/// Disease score above which a high-risk patient is critical.
pub const CRITICAL_DISEASE_SCORE: f64 = 80.0;

/// One row of the critical-patient export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPatient {
    pub patient_id: String,
    pub age: Option<u32>,
    #[serde(rename = "BMI")]
    pub bmi: Option<f64>,
    pub blood_pressure_clean: Option<f64>,
    pub status: PatientStatus,
}

/// Result of the critical-export query.
#[derive(Debug, Clone)]
pub struct CriticalList {
    frame: DataFrame,
    rows: Vec<CriticalPatient>,
}

impl CriticalList {
    /// Projected result frame (`patient_id, age, BMI, blood_pressure_clean, status`).
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn rows(&self) -> &[CriticalPatient] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Selects the patients needing immediate attention.
///
/// A patient is `Critical` when `disease_score > 80` and `risk_level` is
/// `High`; every other patient is `Stable` and filtered out. An empty
/// result is a valid outcome.
pub fn critical_patients(table: &PatientTable) -> Result<CriticalList> {
    let status = when(
        col(health_columns::DISEASE_SCORE)
            .gt(lit(CRITICAL_DISEASE_SCORE))
            .and(col(health_columns::RISK_LEVEL).eq(lit(RiskLevel::High.as_str()))),
    )
    .then(lit(PatientStatus::Critical.as_str()))
    .otherwise(lit(PatientStatus::Stable.as_str()))
    .alias(health_columns::STATUS);

    let frame = table
        .data()
        .clone()
        .lazy()
        .with_column(status)
        .filter(col(health_columns::STATUS).eq(lit(PatientStatus::Critical.as_str())))
        .select(health_columns::CRITICAL_EXPORT.map(col))
        .collect()?;

    let rows = rows_from_frame(&frame)?;
    info!(
        critical = rows.len(),
        patients = table.height(),
        "critical export query complete"
    );
    Ok(CriticalList { frame, rows })
}

fn rows_from_frame(frame: &DataFrame) -> Result<Vec<CriticalPatient>> {
    let ids = result_column(frame, health_columns::PATIENT_ID)?;
    let ages = result_column(frame, health_columns::AGE)?;
    let bmi = result_column(frame, health_columns::BMI)?;
    let clean = result_column(frame, health_columns::BLOOD_PRESSURE_CLEAN)?;
    let mut rows = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        rows.push(CriticalPatient {
            patient_id: text_cell(ids.get(idx)?).unwrap_or_default(),
            age: age_cell(ages.get(idx)?),
            bmi: real_cell(bmi.get(idx)?),
            blood_pressure_clean: real_cell(clean.get(idx)?),
            status: PatientStatus::Critical,
        });
    }
    Ok(rows)
}
