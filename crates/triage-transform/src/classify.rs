//! Rule-based health risk classifier.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `BMI > 30` and `disease_score > 80` is `High`
//! 2. `BMI > 25` and `disease_score > 60` is `Medium`
//! 3. anything else is `Low`
//!
//! All thresholds are strict. A record missing either input is never
//! defaulted to `Low`; see [`MissingValuePolicy`].

use tracing::{debug, info, warn};

use triage_model::{
    MissingValuePolicy, PatientRecord, RegistryError, Result, RiskLevel, health_columns,
};

pub const HIGH_RISK_BMI: f64 = 30.0;
pub const HIGH_RISK_SCORE: f64 = 80.0;
pub const MEDIUM_RISK_BMI: f64 = 25.0;
pub const MEDIUM_RISK_SCORE: f64 = 60.0;

/// Classifies a pair of real-valued inputs.
pub fn classify_risk(bmi: f64, disease_score: f64) -> RiskLevel {
    if bmi > HIGH_RISK_BMI && disease_score > HIGH_RISK_SCORE {
        RiskLevel::High
    } else if bmi > MEDIUM_RISK_BMI && disease_score > MEDIUM_RISK_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classifies when both inputs are present real numbers; `None` otherwise.
pub fn assess_risk(bmi: Option<f64>, disease_score: Option<f64>) -> Option<RiskLevel> {
    let bmi = bmi.filter(|value| !value.is_nan())?;
    let disease_score = disease_score.filter(|value| !value.is_nan())?;
    Some(classify_risk(bmi, disease_score))
}

/// Label counts produced by one classifier run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyReport {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub unassessed: usize,
}

impl ClassifyReport {
    fn record(&mut self, level: Option<RiskLevel>) {
        match level {
            Some(RiskLevel::Low) => self.low += 1,
            Some(RiskLevel::Medium) => self.medium += 1,
            Some(RiskLevel::High) => self.high += 1,
            None => self.unassessed += 1,
        }
    }
}

fn first_missing_input(record: &PatientRecord) -> Option<&'static str> {
    if record.bmi.is_none_or(f64::is_nan) {
        Some(health_columns::BMI)
    } else if record.disease_score.is_none_or(f64::is_nan) {
        Some(health_columns::DISEASE_SCORE)
    } else {
        None
    }
}

/// Fills `risk_level` on every record.
///
/// Under [`MissingValuePolicy::Reject`] the first record lacking an input
/// fails the whole batch with [`RegistryError::MissingInput`].
pub fn classify_patients(
    mut records: Vec<PatientRecord>,
    policy: MissingValuePolicy,
) -> Result<(Vec<PatientRecord>, ClassifyReport)> {
    let mut report = ClassifyReport::default();
    for (idx, record) in records.iter_mut().enumerate() {
        if let Some(column) = first_missing_input(record) {
            match policy {
                MissingValuePolicy::Reject => {
                    return Err(RegistryError::MissingInput {
                        row: idx + 1,
                        column: column.to_string(),
                    });
                }
                MissingValuePolicy::Unknown => {
                    debug!(row = idx + 1, column, "risk not assessed");
                }
            }
        }
        let level = assess_risk(record.bmi, record.disease_score);
        report.record(level);
        record.risk_level = level;
    }
    if report.unassessed > 0 {
        warn!(
            unassessed = report.unassessed,
            "records missing BMI or disease_score are reported as Unknown"
        );
    }
    info!(
        low = report.low,
        medium = report.medium,
        high = report.high,
        unassessed = report.unassessed,
        "risk classified"
    );
    Ok((records, report))
}
