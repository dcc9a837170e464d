//! Health registry insight series.

use serde::Serialize;
use tracing::debug;

use triage_model::{PatientRecord, RiskLevel};

use crate::stats::{FiveNumberSummary, HistogramBin, Tally, five_number_summary, histogram};

/// BMI distribution of one risk level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBmi {
    pub risk_level: RiskLevel,
    /// `None` when no patient of this level has a BMI.
    pub summary: Option<FiveNumberSummary>,
}

/// Raw and cleaned blood pressure of one patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningPreview {
    pub patient_id: String,
    pub blood_pressure: Option<String>,
    pub blood_pressure_clean: Option<f64>,
}

/// Every series the health dashboard charted.
#[derive(Debug, Clone, Serialize)]
pub struct HealthInsights {
    pub total: usize,
    /// `Low, Medium, High`, then `Unknown` when any patient is unassessed.
    pub risk_counts: Vec<Tally>,
    pub bmi_by_risk: Vec<RiskBmi>,
    pub age_histogram: Vec<HistogramBin>,
    pub preview: Vec<CleaningPreview>,
}

/// Computes the health series from classified records.
pub fn build_health_insights(
    records: &[PatientRecord],
    bins: usize,
    preview_rows: usize,
) -> HealthInsights {
    let mut risk_counts: Vec<Tally> = RiskLevel::ALL
        .iter()
        .map(|level| {
            let count = records
                .iter()
                .filter(|record| record.risk_level == Some(*level))
                .count();
            Tally::new(level.as_str(), count)
        })
        .collect();
    let unassessed = records
        .iter()
        .filter(|record| record.risk_level.is_none())
        .count();
    if unassessed > 0 {
        risk_counts.push(Tally::new(RiskLevel::UNASSESSED_LABEL, unassessed));
    }

    let bmi_by_risk = RiskLevel::ALL
        .iter()
        .map(|level| {
            let values: Vec<f64> = records
                .iter()
                .filter(|record| record.risk_level == Some(*level))
                .filter_map(|record| record.bmi)
                .collect();
            RiskBmi {
                risk_level: *level,
                summary: five_number_summary(&values),
            }
        })
        .collect();

    let ages: Vec<f64> = records
        .iter()
        .filter_map(|record| record.age.map(f64::from))
        .collect();

    let preview = records
        .iter()
        .take(preview_rows)
        .map(|record| CleaningPreview {
            patient_id: record.patient_id.clone(),
            blood_pressure: record.blood_pressure.clone(),
            blood_pressure_clean: record.blood_pressure_clean,
        })
        .collect();

    let insights = HealthInsights {
        total: records.len(),
        risk_counts,
        bmi_by_risk,
        age_histogram: histogram(&ages, bins),
        preview,
    };
    debug!(
        total = insights.total,
        unassessed,
        bins = insights.age_histogram.len(),
        "health insights computed"
    );
    insights
}
