use polars::prelude::{IntoLazy, col, len};
use serde::Serialize;
use tracing::info;

use triage_model::{RiskLevel, health_columns};

use crate::error::Result;
use crate::frame::{PatientTable, result_column};
use crate::values::{count_cell, text_cell};

const COUNT: &str = "count";

/// Patients sharing one (`sex`, `risk_level`) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicCount {
    /// `None` when sex was not recorded.
    pub sex: Option<String>,
    /// `None` for unassessed patients.
    pub risk_level: Option<RiskLevel>,
    pub count: usize,
}

/// Counts patients per observed (`sex`, `risk_level`) combination.
///
/// Every distinct combination present in the table appears exactly once,
/// sorted by sex then risk level.
pub fn demographics(table: &PatientTable) -> Result<Vec<DemographicCount>> {
    let grouped = table
        .data()
        .clone()
        .lazy()
        .group_by([col(health_columns::SEX), col(health_columns::RISK_LEVEL)])
        .agg([len().alias(COUNT)])
        .collect()?;

    let sex = result_column(&grouped, health_columns::SEX)?;
    let risk = result_column(&grouped, health_columns::RISK_LEVEL)?;
    let count = result_column(&grouped, COUNT)?;
    let mut rows = Vec::with_capacity(grouped.height());
    for idx in 0..grouped.height() {
        rows.push(DemographicCount {
            sex: text_cell(sex.get(idx)?),
            risk_level: text_cell(risk.get(idx)?).and_then(|label| label.parse::<RiskLevel>().ok()),
            count: count_cell(count.get(idx)?),
        });
    }
    rows.sort_by(|a, b| (&a.sex, a.risk_level).cmp(&(&b.sex, b.risk_level)));
    info!(groups = rows.len(), patients = table.height(), "demographics query complete");
    Ok(rows)
}
