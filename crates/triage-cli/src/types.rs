use std::path::PathBuf;

use serde::Serialize;

use triage_model::PipelineStage;
use triage_query::{CriticalPatient, DemographicCount};
use triage_report::{CustomerInsights, HealthInsights};
use triage_transform::{ClassifyReport, SanitizeReport};

#[derive(Debug, Serialize)]
pub struct CustomerRun {
    pub source: PathBuf,
    pub insights: CustomerInsights,
}

#[derive(Debug, Serialize)]
pub struct HealthRun {
    pub source: PathBuf,
    pub stages: StageCounts,
    pub insights: HealthInsights,
}

#[derive(Debug, Serialize)]
pub struct RegistryRun {
    pub source: PathBuf,
    pub stage: PipelineStage,
    pub stages: StageCounts,
    pub demographics: Vec<DemographicCount>,
    pub critical: Vec<CriticalPatient>,
    /// `None` on a dry run.
    pub export: Option<PathBuf>,
}

/// Record counts reported by the sanitize and classify stages.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageCounts {
    pub records: usize,
    pub bp_cleaned: usize,
    pub bp_coerced: usize,
    pub bp_missing: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub unassessed: usize,
}

impl StageCounts {
    pub fn new(records: usize, sanitize: SanitizeReport, classify: ClassifyReport) -> Self {
        Self {
            records,
            bp_cleaned: sanitize.cleaned,
            bp_coerced: sanitize.coerced,
            bp_missing: sanitize.missing,
            low: classify.low,
            medium: classify.medium,
            high: classify.high,
            unassessed: classify.unassessed,
        }
    }
}
