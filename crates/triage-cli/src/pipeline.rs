//! Health pipeline session.
//!
//! A [`RegistrySession`] owns one uploaded patient batch and walks it through
//! `Uploaded -> Sanitized -> Classified -> Queryable`. Stages run in order and
//! only once; a new upload discards every derived value and starts over.
//! Queries are available from `Classified` on and build the table on first
//! use.

use std::time::Instant;

use tracing::{debug, info};

use triage_ingest::read_health_bytes;
use triage_model::{PatientRecord, PipelineOptions, PipelineStage, RegistryError, Result};
use triage_query::{CriticalList, DemographicCount, PatientTable, critical_patients, demographics};
use triage_transform::{ClassifyReport, SanitizeReport, classify_patients, sanitize_patients};

/// Session-scoped state of the health pipeline.
#[derive(Debug)]
pub struct RegistrySession {
    source_name: String,
    options: PipelineOptions,
    stage: PipelineStage,
    records: Vec<PatientRecord>,
    sanitize_report: Option<SanitizeReport>,
    classify_report: Option<ClassifyReport>,
    table: Option<PatientTable>,
}

impl RegistrySession {
    /// Parses an uploaded health CSV and starts a session at `Uploaded`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyInput`] for an empty upload and schema or
    /// parse errors for malformed ones.
    pub fn upload(source_name: &str, bytes: &[u8], options: PipelineOptions) -> Result<Self> {
        let records = read_health_bytes(source_name, bytes)?;
        Ok(Self::from_records(source_name, records, options))
    }

    /// Starts a session from already parsed records.
    pub fn from_records(
        source_name: &str,
        records: Vec<PatientRecord>,
        options: PipelineOptions,
    ) -> Self {
        debug!(source = %source_name, records = records.len(), "session started");
        Self {
            source_name: source_name.to_string(),
            options,
            stage: PipelineStage::Uploaded,
            records,
            sanitize_report: None,
            classify_report: None,
            table: None,
        }
    }

    /// Replaces the batch with a new upload and restarts at `Uploaded`.
    ///
    /// On error the previous batch is left untouched.
    pub fn reupload(&mut self, source_name: &str, bytes: &[u8]) -> Result<()> {
        let records = read_health_bytes(source_name, bytes)?;
        *self = Self::from_records(source_name, records, self.options.clone());
        Ok(())
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn sanitize_report(&self) -> Option<SanitizeReport> {
        self.sanitize_report
    }

    pub fn classify_report(&self) -> Option<ClassifyReport> {
        self.classify_report
    }

    /// Fills `blood_pressure_clean` and moves to `Sanitized`.
    pub fn sanitize(&mut self) -> Result<SanitizeReport> {
        self.require("sanitize", PipelineStage::Uploaded)?;
        let start = Instant::now();
        let (records, report) = sanitize_patients(std::mem::take(&mut self.records));
        self.records = records;
        self.sanitize_report = Some(report);
        self.stage = PipelineStage::Sanitized;
        info!(
            source = %self.source_name,
            duration_ms = start.elapsed().as_millis(),
            "sanitize stage complete"
        );
        Ok(report)
    }

    /// Fills `risk_level` and moves to `Classified`.
    ///
    /// Under the strict policy a record with a missing input fails the stage
    /// and the session stays `Sanitized` with its records unchanged.
    pub fn classify(&mut self) -> Result<ClassifyReport> {
        self.require("classify", PipelineStage::Sanitized)?;
        let start = Instant::now();
        let (records, report) = classify_patients(self.records.clone(), self.options.missing_values)?;
        self.records = records;
        self.classify_report = Some(report);
        self.stage = PipelineStage::Classified;
        info!(
            source = %self.source_name,
            duration_ms = start.elapsed().as_millis(),
            "classify stage complete"
        );
        Ok(report)
    }

    /// Builds the in-memory table and moves to `Queryable`.
    pub fn load_table(&mut self) -> Result<&PatientTable> {
        self.require("load table", PipelineStage::Classified)?;
        let table = PatientTable::from_records(&self.records)?;
        info!(rows = table.height(), "patient table loaded");
        self.stage = PipelineStage::Queryable;
        Ok(self.table.insert(table))
    }

    /// Runs the stage that follows the current one and returns the stage
    /// reached, or `None` once the session is `Queryable`.
    pub fn advance(&mut self) -> Result<Option<PipelineStage>> {
        let Some(next) = self.stage.next() else {
            return Ok(None);
        };
        match next {
            PipelineStage::Sanitized => {
                self.sanitize()?;
            }
            PipelineStage::Classified => {
                self.classify()?;
            }
            PipelineStage::Queryable => {
                self.load_table()?;
            }
            PipelineStage::Uploaded => return Ok(None),
        }
        Ok(Some(self.stage))
    }

    /// Runs every remaining stage up to `Queryable`.
    pub fn process(&mut self) -> Result<()> {
        while self.advance()?.is_some() {}
        Ok(())
    }

    /// Patient counts per (`sex`, `risk_level`).
    pub fn demographics(&mut self) -> Result<Vec<DemographicCount>> {
        let table = self.queryable("demographics query")?;
        Ok(demographics(table)?)
    }

    /// High-risk patients with a disease score above 80.
    pub fn critical(&mut self) -> Result<CriticalList> {
        let table = self.queryable("critical export query")?;
        Ok(critical_patients(table)?)
    }

    fn require(&self, operation: &'static str, required: PipelineStage) -> Result<()> {
        if self.stage == required {
            Ok(())
        } else {
            Err(RegistryError::MissingPrerequisite {
                operation,
                current: self.stage,
                required,
            })
        }
    }

    fn queryable(&mut self, operation: &'static str) -> Result<&PatientTable> {
        if self.stage == PipelineStage::Classified {
            self.load_table()?;
        }
        match (&self.table, self.stage) {
            (Some(table), PipelineStage::Queryable) => Ok(table),
            _ => Err(RegistryError::MissingPrerequisite {
                operation,
                current: self.stage,
                required: PipelineStage::Classified,
            }),
        }
    }
}
