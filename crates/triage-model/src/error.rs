//! Error types shared by every stage of the registry pipeline.

use thiserror::Error;

use crate::enums::PipelineStage;

/// Errors raised while loading, transforming or querying a registry.
///
/// Every variant is local to one pipeline run and is resolved by
/// re-uploading corrected input; nothing here is retried.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// One or more required columns are absent from the uploaded CSV.
    #[error("{source_name} is missing required column(s): {}", .missing.join(", "))]
    Schema {
        source_name: String,
        missing: Vec<String>,
    },

    /// A value could not be coerced to its expected type.
    #[error("row {row}: cannot read {column} value '{value}' as {expected}")]
    Parse {
        /// 1-based data row number (the header is not counted).
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// A required value is absent and the run does not tolerate gaps.
    #[error("row {row}: {column} is missing")]
    MissingInput {
        /// 1-based data row number.
        row: usize,
        column: String,
    },

    /// No input was provided. Not a failure: the pipeline stays idle.
    #[error("no data provided in {source_name}")]
    EmptyInput { source_name: String },

    /// A stage was invoked before the stage it depends on has run.
    #[error("cannot run {operation}: pipeline is {current}, requires {required}")]
    MissingPrerequisite {
        operation: &'static str,
        current: PipelineStage,
        required: PipelineStage,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer rejected the data.
    #[error("csv error in {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    /// The in-memory table rejected an operation.
    #[error("table operation failed: {message}")]
    Table { message: String },
}

impl RegistryError {
    /// Returns false for outcomes that are a no-op rather than a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, RegistryError::EmptyInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
