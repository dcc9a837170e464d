//! Configuration options for registry processing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of bins for the patient age histogram.
pub const DEFAULT_HISTOGRAM_BINS: usize = 15;

/// Default number of rows shown in before/after previews.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// What the classifier does when BMI or disease score is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingValuePolicy {
    /// Leave the record unassessed and report it as `Unknown`.
    #[default]
    Unknown,
    /// Reject the upload, naming the first offending row.
    Reject,
}

/// Options controlling registry processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Handling of records whose classifier inputs are missing.
    pub missing_values: MissingValuePolicy,

    /// Reference date for customer tenure. `None` means today.
    pub as_of: Option<NaiveDate>,

    /// Number of bins for the patient age histogram.
    pub histogram_bins: usize,

    /// Number of rows shown in before/after previews.
    pub preview_rows: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            missing_values: MissingValuePolicy::Unknown,
            as_of: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that refuse to classify incomplete records.
    pub fn strict() -> Self {
        Self {
            missing_values: MissingValuePolicy::Reject,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_missing_values(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_values = policy;
        self
    }

    #[must_use]
    pub fn with_as_of(mut self, as_of: Option<NaiveDate>) -> Self {
        self.as_of = as_of;
        self
    }

    /// Set the histogram bin count (at least one bin is always used).
    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins.max(1);
        self
    }

    #[must_use]
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }
}
