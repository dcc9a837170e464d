pub mod enums;
pub mod error;
pub mod options;
pub mod record;

pub use enums::{AgeGroup, PatientStatus, PipelineStage, RiskLevel};
pub use error::{RegistryError, Result};
pub use options::{
    DEFAULT_HISTOGRAM_BINS, DEFAULT_PREVIEW_ROWS, MissingValuePolicy, PipelineOptions,
};
pub use record::{CustomerRecord, PatientRecord, customer_columns, health_columns, quarter_label};
