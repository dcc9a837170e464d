//! Tabular query layer over classified patients.
//!
//! The layer answers exactly two fixed queries against an in-memory table:
//!
//! - **demographics**: patient counts per (`sex`, `risk_level`)
//! - **critical**: high-risk patients with a disease score above 80
//!
//! and exports the critical list as CSV.

pub mod critical;
pub mod demographics;
pub mod error;
pub mod export;
pub mod frame;
pub mod values;

pub use critical::{CRITICAL_DISEASE_SCORE, CriticalList, CriticalPatient, critical_patients};
pub use demographics::{DemographicCount, demographics};
pub use error::{QueryError, Result};
pub use export::{
    CRITICAL_EXPORT_FILE, critical_csv_bytes, export_critical_csv, read_critical_csv,
    write_critical_csv,
};
pub use frame::PatientTable;
pub use values::format_numeric;
