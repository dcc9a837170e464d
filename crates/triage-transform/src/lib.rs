//! Registry transformation stages.
//!
//! - **sanitize**: blood pressure text to numeric values
//! - **classify**: BMI/disease-score risk labels
//! - **customer**: customer age buckets and sign-up date parts
//!
//! Each stage takes ownership of a record batch and returns it enriched,
//! together with a small report of what it did.

pub mod classify;
pub mod customer;
pub mod sanitize;

pub use classify::{ClassifyReport, assess_risk, classify_patients, classify_risk};
pub use customer::{age_group, enrich_customer, enrich_customers};
pub use sanitize::{SanitizeReport, clean_blood_pressure, first_decimal_token, sanitize_patients};
