//! Registry record types.
//!
//! Each record is one row of an uploaded CSV. Raw fields are filled by
//! ingestion; derived fields start empty and are filled by the transform
//! stages.

use chrono::{Datelike, Month, NaiveDate};

use crate::enums::{AgeGroup, RiskLevel};

/// Column names of the health registry.
pub mod health_columns {
    pub const PATIENT_ID: &str = "patient_id";
    pub const AGE: &str = "age";
    pub const BMI: &str = "BMI";
    pub const DISEASE_SCORE: &str = "disease_score";
    pub const BLOOD_PRESSURE: &str = "blood_pressure";
    pub const SEX: &str = "sex";
    pub const BLOOD_PRESSURE_CLEAN: &str = "blood_pressure_clean";
    pub const RISK_LEVEL: &str = "risk_level";
    pub const STATUS: &str = "status";

    /// Columns an uploaded health CSV must provide.
    pub const REQUIRED: [&str; 6] = [PATIENT_ID, AGE, BMI, DISEASE_SCORE, BLOOD_PRESSURE, SEX];

    /// Columns of the critical-patient export, in order.
    pub const CRITICAL_EXPORT: [&str; 5] = [PATIENT_ID, AGE, BMI, BLOOD_PRESSURE_CLEAN, STATUS];
}

/// Column names of the customer registry.
pub mod customer_columns {
    pub const AGE: &str = "age";
    pub const SUBSCRIPTION_DATE: &str = "subscription_date";
    pub const CITY: &str = "city";
    pub const COUNTRY: &str = "country";

    /// Columns an uploaded customer CSV must provide.
    pub const REQUIRED: [&str; 4] = [AGE, SUBSCRIPTION_DATE, CITY, COUNTRY];
}

/// One patient observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientRecord {
    /// Opaque identifier; empty when the cell was blank.
    pub patient_id: String,
    pub age: Option<u32>,
    pub bmi: Option<f64>,
    pub disease_score: Option<f64>,
    /// Free text as captured in the field, e.g. `120mmHg`.
    pub blood_pressure: Option<String>,
    pub sex: Option<String>,
    /// Numeric blood pressure; set by the sanitizer.
    pub blood_pressure_clean: Option<f64>,
    /// Risk label; set by the classifier. `None` means unassessed.
    pub risk_level: Option<RiskLevel>,
}

/// One customer observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRecord {
    /// Age as captured; fractional and negative values are kept as given.
    pub age: Option<f64>,
    pub subscription_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub age_group: AgeGroup,
    pub year_joined: Option<i32>,
    pub month_joined: Option<Month>,
    /// Calendar quarter formatted as `<year>Q<n>`, e.g. `2023Q2`.
    pub quarter_joined: Option<String>,
}

impl CustomerRecord {
    /// Month name of the sign-up date, e.g. `January`.
    pub fn month_name(&self) -> Option<&'static str> {
        self.month_joined.map(|month| month.name())
    }
}

/// Formats the calendar quarter of a date as `<year>Q<n>`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("{}Q{}", date.year(), date.month0() / 3 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_label_covers_boundaries() {
        let q = |y, m, d| quarter_label(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(q(2023, 1, 1), "2023Q1");
        assert_eq!(q(2023, 3, 31), "2023Q1");
        assert_eq!(q(2023, 4, 1), "2023Q2");
        assert_eq!(q(2023, 12, 31), "2023Q4");
    }

    #[test]
    fn export_columns_are_a_projection_of_health_columns() {
        for column in health_columns::CRITICAL_EXPORT {
            assert!(
                health_columns::REQUIRED.contains(&column)
                    || column == health_columns::BLOOD_PRESSURE_CLEAN
                    || column == health_columns::STATUS
            );
        }
    }
}
