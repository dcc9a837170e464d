//! Customer enrichment: age buckets and sign-up date parts.

use chrono::{Datelike, Month};
use tracing::info;

use triage_model::{AgeGroup, CustomerRecord, quarter_label};

/// Upper bound (exclusive) of the Youth bucket.
pub const YOUTH_MAX_AGE: f64 = 25.0;
/// Lower bound (inclusive) of the Senior bucket.
pub const SENIOR_MIN_AGE: f64 = 60.0;

/// Buckets an age by value. Every input maps to exactly one group: anything
/// below 25 (negative ages included) is Youth, and a missing or NaN age is
/// Unknown.
pub fn age_group(age: Option<f64>) -> AgeGroup {
    match age {
        Some(age) if age.is_nan() => AgeGroup::Unknown,
        Some(age) if age < YOUTH_MAX_AGE => AgeGroup::Youth,
        Some(age) if age < SENIOR_MIN_AGE => AgeGroup::Adult,
        Some(_) => AgeGroup::Senior,
        None => AgeGroup::Unknown,
    }
}

/// Fills the derived fields of one customer.
pub fn enrich_customer(mut record: CustomerRecord) -> CustomerRecord {
    record.age_group = age_group(record.age);
    match record.subscription_date {
        Some(date) => {
            record.year_joined = Some(date.year());
            record.month_joined = u8::try_from(date.month())
                .ok()
                .and_then(|month| Month::try_from(month).ok());
            record.quarter_joined = Some(quarter_label(date));
        }
        None => {
            record.year_joined = None;
            record.month_joined = None;
            record.quarter_joined = None;
        }
    }
    record
}

/// Fills the derived fields of every customer.
pub fn enrich_customers(records: Vec<CustomerRecord>) -> Vec<CustomerRecord> {
    let records: Vec<CustomerRecord> = records.into_iter().map(enrich_customer).collect();
    let undated = records
        .iter()
        .filter(|record| record.subscription_date.is_none())
        .count();
    info!(
        record_count = records.len(),
        undated,
        "customers enriched"
    );
    records
}
