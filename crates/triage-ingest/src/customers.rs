//! Customer registry ingestion.

use std::path::Path;

use tracing::info;

use triage_model::{AgeGroup, CustomerRecord, Result, customer_columns};

use crate::csv_table::{CsvTable, read_csv_bytes, read_csv_table};
use crate::schema::resolve_columns;
use crate::values::{optional_text, parse_optional_date, parse_optional_f64};

/// Converts a raw table into customer records with empty derived fields.
pub fn customers_from_table(table: &CsvTable) -> Result<Vec<CustomerRecord>> {
    let [age_col, date_col, city_col, country_col] =
        resolve_columns(table, customer_columns::REQUIRED)?;
    let mut records = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let row = idx + 1;
        let value = |column: usize| table.value(idx, column);
        records.push(CustomerRecord {
            age: parse_optional_f64(value(age_col), row, customer_columns::AGE)?,
            subscription_date: parse_optional_date(
                value(date_col),
                row,
                customer_columns::SUBSCRIPTION_DATE,
            )?,
            city: optional_text(value(city_col)),
            country: optional_text(value(country_col)),
            age_group: AgeGroup::Unknown,
            year_joined: None,
            month_joined: None,
            quarter_joined: None,
        });
    }
    info!(
        source = %table.source_name,
        record_count = records.len(),
        "customer registry loaded"
    );
    Ok(records)
}

/// Loads a customer registry CSV from disk.
pub fn read_customer_csv(path: &Path) -> Result<Vec<CustomerRecord>> {
    customers_from_table(&read_csv_table(path)?)
}

/// Loads an uploaded customer registry CSV.
pub fn read_customer_bytes(source_name: &str, bytes: &[u8]) -> Result<Vec<CustomerRecord>> {
    customers_from_table(&read_csv_bytes(source_name, bytes)?)
}
