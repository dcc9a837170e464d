//! Registry ingestion: CSV loading, header normalization, schema checks and
//! typed parsing of the customer and health registries.

pub mod csv_table;
pub mod customers;
pub mod health;
pub mod schema;
pub mod values;

pub use csv_table::{CsvTable, read_csv_bytes, read_csv_table, read_csv_table_from_reader};
pub use customers::{customers_from_table, read_customer_bytes, read_customer_csv};
pub use health::{patients_from_table, read_health_bytes, read_health_csv};
pub use schema::resolve_columns;
pub use values::{
    is_missing, optional_text, parse_optional_age, parse_optional_date, parse_optional_f64,
};
