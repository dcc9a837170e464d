use triage_model::{RegistryError, Result};

use crate::csv_table::CsvTable;

/// Resolves the position of every required column.
///
/// All absent columns are reported together so one re-upload fixes them.
pub fn resolve_columns<const N: usize>(table: &CsvTable, required: [&str; N]) -> Result<[usize; N]> {
    let mut indices = [0usize; N];
    let mut missing = Vec::new();
    for (slot, name) in required.iter().enumerate() {
        match table.column_index(name) {
            Some(index) => indices[slot] = index,
            None => missing.push((*name).to_string()),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(RegistryError::Schema {
            source_name: table.source_name.clone(),
            missing,
        })
    }
}
