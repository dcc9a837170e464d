//! Error types for the query layer.

use thiserror::Error;

use triage_model::RegistryError;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The in-memory table rejected an operation.
    #[error("table operation failed: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required column is absent from a query result.
    #[error("column '{column}' not found in query result")]
    ColumnNotFound { column: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl From<QueryError> for RegistryError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Registry(inner) => inner,
            QueryError::Io(inner) => RegistryError::Io(inner),
            other => RegistryError::Table {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("sex".into());
        let query_err: QueryError = polars_err.into();
        assert!(matches!(query_err, QueryError::Polars(_)));
        let registry_err: RegistryError = query_err.into();
        assert!(matches!(registry_err, RegistryError::Table { .. }));
    }

    #[test]
    fn registry_errors_pass_through() {
        let err: RegistryError = QueryError::Registry(RegistryError::EmptyInput {
            source_name: "export".to_string(),
        })
        .into();
        assert!(matches!(err, RegistryError::EmptyInput { .. }));
    }
}
