//! Cell readers for the dtypes a [`PatientTable`](crate::PatientTable) holds.
//!
//! Text columns are `String`, `age` is `Int64`, the measurements are
//! `Float64`, and group counts come back as the polars index type.

use polars::prelude::AnyValue;

/// Reads a text cell; null and blank cells are `None`.
pub fn text_cell(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::String(text) => text.to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Reads a `Float64` measurement cell.
pub fn real_cell(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Float64(v) => Some(v),
        _ => None,
    }
}

/// Reads the `Int64` age column back into a patient age.
pub fn age_cell(value: AnyValue<'_>) -> Option<u32> {
    match value {
        AnyValue::Int64(v) => u32::try_from(v).ok(),
        _ => None,
    }
}

/// Reads a `len()` aggregate. Counts are `UInt32`, or `UInt64` on
/// big-index builds.
pub fn count_cell(value: AnyValue<'_>) -> usize {
    match value {
        AnyValue::UInt32(v) => v as usize,
        AnyValue::UInt64(v) => usize::try_from(v).unwrap_or(usize::MAX),
        _ => 0,
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use triage_query::format_numeric;
///
/// assert_eq!(format_numeric(120.0), "120");
/// assert_eq!(format_numeric(31.50), "31.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cells_skip_null_and_blank() {
        assert_eq!(text_cell(AnyValue::Null), None);
        assert_eq!(text_cell(AnyValue::String("  ")), None);
        assert_eq!(text_cell(AnyValue::String("M")), Some("M".to_string()));
    }

    #[test]
    fn numeric_cells_read_only_their_dtype() {
        assert_eq!(real_cell(AnyValue::Float64(32.5)), Some(32.5));
        assert_eq!(real_cell(AnyValue::Null), None);
        assert_eq!(real_cell(AnyValue::String("2.5")), None);

        assert_eq!(age_cell(AnyValue::Int64(54)), Some(54));
        assert_eq!(age_cell(AnyValue::Int64(-1)), None);
        assert_eq!(age_cell(AnyValue::Null), None);

        assert_eq!(count_cell(AnyValue::UInt32(7)), 7);
        assert_eq!(count_cell(AnyValue::UInt64(9)), 9);
        assert_eq!(count_cell(AnyValue::Null), 0);
    }

    #[test]
    fn format_numeric_keeps_integer_zeros() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(120.5), "120.5");
        assert_eq!(format_numeric(-2.0), "-2");
    }
}
