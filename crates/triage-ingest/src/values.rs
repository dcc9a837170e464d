//! Typed parsing of CSV cells.
//!
//! Blank cells and the usual spreadsheet null markers (`NA`, `N/A`, `null`,
//! `NaN`, ...) are treated as missing. Anything else must parse as the
//! expected type or the row is rejected with [`RegistryError::Parse`].

use chrono::{NaiveDate, NaiveDateTime};

use triage_model::{RegistryError, Result};

/// Cell contents read as missing.
const MISSING_MARKERS: [&str; 16] = [
    "", "#N/A", "#N/A N/A", "#NA", "<NA>", "N/A", "NA", "NULL", "NaN", "-NaN", "None", "n/a",
    "nan", "-nan", "null", "none",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Returns true when a cell holds no value.
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value.trim())
}

/// Returns the trimmed cell text, or `None` when missing.
pub fn optional_text(value: &str) -> Option<String> {
    if is_missing(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn parse_error(row: usize, column: &str, value: &str, expected: &'static str) -> RegistryError {
    RegistryError::Parse {
        row,
        column: column.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Parses a finite real number.
pub fn parse_optional_f64(value: &str, row: usize, column: &str) -> Result<Option<f64>> {
    if is_missing(value) {
        return Ok(None);
    }
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(parse_error(row, column, value, "number")),
    }
}

/// Parses a non-negative whole age. Integral decimals such as `42.0` are accepted.
pub fn parse_optional_age(value: &str, row: usize, column: &str) -> Result<Option<u32>> {
    if is_missing(value) {
        return Ok(None);
    }
    let trimmed = value.trim();
    if let Ok(age) = trimmed.parse::<u32>() {
        return Ok(Some(age));
    }
    match trimmed.parse::<f64>() {
        Ok(age) if age.is_finite() && age >= 0.0 && age.fract() == 0.0 && age <= f64::from(u32::MAX) => {
            Ok(Some(age as u32))
        }
        _ => Err(parse_error(row, column, value, "non-negative whole number")),
    }
}

/// Parses a calendar date; datetimes keep only their date part.
pub fn parse_optional_date(value: &str, row: usize, column: &str) -> Result<Option<NaiveDate>> {
    if is_missing(value) {
        return Ok(None);
    }
    let trimmed = value.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(Some(date));
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Some(datetime.date()));
        }
    }
    Err(parse_error(row, column, value, "date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("  NA "));
        assert!(is_missing("null"));
        assert!(!is_missing("0"));
        assert!(!is_missing("missing"));
        assert_eq!(optional_text(" Cape Town "), Some("Cape Town".to_string()));
        assert_eq!(optional_text("N/A"), None);
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_optional_f64(" 31.5 ", 1, "BMI").unwrap(), Some(31.5));
        assert_eq!(parse_optional_f64("", 1, "BMI").unwrap(), None);
        let err = parse_optional_f64("heavy", 4, "BMI").unwrap_err();
        assert_eq!(
            err.to_string(),
            "row 4: cannot read BMI value 'heavy' as number"
        );
        assert!(parse_optional_f64("inf", 1, "BMI").is_err());
    }

    #[test]
    fn parses_ages() {
        assert_eq!(parse_optional_age("42", 1, "age").unwrap(), Some(42));
        assert_eq!(parse_optional_age("42.0", 1, "age").unwrap(), Some(42));
        assert_eq!(parse_optional_age("NaN", 1, "age").unwrap(), None);
        assert!(parse_optional_age("-3", 1, "age").is_err());
        assert!(parse_optional_age("42.5", 1, "age").is_err());
        assert!(parse_optional_age("forty", 1, "age").is_err());
    }

    #[test]
    fn parses_dates() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 14);
        assert_eq!(parse_optional_date("2023-03-14", 1, "d").unwrap(), expected);
        assert_eq!(parse_optional_date("2023/03/14", 1, "d").unwrap(), expected);
        assert_eq!(parse_optional_date("14/03/2023", 1, "d").unwrap(), expected);
        assert_eq!(
            parse_optional_date("2023-03-14 08:30:00", 1, "d").unwrap(),
            expected
        );
        assert_eq!(
            parse_optional_date("2023-03-14T08:30:00.250", 1, "d").unwrap(),
            expected
        );
        assert_eq!(parse_optional_date("", 1, "d").unwrap(), None);
        assert!(parse_optional_date("yesterday", 1, "d").is_err());
        assert!(parse_optional_date("2023-02-30", 1, "d").is_err());
    }
}
