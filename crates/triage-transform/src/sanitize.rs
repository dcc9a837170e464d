//! Blood pressure field sanitizer.
//!
//! Field nurses record readings such as `120mmHg` or `~135`. The sanitizer
//! keeps only ASCII digits and decimal points and parses what remains. When
//! more than one decimal point survives, only the first decimal token is
//! kept (`12.3.4` reads as `12.3`).

use tracing::{debug, info};

use triage_model::PatientRecord;

/// Cleans one raw blood pressure value.
///
/// Returns a finite, non-negative number, or `None` when nothing numeric
/// remains. Never fails.
///
/// # Examples
///
/// ```
/// use triage_transform::clean_blood_pressure;
///
/// assert_eq!(clean_blood_pressure(Some("120mmHg")), Some(120.0));
/// assert_eq!(clean_blood_pressure(Some("12.3.4")), Some(12.3));
/// assert_eq!(clean_blood_pressure(Some("missing")), None);
/// assert_eq!(clean_blood_pressure(None), None);
/// ```
pub fn clean_blood_pressure(raw: Option<&str>) -> Option<f64> {
    let stripped: String = raw?
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    let token = first_decimal_token(&stripped);
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Truncates `value` before its second decimal point.
pub fn first_decimal_token(value: &str) -> &str {
    match value.match_indices('.').nth(1) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Counts produced by one sanitizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Records with a numeric `blood_pressure_clean`.
    pub cleaned: usize,
    /// Records whose raw text had to be stripped to parse.
    pub coerced: usize,
    /// Records left without a reading.
    pub missing: usize,
}

/// Fills `blood_pressure_clean` on every record.
pub fn sanitize_patients(mut records: Vec<PatientRecord>) -> (Vec<PatientRecord>, SanitizeReport) {
    let mut report = SanitizeReport::default();
    for (idx, record) in records.iter_mut().enumerate() {
        let raw = record.blood_pressure.as_deref();
        let clean = clean_blood_pressure(raw);
        match (raw, clean) {
            (_, None) => report.missing += 1,
            (Some(text), Some(value)) => {
                report.cleaned += 1;
                if text.trim().parse::<f64>().ok() != Some(value) {
                    report.coerced += 1;
                    debug!(row = idx + 1, value, "blood pressure coerced to numeric");
                }
            }
            (None, Some(_)) => {}
        }
        record.blood_pressure_clean = clean;
    }
    info!(
        cleaned = report.cleaned,
        coerced = report.coerced,
        missing = report.missing,
        "blood pressure sanitized"
    );
    (records, report)
}
