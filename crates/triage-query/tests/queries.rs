//! Integration tests for the demographics and critical-export queries.

use std::collections::BTreeMap;

use triage_ingest::read_health_bytes;
use triage_model::{MissingValuePolicy, PatientRecord, PatientStatus, RiskLevel};
use triage_query::{
    PatientTable, critical_csv_bytes, critical_patients, demographics, export_critical_csv,
    read_critical_csv,
};
use triage_transform::{classify_patients, sanitize_patients};

fn patient(id: &str, sex: &str, risk: RiskLevel, disease_score: f64) -> PatientRecord {
    PatientRecord {
        patient_id: id.to_string(),
        age: Some(50),
        bmi: Some(31.0),
        disease_score: Some(disease_score),
        blood_pressure: Some("130".to_string()),
        sex: Some(sex.to_string()),
        blood_pressure_clean: Some(130.0),
        risk_level: Some(risk),
    }
}

#[test]
fn demographics_counts_every_observed_combination() {
    let records = vec![
        patient("P1", "F", RiskLevel::High, 90.0),
        patient("P2", "F", RiskLevel::High, 85.0),
        patient("P3", "M", RiskLevel::Low, 10.0),
        patient("P4", "F", RiskLevel::Low, 20.0),
    ];
    let table = PatientTable::from_records(&records).unwrap();
    let counts: BTreeMap<(String, RiskLevel), usize> = demographics(&table)
        .unwrap()
        .into_iter()
        .map(|row| {
            (
                (row.sex.unwrap_or_default(), row.risk_level.unwrap()),
                row.count,
            )
        })
        .collect();

    let expected: BTreeMap<(String, RiskLevel), usize> = [
        (("F".to_string(), RiskLevel::High), 2),
        (("M".to_string(), RiskLevel::Low), 1),
        (("F".to_string(), RiskLevel::Low), 1),
    ]
    .into_iter()
    .collect();
    assert_eq!(counts, expected);
}

#[test]
fn demographics_groups_unassessed_and_unrecorded() {
    let mut unassessed = patient("P1", "M", RiskLevel::Low, 10.0);
    unassessed.risk_level = None;
    let mut no_sex = patient("P2", "F", RiskLevel::Medium, 70.0);
    no_sex.sex = None;
    let table = PatientTable::from_records(&[unassessed, no_sex]).unwrap();

    let rows = demographics(&table).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sex, None);
    assert_eq!(rows[0].risk_level, Some(RiskLevel::Medium));
    assert_eq!(rows[1].sex.as_deref(), Some("M"));
    assert_eq!(rows[1].risk_level, None);
}

#[test]
fn demographics_of_empty_table_is_empty() {
    let table = PatientTable::from_records(&[]).unwrap();
    assert!(demographics(&table).unwrap().is_empty());
}

#[test]
fn critical_requires_high_risk_and_score_above_80() {
    let records = vec![
        patient("P1", "F", RiskLevel::High, 85.0),
        patient("P2", "M", RiskLevel::Medium, 85.0),
        patient("P3", "F", RiskLevel::High, 80.0),
    ];
    let table = PatientTable::from_records(&records).unwrap();
    let list = critical_patients(&table).unwrap();

    assert_eq!(list.len(), 1);
    let row = &list.rows()[0];
    assert_eq!(row.patient_id, "P1");
    assert_eq!(row.status, PatientStatus::Critical);
    assert_eq!(row.age, Some(50));
    assert_eq!(row.bmi, Some(31.0));
    assert_eq!(row.blood_pressure_clean, Some(130.0));

    let names: Vec<String> = list
        .frame()
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec!["patient_id", "age", "BMI", "blood_pressure_clean", "status"]
    );
}

#[test]
fn empty_critical_list_is_not_an_error() {
    let records = vec![patient("P1", "F", RiskLevel::Low, 20.0)];
    let table = PatientTable::from_records(&records).unwrap();
    let list = critical_patients(&table).unwrap();
    assert!(list.is_empty());

    let bytes = critical_csv_bytes(&list).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert_eq!(text.trim_end(), "patient_id,age,BMI,blood_pressure_clean,status");
    assert!(read_critical_csv("export", &bytes).unwrap().is_empty());
}

#[test]
fn export_round_trips_through_csv() {
    let mut missing_bp = patient("P2", "M", RiskLevel::High, 99.5);
    missing_bp.blood_pressure_clean = None;
    missing_bp.age = None;
    let records = vec![
        patient("P1", "F", RiskLevel::High, 85.0),
        missing_bp,
        patient("P3, Jr", "F", RiskLevel::High, 81.0),
    ];
    let table = PatientTable::from_records(&records).unwrap();
    let list = critical_patients(&table).unwrap();

    let bytes = critical_csv_bytes(&list).unwrap();
    let reparsed = read_critical_csv("critical_patients.csv", &bytes).unwrap();
    assert_eq!(reparsed.len(), list.len());
    assert_eq!(reparsed.as_slice(), list.rows());
}

#[test]
fn export_writes_file() {
    let records = vec![patient("P1", "F", RiskLevel::High, 85.0)];
    let table = PatientTable::from_records(&records).unwrap();
    let list = critical_patients(&table).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critical_patients.csv");
    export_critical_csv(&list, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let reparsed = read_critical_csv("critical_patients.csv", &bytes).unwrap();
    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].patient_id, "P1");
}

#[test]
fn sample_row_flows_end_to_end() {
    let csv = b"patient_id,age,BMI,disease_score,blood_pressure,sex\n\
                P100,58,32,85,120mmHg,F\n\
                P101,44,27,65,135/85,M\n";
    let records = read_health_bytes("health_data.csv", csv).unwrap();
    let (records, _) = sanitize_patients(records);
    let (records, _) = classify_patients(records, MissingValuePolicy::Unknown).unwrap();

    assert_eq!(records[0].blood_pressure_clean, Some(120.0));
    assert_eq!(records[0].risk_level, Some(RiskLevel::High));
    assert_eq!(records[1].risk_level, Some(RiskLevel::Medium));

    let table = PatientTable::from_records(&records).unwrap();
    let list = critical_patients(&table).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.rows()[0].patient_id, "P100");
    assert_eq!(list.rows()[0].blood_pressure_clean, Some(120.0));
    assert_eq!(list.rows()[0].status, PatientStatus::Critical);
}
