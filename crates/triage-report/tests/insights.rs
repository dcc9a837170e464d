//! Integration tests for the customer and health insight series.

use chrono::NaiveDate;

use triage_model::{CustomerRecord, MissingValuePolicy, PatientRecord, RiskLevel};
use triage_report::{Tally, build_customer_insights, build_health_insights};
use triage_transform::{classify_patients, enrich_customers, sanitize_patients};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn customer(age: Option<f64>, joined: Option<NaiveDate>, city: &str, country: &str) -> CustomerRecord {
    CustomerRecord {
        age,
        subscription_date: joined,
        city: Some(city.to_string()),
        country: Some(country.to_string()),
        ..CustomerRecord::default()
    }
}

fn customers() -> Vec<CustomerRecord> {
    enrich_customers(vec![
        customer(Some(22.0), Some(date(2023, 1, 7)), "Lagos", "Nigeria"),
        customer(Some(45.0), Some(date(2023, 4, 3)), "Lagos", "Nigeria"),
        customer(Some(67.0), Some(date(2022, 11, 15)), "Nairobi", "Kenya"),
        customer(None, None, "Accra", "Ghana"),
    ])
}

fn labels(tallies: &[Tally]) -> Vec<(&str, usize)> {
    tallies
        .iter()
        .map(|tally| (tally.label.as_str(), tally.count))
        .collect()
}

#[test]
fn customer_series_match_records() {
    let insights = build_customer_insights(&customers(), date(2023, 4, 13));

    assert_eq!(insights.total, 4);
    assert_eq!(insights.youth_count, 1);
    assert_eq!(insights.youth[0].age, Some(22.0));
    assert_eq!(
        labels(&insights.yearly_signups),
        vec![("2022", 1), ("2023", 2)]
    );
    assert_eq!(
        labels(&insights.city_counts),
        vec![("Lagos", 2), ("Accra", 1), ("Nairobi", 1)]
    );
    assert_eq!(
        labels(&insights.country_counts),
        vec![("Nigeria", 2), ("Ghana", 1), ("Kenya", 1)]
    );
    assert_eq!(
        labels(&insights.quarterly_signups),
        vec![("2022Q4", 1), ("2023Q1", 1), ("2023Q2", 1)]
    );
}

#[test]
fn age_group_shares_sum_to_total() {
    let insights = build_customer_insights(&customers(), date(2023, 4, 13));
    let groups: Vec<(&str, usize)> = insights
        .age_groups
        .iter()
        .map(|share| (share.label.as_str(), share.count))
        .collect();
    assert_eq!(
        groups,
        vec![("Youth", 1), ("Adult", 1), ("Senior", 1), ("Unknown", 1)]
    );
    let percent: f64 = insights.age_groups.iter().map(|share| share.percent).sum();
    assert!((percent - 100.0).abs() < 1e-9);
    assert!((insights.age_groups[0].percent - 25.0).abs() < 1e-9);
}

#[test]
fn monthly_signups_cover_every_month() {
    let insights = build_customer_insights(&customers(), date(2023, 4, 13));
    assert_eq!(insights.monthly_signups.len(), 12);
    assert_eq!(insights.monthly_signups[0], Tally::new("January", 1));
    assert_eq!(insights.monthly_signups[1], Tally::new("February", 0));
    assert_eq!(insights.monthly_signups[3], Tally::new("April", 1));
    assert_eq!(insights.monthly_signups[10], Tally::new("November", 1));
    assert_eq!(insights.monthly_signups[11], Tally::new("December", 0));
}

#[test]
fn mean_age_skips_cities_without_ages() {
    let insights = build_customer_insights(&customers(), date(2023, 4, 13));
    let cities: Vec<(&str, f64)> = insights
        .mean_age_by_city
        .iter()
        .map(|row| (row.city.as_str(), row.mean_age))
        .collect();
    assert_eq!(cities, vec![("Lagos", 33.5), ("Nairobi", 67.0)]);
}

#[test]
fn growth_tenure_and_weekends() {
    let insights = build_customer_insights(&customers(), date(2023, 4, 13));

    let growth: Vec<(NaiveDate, usize)> = insights
        .cumulative_growth
        .iter()
        .map(|point| (point.date, point.total))
        .collect();
    assert_eq!(
        growth,
        vec![
            (date(2022, 11, 15), 1),
            (date(2023, 1, 7), 2),
            (date(2023, 4, 3), 3),
        ]
    );

    let tenure = insights.tenure.expect("dated customers have tenure");
    assert_eq!(tenure.min_days, 10);
    assert_eq!(tenure.max_days, 149);
    assert!((tenure.mean_days - 85.0).abs() < 1e-9);

    assert_eq!(insights.week_split.weekend, 1);
    assert_eq!(insights.week_split.weekday, 2);
}

#[test]
fn empty_customer_registry_has_empty_series() {
    let insights = build_customer_insights(&[], date(2023, 4, 13));
    assert_eq!(insights.total, 0);
    assert!(insights.age_groups.is_empty());
    assert!(insights.tenure.is_none());
    assert_eq!(insights.monthly_signups.len(), 12);
}

fn patient(id: &str, age: u32, bmi: Option<f64>, score: f64, bp: &str) -> PatientRecord {
    PatientRecord {
        patient_id: id.to_string(),
        age: Some(age),
        bmi,
        disease_score: Some(score),
        blood_pressure: Some(bp.to_string()),
        sex: Some("F".to_string()),
        ..PatientRecord::default()
    }
}

fn patients() -> Vec<PatientRecord> {
    let records = vec![
        patient("P1", 30, Some(32.0), 85.0, "120mmHg"),
        patient("P2", 40, Some(34.0), 90.0, "130"),
        patient("P3", 50, Some(27.0), 70.0, "missing"),
        patient("P4", 60, Some(22.0), 10.0, "110/70"),
        patient("P5", 70, None, 50.0, ""),
    ];
    let (records, _) = sanitize_patients(records);
    let (records, _) = classify_patients(records, MissingValuePolicy::Unknown).unwrap();
    records
}

#[test]
fn risk_counts_include_unknown_only_when_present() {
    let insights = build_health_insights(&patients(), 4, 3);
    assert_eq!(
        labels(&insights.risk_counts),
        vec![("Low", 1), ("Medium", 1), ("High", 2), ("Unknown", 1)]
    );

    let assessed: Vec<PatientRecord> = patients()
        .into_iter()
        .filter(|record| record.risk_level.is_some())
        .collect();
    let insights = build_health_insights(&assessed, 4, 3);
    assert_eq!(insights.risk_counts.len(), 3);
}

#[test]
fn bmi_summary_per_risk_level() {
    let insights = build_health_insights(&patients(), 4, 3);
    let levels: Vec<RiskLevel> = insights
        .bmi_by_risk
        .iter()
        .map(|row| row.risk_level)
        .collect();
    assert_eq!(levels, RiskLevel::ALL.to_vec());

    let high = insights.bmi_by_risk[2].summary.expect("high risk has BMI");
    assert_eq!(high.min, 32.0);
    assert_eq!(high.median, 33.0);
    assert_eq!(high.max, 34.0);
    assert_eq!(high.count, 2);
}

#[test]
fn age_histogram_and_preview() {
    let insights = build_health_insights(&patients(), 4, 3);
    assert_eq!(insights.age_histogram.len(), 4);
    assert_eq!(insights.age_histogram[0].lower, 30.0);
    assert_eq!(insights.age_histogram[3].upper, 70.0);
    let counted: usize = insights.age_histogram.iter().map(|bin| bin.count).sum();
    assert_eq!(counted, 5);

    assert_eq!(insights.preview.len(), 3);
    assert_eq!(insights.preview[0].blood_pressure.as_deref(), Some("120mmHg"));
    assert_eq!(insights.preview[0].blood_pressure_clean, Some(120.0));
    assert_eq!(insights.preview[2].blood_pressure_clean, None);
}
