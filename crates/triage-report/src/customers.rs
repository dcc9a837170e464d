//! Customer registry insight series.

use std::collections::BTreeMap;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use triage_model::{AgeGroup, CustomerRecord};

use crate::stats::{Share, Tally, mean, sort_by_count_desc};

/// Average age of the customers in one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityAge {
    pub city: String,
    pub mean_age: f64,
    pub customers: usize,
}

/// Running sign-up total at the end of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub total: usize,
}

/// Days between sign-up and the as-of date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureSummary {
    pub as_of: NaiveDate,
    pub min_days: i64,
    pub mean_days: f64,
    pub max_days: i64,
}

/// Sign-ups split by day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WeekSplit {
    pub weekday: usize,
    pub weekend: usize,
}

/// Every series the customer dashboard charted.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerInsights {
    pub total: usize,
    #[serde(skip)]
    pub youth: Vec<CustomerRecord>,
    pub youth_count: usize,
    /// Ascending by year.
    pub yearly_signups: Vec<Tally>,
    /// In `Youth, Adult, Senior, Unknown` order, empty groups omitted.
    pub age_groups: Vec<Share>,
    /// Descending by count.
    pub city_counts: Vec<Tally>,
    /// All twelve months in calendar order.
    pub monthly_signups: Vec<Tally>,
    /// Ascending by mean age.
    pub mean_age_by_city: Vec<CityAge>,
    pub cumulative_growth: Vec<GrowthPoint>,
    pub tenure: Option<TenureSummary>,
    pub week_split: WeekSplit,
    /// Ascending by quarter.
    pub quarterly_signups: Vec<Tally>,
    /// Descending by count.
    pub country_counts: Vec<Tally>,
}

/// Computes the customer series from enriched records.
pub fn build_customer_insights(records: &[CustomerRecord], as_of: NaiveDate) -> CustomerInsights {
    let youth: Vec<CustomerRecord> = records
        .iter()
        .filter(|record| record.age_group == AgeGroup::Youth)
        .cloned()
        .collect();

    let insights = CustomerInsights {
        total: records.len(),
        youth_count: youth.len(),
        youth,
        yearly_signups: yearly_signups(records),
        age_groups: age_group_shares(records),
        city_counts: counts_desc(records.iter().map(|record| record.city.as_deref())),
        monthly_signups: monthly_signups(records),
        mean_age_by_city: mean_age_by_city(records),
        cumulative_growth: cumulative_growth(records),
        tenure: tenure(records, as_of),
        week_split: week_split(records),
        quarterly_signups: quarterly_signups(records),
        country_counts: counts_desc(records.iter().map(|record| record.country.as_deref())),
    };
    debug!(
        total = insights.total,
        youth = insights.youth_count,
        cities = insights.city_counts.len(),
        countries = insights.country_counts.len(),
        "customer insights computed"
    );
    insights
}

fn yearly_signups(records: &[CustomerRecord]) -> Vec<Tally> {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.iter().filter_map(|record| record.year_joined) {
        *years.entry(year).or_default() += 1;
    }
    years
        .into_iter()
        .map(|(year, count)| Tally::new(year.to_string(), count))
        .collect()
}

fn age_group_shares(records: &[CustomerRecord]) -> Vec<Share> {
    let total = records.len();
    AgeGroup::ALL
        .iter()
        .filter_map(|group| {
            let count = records
                .iter()
                .filter(|record| record.age_group == *group)
                .count();
            (count > 0).then(|| Share {
                label: group.as_str().to_string(),
                count,
                percent: count as f64 * 100.0 / total as f64,
            })
        })
        .collect()
}

fn counts_desc<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<Tally> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.flatten() {
        *counts.entry(value).or_default() += 1;
    }
    let mut tallies: Vec<Tally> = counts
        .into_iter()
        .map(|(label, count)| Tally::new(label, count))
        .collect();
    sort_by_count_desc(&mut tallies);
    tallies
}

fn monthly_signups(records: &[CustomerRecord]) -> Vec<Tally> {
    let mut counts = [0usize; 12];
    for month in records.iter().filter_map(|record| record.month_joined) {
        counts[month.number_from_month() as usize - 1] += 1;
    }
    let mut month = Month::January;
    let mut tallies = Vec::with_capacity(12);
    for count in counts {
        tallies.push(Tally::new(month.name(), count));
        month = month.succ();
    }
    tallies
}

fn mean_age_by_city(records: &[CustomerRecord]) -> Vec<CityAge> {
    let mut ages: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let (Some(city), Some(age)) = (record.city.as_deref(), record.age) {
            ages.entry(city).or_default().push(age);
        }
    }
    let mut rows: Vec<CityAge> = ages
        .into_iter()
        .filter_map(|(city, ages)| {
            mean(&ages).map(|mean_age| CityAge {
                city: city.to_string(),
                mean_age,
                customers: ages.len(),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.mean_age
            .total_cmp(&b.mean_age)
            .then_with(|| a.city.cmp(&b.city))
    });
    rows
}

fn cumulative_growth(records: &[CustomerRecord]) -> Vec<GrowthPoint> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in records.iter().filter_map(|record| record.subscription_date) {
        *per_day.entry(date).or_default() += 1;
    }
    let mut total = 0;
    per_day
        .into_iter()
        .map(|(date, count)| {
            total += count;
            GrowthPoint { date, total }
        })
        .collect()
}

fn tenure(records: &[CustomerRecord], as_of: NaiveDate) -> Option<TenureSummary> {
    let days: Vec<i64> = records
        .iter()
        .filter_map(|record| record.subscription_date)
        .map(|date| (as_of - date).num_days())
        .collect();
    let min_days = days.iter().copied().min()?;
    let max_days = days.iter().copied().max()?;
    let mean_days = days.iter().sum::<i64>() as f64 / days.len() as f64;
    Some(TenureSummary {
        as_of,
        min_days,
        mean_days,
        max_days,
    })
}

fn week_split(records: &[CustomerRecord]) -> WeekSplit {
    records
        .iter()
        .filter_map(|record| record.subscription_date)
        .fold(WeekSplit::default(), |mut split, date| {
            match date.weekday() {
                Weekday::Sat | Weekday::Sun => split.weekend += 1,
                _ => split.weekday += 1,
            }
            split
        })
}

fn quarterly_signups(records: &[CustomerRecord]) -> Vec<Tally> {
    let mut quarters: BTreeMap<&str, usize> = BTreeMap::new();
    for quarter in records
        .iter()
        .filter_map(|record| record.quarter_joined.as_deref())
    {
        *quarters.entry(quarter).or_default() += 1;
    }
    quarters
        .into_iter()
        .map(|(quarter, count)| Tally::new(quarter, count))
        .collect()
}
