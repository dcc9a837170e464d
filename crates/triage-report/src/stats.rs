//! Descriptive statistics used by the insight series.

use serde::Serialize;

/// A labelled count, e.g. sign-ups per city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub label: String,
    pub count: usize,
}

impl Tally {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A labelled count with its percentage share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Minimum, quartiles and maximum of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

/// One histogram bin covering `[lower, upper)`; the last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Quantile of sorted data by linear interpolation between closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Summarises a sample; NaN values are ignored.
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(FiveNumberSummary {
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
        count: sorted.len(),
    })
}

/// Arithmetic mean, `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Equal-width histogram spanning the sample range.
///
/// A sample with a single distinct value is centred in a unit-wide range.
/// An empty sample has no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(mut low) = finite.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let mut high = finite.iter().copied().fold(low, f64::max);
    if high == low {
        low -= 0.5;
        high += 0.5;
    }
    let width = (high - low) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in finite {
        let slot = (((value - low) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            lower: low + width * idx as f64,
            upper: if idx + 1 == bins {
                high
            } else {
                low + width * (idx + 1) as f64
            },
            count,
        })
        .collect()
}

/// Sorts tallies by descending count, then label.
pub fn sort_by_count_desc(tallies: &mut [Tally]) {
    tallies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn five_number_summary_of_odd_sample() {
        let summary = five_number_summary(&[35.0, 31.0, 33.0, 40.0, 32.0]).unwrap();
        assert_eq!(summary.min, 31.0);
        assert_eq!(summary.q1, 32.0);
        assert_eq!(summary.median, 33.0);
        assert_eq!(summary.q3, 35.0);
        assert_eq!(summary.max, 40.0);
        assert_eq!(summary.count, 5);
        assert!(five_number_summary(&[]).is_none());
    }

    #[test]
    fn histogram_covers_range_with_closed_last_bin() {
        let bins = histogram(&[0.0, 5.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[0].upper, 5.0);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].upper, 10.0);
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn histogram_of_constant_sample() {
        let bins = histogram(&[40.0, 40.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lower, 39.5);
        assert_eq!(bins[3].upper, 40.5);
        assert_eq!(bins.iter().map(|bin| bin.count).sum::<usize>(), 2);
        assert!(histogram(&[], 15).is_empty());
    }

    #[test]
    fn tallies_sort_by_count_then_label() {
        let mut tallies = vec![
            Tally::new("Soweto", 2),
            Tally::new("Durban", 3),
            Tally::new("Cape Town", 2),
        ];
        sort_by_count_desc(&mut tallies);
        let labels: Vec<&str> = tallies.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Durban", "Cape Town", "Soweto"]);
    }
}
