//! Insight series for the customer and health registries.
//!
//! Every series is plain serializable data; rendering is left to the caller.

pub mod customers;
pub mod health;
pub mod stats;

pub use customers::{
    CityAge, CustomerInsights, GrowthPoint, TenureSummary, WeekSplit, build_customer_insights,
};
pub use health::{CleaningPreview, HealthInsights, RiskBmi, build_health_insights};
pub use stats::{
    FiveNumberSummary, HistogramBin, Share, Tally, five_number_summary, histogram, mean,
    quantile_sorted,
};
