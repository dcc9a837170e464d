//! Type-safe enumerations for derived registry fields.
//!
//! These enums replace the free-text labels written into the derived
//! columns (`risk_level`, `age_group`, `status`) so that every label is
//! checked at compile time and parsed back case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health risk label derived from BMI and disease score.
///
/// Ordered from least to most severe, so `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No combined BMI/disease-score indicators.
    Low,
    /// Overweight with an elevated disease score.
    Medium,
    /// Obese with a severe disease score.
    High,
}

impl RiskLevel {
    /// All labels in display order.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Label used when a record could not be assessed.
    pub const UNASSESSED_LABEL: &'static str = "Unknown";

    /// Returns the label as written in the `risk_level` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Renders an optional assessment, using `Unknown` for unassessed records.
    pub fn label(level: Option<RiskLevel>) -> &'static str {
        level.map_or(Self::UNASSESSED_LABEL, |level| level.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            _ => Err(format!("unknown risk level: {s}")),
        }
    }
}

/// Customer age bucket.
///
/// The buckets partition every possible age: `< 25` is Youth, `25..60` is
/// Adult, `>= 60` is Senior, and a missing age is Unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum AgeGroup {
    Youth,
    Adult,
    Senior,
    #[default]
    Unknown,
}

impl AgeGroup {
    /// All groups in display order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Youth,
        AgeGroup::Adult,
        AgeGroup::Senior,
        AgeGroup::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Youth => "Youth",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
            AgeGroup::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export-time triage status of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    /// Needs immediate clinical attention.
    Critical,
    Stable,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Critical => "Critical",
            PatientStatus::Stable => "Stable",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(PatientStatus::Critical),
            "STABLE" => Ok(PatientStatus::Stable),
            _ => Err(format!("unknown patient status: {s}")),
        }
    }
}

/// Stage of the health pipeline.
///
/// Transitions are one-way: `Uploaded -> Sanitized -> Classified -> Queryable`.
/// A new upload restarts at `Uploaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    Uploaded,
    Sanitized,
    Classified,
    Queryable,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Uploaded => "uploaded",
            PipelineStage::Sanitized => "sanitized",
            PipelineStage::Classified => "classified",
            PipelineStage::Queryable => "queryable",
        }
    }

    /// Returns the stage that follows this one, if any.
    pub fn next(&self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Uploaded => Some(PipelineStage::Sanitized),
            PipelineStage::Sanitized => Some(PipelineStage::Classified),
            PipelineStage::Classified => Some(PipelineStage::Queryable),
            PipelineStage::Queryable => None,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!("high".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert_eq!(" Medium ".parse::<RiskLevel>(), Ok(RiskLevel::Medium));
        assert!("Unknown".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn unassessed_risk_renders_unknown() {
        assert_eq!(RiskLevel::label(None), "Unknown");
        assert_eq!(RiskLevel::label(Some(RiskLevel::Low)), "Low");
    }

    #[test]
    fn stages_advance_in_order() {
        let mut stage = PipelineStage::Uploaded;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(stage, PipelineStage::Queryable);
    }
}
