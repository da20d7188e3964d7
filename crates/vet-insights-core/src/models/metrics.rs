//! Derived metrics produced by the analytics engine.
//!
//! These are recomputed on every request and never persisted.

use serde::{Deserialize, Serialize};

/// Milk-productivity estimate for a dairy animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductivityMetric {
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    /// Healthy yield in litres/day
    pub baseline_productivity: f64,
    /// Estimated yield in litres/day after illness
    pub current_productivity: f64,
    /// Share of baseline lost, 0-80
    pub loss_percentage: f64,
    /// Estimated monetary loss
    pub estimated_loss: f64,
    /// Estimated days of illness inside the timeframe
    pub illness_days: u32,
}

/// Rabies vaccination currency for a companion animal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VaccinationStatus {
    #[serde(rename = "up-to-date")]
    UpToDate,
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "none")]
    NotVaccinated,
}

impl VaccinationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaccinationStatus::UpToDate => "up-to-date",
            VaccinationStatus::Overdue => "overdue",
            VaccinationStatus::NotVaccinated => "none",
        }
    }
}

/// Direction of an animal's recent health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Improving,
    Stable,
    Declining,
}

impl HealthTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTrend::Improving => "improving",
            HealthTrend::Stable => "stable",
            HealthTrend::Declining => "declining",
        }
    }
}

/// Wellbeing score for a companion animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelfareScore {
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    /// Score clamped to 0-100
    pub score: u8,
    pub vaccination_status: VaccinationStatus,
    pub health_trend: HealthTrend,
    /// Whole days since the latest dated visit
    pub days_since_last_visit: Option<i64>,
}

/// Antimicrobial-resistance risk band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Antimicrobial-resistance risk for one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmrRisk {
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub risk_level: RiskLevel,
    /// Visits with an antibiotic in treatment or medications
    pub antibiotic_treatments: u32,
    /// Antibiotic visits with another antibiotic visit within 30 days
    pub repeated_treatments: u32,
    /// Human-readable contributing conditions
    pub risk_factors: Vec<String>,
}

/// Upcoming or past-due vaccination booster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationReminder {
    pub animal_id: String,
    pub animal_name: String,
    pub vaccine_name: String,
    pub next_due_date: String,
    /// Negative when the booster is already past due
    pub days_until_due: i64,
    pub overdue: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&VaccinationStatus::UpToDate).unwrap(),
            "\"up-to-date\""
        );
        assert_eq!(
            serde_json::to_string(&VaccinationStatus::NotVaccinated).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&HealthTrend::Declining).unwrap(),
            "\"declining\""
        );
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"critical\"");
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for status in [
            VaccinationStatus::UpToDate,
            VaccinationStatus::Overdue,
            VaccinationStatus::NotVaccinated,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.as_str());
        }
    }
}
