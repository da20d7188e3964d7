//! Dashboard roll-up of the derived metrics.

use serde::{Deserialize, Serialize};

use crate::models::{AmrRisk, Animal, ProductivityMetric, RiskLevel, VaccinationReminder, WelfareScore};

/// Animal counts per AMR risk level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelCounts {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl RiskLevelCounts {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// Headline numbers for the practice dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_animals: u32,
    pub dairy_animals: u32,
    pub companion_animals: u32,
    pub total_illness_days: u32,
    pub total_estimated_loss: f64,
    /// `None` when there are no companion animals
    pub average_welfare_score: Option<f64>,
    pub overdue_vaccinations: u32,
    pub risk_counts: RiskLevelCounts,
}

impl DashboardSummary {
    pub fn from_metrics(
        animals: &[Animal],
        productivity: &[ProductivityMetric],
        welfare: &[WelfareScore],
        amr: &[AmrRisk],
        reminders: &[VaccinationReminder],
    ) -> Self {
        let mut risk_counts = RiskLevelCounts::default();
        for risk in amr {
            risk_counts.record(risk.risk_level);
        }

        let average_welfare_score = if welfare.is_empty() {
            None
        } else {
            let total: u32 = welfare.iter().map(|w| u32::from(w.score)).sum();
            Some(f64::from(total) / welfare.len() as f64)
        };

        Self {
            total_animals: animals.len() as u32,
            dairy_animals: animals.iter().filter(|a| a.species_kind().is_dairy()).count() as u32,
            companion_animals: animals
                .iter()
                .filter(|a| a.species_kind().is_companion())
                .count() as u32,
            total_illness_days: productivity.iter().map(|p| p.illness_days).sum(),
            total_estimated_loss: productivity.iter().map(|p| p.estimated_loss).sum(),
            average_welfare_score,
            overdue_vaccinations: reminders.iter().filter(|r| r.overdue).count() as u32,
            risk_counts,
        }
    }
}
