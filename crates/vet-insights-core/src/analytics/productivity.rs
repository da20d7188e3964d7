//! Milk-productivity loss estimation for dairy livestock.

use chrono::{DateTime, Duration, Utc};

use super::keywords::illness_duration_days;
use super::group_by_animal;
use crate::config::AnalyticsConfig;
use crate::models::{Animal, ProductivityMetric, Species, VisitRecord};

/// Share of baseline yield lost per estimated illness day.
pub const LOSS_PER_ILLNESS_DAY: f64 = 0.30;

/// Upper bound on the share of baseline yield lost.
pub const MAX_LOSS_FRACTION: f64 = 0.80;

/// Estimates yield loss and its cost for cows and buffaloes.
#[derive(Debug, Clone)]
pub struct ProductivityCalculator {
    milk_price_per_liter: f64,
    cow_baseline_liters: f64,
    buffalo_baseline_liters: f64,
}

impl Default for ProductivityCalculator {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}

impl ProductivityCalculator {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            milk_price_per_liter: config.milk_price_per_liter,
            cow_baseline_liters: config.cow_baseline_liters,
            buffalo_baseline_liters: config.buffalo_baseline_liters,
        }
    }

    /// Healthy yield in litres/day. Only cows differ from the buffalo figure.
    pub fn baseline_for(&self, species: &Species) -> f64 {
        match species {
            Species::Cow => self.cow_baseline_liters,
            _ => self.buffalo_baseline_liters,
        }
    }

    /// One metric per cow/buffalo, from visits in the trailing
    /// `timeframe_days` ending at `now`.
    ///
    /// Dairy animals without windowed visits are still reported, with zero
    /// loss. Visits with malformed dates never fall inside the window.
    pub fn compute(
        &self,
        animals: &[Animal],
        visits: &[VisitRecord],
        timeframe_days: u32,
        now: DateTime<Utc>,
    ) -> Vec<ProductivityMetric> {
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(timeframe_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let by_animal = group_by_animal(visits, |v| v.animal_id.as_str());

        animals
            .iter()
            .filter(|animal| animal.species_kind().is_dairy())
            .map(|animal| {
                let illness_days = by_animal
                    .get(animal.id.as_str())
                    .map(|visits| {
                        visits
                            .iter()
                            .filter(|v| v.visited_at().is_some_and(|date| date >= cutoff))
                            .map(|v| illness_duration_days(&v.diagnosis))
                            .sum::<u32>()
                    })
                    .unwrap_or(0);
                self.metric_for(animal, illness_days)
            })
            .collect()
    }

    fn metric_for(&self, animal: &Animal, illness_days: u32) -> ProductivityMetric {
        let species = animal.species_kind();
        let baseline = self.baseline_for(&species);
        let days = f64::from(illness_days);

        let loss_fraction = (days * LOSS_PER_ILLNESS_DAY).min(MAX_LOSS_FRACTION);
        let current = baseline * (1.0 - loss_fraction);
        let deficit = baseline - current;
        let loss_percentage = (deficit / baseline * 100.0).clamp(0.0, MAX_LOSS_FRACTION * 100.0);
        // The daily deficit is charged once per illness day even though the
        // days already shaped the deficit through the loss fraction.
        let estimated_loss = deficit * self.milk_price_per_liter * days;

        ProductivityMetric {
            animal_id: animal.id.clone(),
            animal_name: animal.name.clone(),
            species: species.to_string(),
            baseline_productivity: baseline,
            current_productivity: current,
            loss_percentage,
            estimated_loss,
            illness_days,
        }
    }
}
