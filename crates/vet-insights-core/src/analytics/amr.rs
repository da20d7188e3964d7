//! Antimicrobial-resistance risk classification.

use chrono::{DateTime, Utc};

use super::group_by_animal;
use super::keywords::{contains_keyword, is_antibiotic_treatment, MASTITIS_KEYWORD};
use crate::models::{AmrRisk, Animal, RiskLevel, VisitRecord};

/// Two antibiotic courses this close together count as repeated.
pub const REPEAT_WINDOW_DAYS: i64 = 30;

pub const FACTOR_FREQUENT_USE: &str = "Frequent antibiotic use";
pub const FACTOR_REPEATED: &str = "Repeated treatments";
pub const FACTOR_MASTITIS: &str = "Chronic mastitis history";

/// Classifies every animal by antibiotic exposure.
#[derive(Debug, Clone, Default)]
pub struct AmrRiskClassifier;

impl AmrRiskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// One risk record per animal, any species.
    pub fn compute(&self, animals: &[Animal], visits: &[VisitRecord]) -> Vec<AmrRisk> {
        let by_animal = group_by_animal(visits, |v| v.animal_id.as_str());

        animals
            .iter()
            .map(|animal| {
                let visits = by_animal
                    .get(animal.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                classify(animal, visits)
            })
            .collect()
    }
}

fn classify(animal: &Animal, visits: &[&VisitRecord]) -> AmrRisk {
    let antibiotic_dates: Vec<Option<DateTime<Utc>>> = visits
        .iter()
        .filter(|v| is_antibiotic_treatment(v))
        .map(|v| v.visited_at())
        .collect();

    let antibiotic_treatments = antibiotic_dates.len() as u32;
    let repeated_treatments = count_repeated(&antibiotic_dates);

    let species = animal.species_kind();
    let mut risk_factors = Vec::new();
    if antibiotic_treatments >= 5 {
        risk_factors.push(FACTOR_FREQUENT_USE.to_string());
    }
    if repeated_treatments >= 2 {
        risk_factors.push(FACTOR_REPEATED.to_string());
    }
    if species.is_dairy() && visits.iter().any(|v| contains_keyword(&v.diagnosis, MASTITIS_KEYWORD)) {
        risk_factors.push(FACTOR_MASTITIS.to_string());
    }

    AmrRisk {
        animal_id: animal.id.clone(),
        animal_name: animal.name.clone(),
        species: species.to_string(),
        risk_level: risk_level(antibiotic_treatments, repeated_treatments),
        antibiotic_treatments,
        repeated_treatments,
        risk_factors,
    }
}

/// Count antibiotic visits that have another antibiotic visit within
/// [`REPEAT_WINDOW_DAYS`] on either side.
///
/// Each qualifying visit counts once, so a close pair contributes two.
/// Undated visits never qualify and never make another visit qualify.
pub fn count_repeated(dates: &[Option<DateTime<Utc>>]) -> u32 {
    let window_secs = REPEAT_WINDOW_DAYS * 86_400;
    let mut repeated = 0;

    for (i, date) in dates.iter().enumerate() {
        let Some(date) = date else { continue };
        let has_neighbour = dates.iter().enumerate().any(|(j, other)| {
            j != i && other.is_some_and(|other| (*date - other).num_seconds().abs() <= window_secs)
        });
        if has_neighbour {
            repeated += 1;
        }
    }

    repeated
}

/// Risk band; the first matching rule wins.
pub fn risk_level(antibiotic_treatments: u32, repeated_treatments: u32) -> RiskLevel {
    if antibiotic_treatments >= 8 || repeated_treatments >= 3 {
        RiskLevel::Critical
    } else if antibiotic_treatments >= 5 || repeated_treatments >= 2 {
        RiskLevel::High
    } else if antibiotic_treatments >= 3 || repeated_treatments >= 1 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
