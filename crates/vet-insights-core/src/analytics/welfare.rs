//! Wellbeing scores for companion animals.
//!
//! Every dog and cat starts at 100 and loses points for stale visits and
//! missing rabies cover, then gains or loses on its recent health trend.
//! The result is clamped to `0..=100`.

use chrono::{DateTime, Utc};

use super::group_by_animal;
use super::keywords::{contains_any, contains_keyword, ILLNESS_KEYWORDS, RABIES_KEYWORD, RECOVERY_KEYWORDS};
use crate::models::{Animal, HealthTrend, Vaccination, VaccinationStatus, VisitRecord, WelfareScore};

const BASE_SCORE: i32 = 100;
const NO_VISIT_PENALTY: i32 = 30;
const VISIT_OVER_YEAR_PENALTY: i32 = 25;
const VISIT_OVER_HALF_YEAR_PENALTY: i32 = 15;
const NO_RABIES_PENALTY: i32 = 30;
const RABIES_OVERDUE_PENALTY: i32 = 20;
const IMPROVING_BONUS: i32 = 5;
const DECLINING_PENALTY: i32 = 15;

/// Floor with every penalty applied at once. Stays non-negative, so only the
/// upper clamp ever binds.
pub const MIN_WELFARE_SCORE: i32 =
    BASE_SCORE - NO_VISIT_PENALTY - NO_RABIES_PENALTY - DECLINING_PENALTY;
const _: () = assert!(MIN_WELFARE_SCORE >= 0);

/// Rabies cover lapses after this many whole days.
pub const RABIES_VALIDITY_DAYS: i64 = 365;

/// A visit with its parsed date.
type DatedVisit<'a> = (DateTime<Utc>, &'a VisitRecord);

/// Scores dogs and cats.
#[derive(Debug, Clone, Default)]
pub struct WelfareScorer;

impl WelfareScorer {
    pub fn new() -> Self {
        Self
    }

    /// One score per dog/cat in `animals`.
    pub fn compute(
        &self,
        animals: &[Animal],
        visits: &[VisitRecord],
        vaccinations: &[Vaccination],
        now: DateTime<Utc>,
    ) -> Vec<WelfareScore> {
        let visits_by_animal = group_by_animal(visits, |v| v.animal_id.as_str());
        let vaccs_by_animal = group_by_animal(vaccinations, |v| v.animal_id.as_str());

        animals
            .iter()
            .filter(|animal| animal.species_kind().is_companion())
            .map(|animal| {
                let visits = visits_by_animal
                    .get(animal.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let vaccinations = vaccs_by_animal
                    .get(animal.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                score_animal(animal, visits, vaccinations, now)
            })
            .collect()
    }
}

fn score_animal(
    animal: &Animal,
    visits: &[&VisitRecord],
    vaccinations: &[&Vaccination],
    now: DateTime<Utc>,
) -> WelfareScore {
    let mut score = BASE_SCORE;

    // Undated visits cannot take part in recency or trend
    let mut timeline: Vec<DatedVisit<'_>> = visits
        .iter()
        .filter_map(|v| v.visited_at().map(|date| (date, *v)))
        .collect();
    timeline.sort_by(|a, b| b.0.cmp(&a.0));

    let days_since_last_visit = timeline.first().map(|(date, _)| (now - *date).num_days());
    score -= match days_since_last_visit {
        None => NO_VISIT_PENALTY,
        Some(days) if days > 365 => VISIT_OVER_YEAR_PENALTY,
        Some(days) if days > 180 => VISIT_OVER_HALF_YEAR_PENALTY,
        Some(_) => 0,
    };

    let vaccination_status = rabies_status(vaccinations, now);
    score -= match vaccination_status {
        VaccinationStatus::NotVaccinated => NO_RABIES_PENALTY,
        VaccinationStatus::Overdue => RABIES_OVERDUE_PENALTY,
        VaccinationStatus::UpToDate => 0,
    };

    let health_trend = health_trend(&timeline);
    score += match health_trend {
        HealthTrend::Improving => IMPROVING_BONUS,
        HealthTrend::Declining => -DECLINING_PENALTY,
        HealthTrend::Stable => 0,
    };

    WelfareScore {
        animal_id: animal.id.clone(),
        animal_name: animal.name.clone(),
        species: animal.species_kind().to_string(),
        score: score.clamp(0, 100) as u8,
        vaccination_status,
        health_trend,
        days_since_last_visit,
    }
}

/// Rabies cover judged from the most recent rabies vaccination.
///
/// Vaccine names match case-insensitively. A rabies record whose date
/// cannot be parsed counts as given but not current.
pub fn rabies_status(vaccinations: &[&Vaccination], now: DateTime<Utc>) -> VaccinationStatus {
    let mut rabies = vaccinations
        .iter()
        .filter(|v| contains_keyword(&v.vaccine_name, RABIES_KEYWORD))
        .peekable();

    if rabies.peek().is_none() {
        return VaccinationStatus::NotVaccinated;
    }

    match rabies.filter_map(|v| v.given_at()).max() {
        Some(given) if (now - given).num_days() <= RABIES_VALIDITY_DAYS => {
            VaccinationStatus::UpToDate
        }
        _ => VaccinationStatus::Overdue,
    }
}

/// Trend from visits sorted newest first.
fn health_trend(timeline: &[DatedVisit<'_>]) -> HealthTrend {
    let recent: Vec<&str> = timeline
        .iter()
        .take(3)
        .map(|(_, visit)| visit.diagnosis.as_str())
        .collect();

    if recent.len() >= 2
        && contains_any(recent[0], &RECOVERY_KEYWORDS)
        && contains_any(recent[1], &ILLNESS_KEYWORDS)
    {
        HealthTrend::Improving
    } else if recent.len() == 3 && recent.iter().all(|d| contains_any(d, &ILLNESS_KEYWORDS)) {
        HealthTrend::Declining
    } else {
        HealthTrend::Stable
    }
}
