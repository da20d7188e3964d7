//! Vaccination booster reminders.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{Animal, Vaccination, VaccinationReminder};

/// Boosters due on or before `now + within_days`, past-due ones included.
///
/// Only the latest record per animal and vaccine (by date given) is
/// considered, so a booster that has already been given does not keep
/// reporting the previous due date. Records without a parseable due date
/// or without a known animal are skipped. Sorted by due date, soonest first.
pub fn upcoming_vaccinations(
    animals: &[Animal],
    vaccinations: &[Vaccination],
    now: DateTime<Utc>,
    within_days: u32,
) -> Vec<VaccinationReminder> {
    let horizon = now
        .checked_add_signed(Duration::days(i64::from(within_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let names: HashMap<&str, &str> = animals
        .iter()
        .map(|a| (a.id.as_str(), a.name.as_str()))
        .collect();

    let mut latest: HashMap<(&str, String), &Vaccination> = HashMap::new();
    for vacc in vaccinations {
        let key = (vacc.animal_id.as_str(), vacc.vaccine_name.trim().to_lowercase());
        let newer = latest
            .get(&key)
            .map_or(true, |existing| vacc.given_at() > existing.given_at());
        if newer {
            latest.insert(key, vacc);
        }
    }

    let mut reminders: Vec<(DateTime<Utc>, VaccinationReminder)> = latest
        .into_values()
        .filter_map(|vacc| {
            let animal_name = names.get(vacc.animal_id.as_str())?;
            let due = vacc.due_at()?;
            if due > horizon {
                return None;
            }
            Some((
                due,
                VaccinationReminder {
                    animal_id: vacc.animal_id.clone(),
                    animal_name: animal_name.to_string(),
                    vaccine_name: vacc.vaccine_name.clone(),
                    next_due_date: vacc.next_due_date.clone().unwrap_or_default(),
                    days_until_due: (due - now).num_days(),
                    overdue: due < now,
                },
            ))
        })
        .collect();

    reminders.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.animal_name.cmp(&b.1.animal_name))
            .then_with(|| a.1.vaccine_name.cmp(&b.1.vaccine_name))
    });
    reminders.into_iter().map(|(_, reminder)| reminder).collect()
}
