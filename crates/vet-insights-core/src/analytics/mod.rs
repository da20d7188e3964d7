//! Derived health and compliance analytics.
//!
//! Pipeline: RecordSource → Snapshot → calculators → derived metrics
//!
//! The calculators are pure functions of one snapshot and an evaluation
//! instant. They hold no state between calls and never fail: empty input
//! gives empty output and unparseable text is a non-match.

mod amr;
mod keywords;
mod productivity;
mod schedule;
mod service;
mod summary;
mod welfare;

pub use amr::*;
pub use keywords::*;
pub use productivity::*;
pub use schedule::*;
pub use service::*;
pub use summary::*;
pub use welfare::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use crate::models::{Animal, Vaccination, VisitRecord};

/// Read-only access to stored records.
pub trait RecordSource {
    fn list_animals(&self) -> DbResult<Vec<Animal>>;
    fn list_visits(&self, animal_id: Option<&str>) -> DbResult<Vec<VisitRecord>>;
    fn list_vaccinations(&self, animal_id: Option<&str>) -> DbResult<Vec<Vaccination>>;
}

impl RecordSource for Database {
    fn list_animals(&self) -> DbResult<Vec<Animal>> {
        Database::list_animals(self)
    }

    fn list_visits(&self, animal_id: Option<&str>) -> DbResult<Vec<VisitRecord>> {
        Database::list_visits(self, animal_id)
    }

    fn list_vaccinations(&self, animal_id: Option<&str>) -> DbResult<Vec<Vaccination>> {
        Database::list_vaccinations(self, animal_id)
    }
}

/// A consistent copy of every input record, taken once per computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub animals: Vec<Animal>,
    pub visits: Vec<VisitRecord>,
    pub vaccinations: Vec<Vaccination>,
}

impl Snapshot {
    pub fn new(animals: Vec<Animal>, visits: Vec<VisitRecord>, vaccinations: Vec<Vaccination>) -> Self {
        Self {
            animals,
            visits,
            vaccinations,
        }
    }

    /// Copy all records out of a source.
    pub fn capture<S: RecordSource + ?Sized>(source: &S) -> DbResult<Self> {
        let snapshot = Self {
            animals: source.list_animals()?,
            visits: source.list_visits(None)?,
            vaccinations: source.list_vaccinations(None)?,
        };
        tracing::debug!(
            animals = snapshot.animals.len(),
            visits = snapshot.visits.len(),
            vaccinations = snapshot.vaccinations.len(),
            "captured record snapshot"
        );
        Ok(snapshot)
    }
}

impl RecordSource for Snapshot {
    fn list_animals(&self) -> DbResult<Vec<Animal>> {
        Ok(self.animals.clone())
    }

    fn list_visits(&self, animal_id: Option<&str>) -> DbResult<Vec<VisitRecord>> {
        Ok(self
            .visits
            .iter()
            .filter(|v| animal_id.map_or(true, |id| v.animal_id == id))
            .cloned()
            .collect())
    }

    fn list_vaccinations(&self, animal_id: Option<&str>) -> DbResult<Vec<Vaccination>> {
        Ok(self
            .vaccinations
            .iter()
            .filter(|v| animal_id.map_or(true, |id| v.animal_id == id))
            .cloned()
            .collect())
    }
}

/// Index records by owning animal, keeping input order within each group.
pub(crate) fn group_by_animal<'a, T, F>(items: &'a [T], animal_id: F) -> HashMap<&'a str, Vec<&'a T>>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut groups: HashMap<&'a str, Vec<&'a T>> = HashMap::new();
    for item in items {
        groups.entry(animal_id(item)).or_default().push(item);
    }
    groups
}
