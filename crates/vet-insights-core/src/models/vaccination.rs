//! Vaccination models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::parse_timestamp;

/// A vaccination administered to an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vaccination {
    /// Unique vaccination ID
    pub id: String,
    /// Animal ID
    pub animal_id: String,
    /// Vaccine name (e.g., "Rabies", "FMD", "HS")
    pub vaccine_name: String,
    /// Date the vaccine was administered
    pub date_given: String,
    /// Next booster due date
    pub next_due_date: Option<String>,
    /// Manufacturer batch/lot number
    pub batch_number: Option<String>,
    /// Who administered the dose
    pub administered_by: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl Vaccination {
    /// Create a new vaccination with required fields.
    pub fn new(animal_id: String, vaccine_name: String, date_given: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            animal_id,
            vaccine_name,
            date_given,
            next_due_date: None,
            batch_number: None,
            administered_by: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Set the next due date.
    pub fn with_next_due(mut self, next_due_date: impl Into<String>) -> Self {
        self.next_due_date = Some(next_due_date.into());
        self
    }

    /// Parsed administration date, `None` when malformed.
    pub fn given_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_given)
    }

    /// Parsed next due date, `None` when absent or malformed.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.next_due_date.as_deref().and_then(parse_timestamp)
    }
}
