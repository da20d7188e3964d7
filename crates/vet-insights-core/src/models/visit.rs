//! Medical visit models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::parse_timestamp;

/// A single medical visit for an animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitRecord {
    /// Unique visit ID
    pub id: String,
    /// Animal ID this visit belongs to
    pub animal_id: String,
    /// Visit timestamp (RFC 3339, SQLite datetime or bare date)
    pub visit_date: String,
    /// Free-text diagnosis
    pub diagnosis: String,
    /// Free-text treatment given
    pub treatment: String,
    /// Medications prescribed
    pub medications: Option<String>,
    /// Attending veterinarian
    pub veterinarian: Option<String>,
    /// Additional notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl VisitRecord {
    /// Create a new visit with required fields.
    pub fn new(animal_id: String, visit_date: String, diagnosis: String, treatment: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            animal_id,
            visit_date,
            diagnosis,
            treatment,
            medications: None,
            veterinarian: None,
            notes: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Set prescribed medications.
    pub fn with_medications(mut self, medications: impl Into<String>) -> Self {
        self.medications = Some(medications.into());
        self
    }

    /// Parsed visit date, `None` when malformed.
    pub fn visited_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.visit_date)
    }
}
