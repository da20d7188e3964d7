//! Animal models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Species universe recognised by the analytics engine.
///
/// Stored species text is matched case-insensitively; anything outside the
/// known kinds is kept verbatim (lowercased) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Species {
    Cow,
    Buffalo,
    Goat,
    Dog,
    Cat,
    Other(String),
}

impl Species {
    /// Interpret free-text species.
    pub fn parse(value: &str) -> Self {
        let lower = value.trim().to_lowercase();
        match lower.as_str() {
            "cow" => Species::Cow,
            "buffalo" => Species::Buffalo,
            "goat" => Species::Goat,
            "dog" => Species::Dog,
            "cat" => Species::Cat,
            _ => Species::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Species::Cow => "cow",
            Species::Buffalo => "buffalo",
            Species::Goat => "goat",
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Other(name) => name,
        }
    }

    /// Dairy livestock tracked for milk productivity.
    pub fn is_dairy(&self) -> bool {
        matches!(self, Species::Cow | Species::Buffalo)
    }

    /// Companion animals scored for welfare.
    pub fn is_companion(&self) -> bool {
        matches!(self, Species::Dog | Species::Cat)
    }
}

impl From<String> for Species {
    fn from(value: String) -> Self {
        Species::parse(&value)
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.as_str().to_string()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An animal registered with the practice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    /// Unique ID (UUID v4)
    pub id: String,
    /// Animal name
    pub name: String,
    /// Species as recorded (e.g., "Cow", "dog")
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Owner/farmer name
    pub owner_name: Option<String>,
    /// Owner contact number
    pub owner_phone: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Animal {
    /// Create a new animal with required fields.
    pub fn new(name: String, species: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            species,
            breed: None,
            owner_name: None,
            owner_phone: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Get the species as a member of the species universe.
    pub fn species_kind(&self) -> Species {
        Species::parse(&self.species)
    }
}
