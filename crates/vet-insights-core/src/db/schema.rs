//! SQLite schema definition.

/// Complete database schema for vet-insights.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Animals
-- ============================================================================

CREATE TABLE IF NOT EXISTS animals (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT,
    owner_name TEXT,
    owner_phone TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_animals_species ON animals(species);
CREATE INDEX IF NOT EXISTS idx_animals_name ON animals(name);

-- ============================================================================
-- Medical Visits
-- ============================================================================

CREATE TABLE IF NOT EXISTS visits (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    visit_date TEXT NOT NULL,
    diagnosis TEXT NOT NULL DEFAULT '',
    treatment TEXT NOT NULL DEFAULT '',
    medications TEXT,
    veterinarian TEXT,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_visits_animal ON visits(animal_id);
CREATE INDEX IF NOT EXISTS idx_visits_date ON visits(visit_date);

-- ============================================================================
-- Vaccinations
-- ============================================================================

CREATE TABLE IF NOT EXISTS vaccinations (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    vaccine_name TEXT NOT NULL,
    date_given TEXT NOT NULL,
    next_due_date TEXT,
    batch_number TEXT,
    administered_by TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_vaccinations_animal ON vaccinations(animal_id);
CREATE INDEX IF NOT EXISTS idx_vaccinations_due ON vaccinations(next_due_date);
"#;
