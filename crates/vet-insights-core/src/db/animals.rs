//! Animal database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::Animal;

const ANIMAL_COLUMNS: &str =
    "id, name, species, breed, owner_name, owner_phone, created_at, updated_at";

fn animal_from_row(row: &Row<'_>) -> rusqlite::Result<Animal> {
    Ok(Animal {
        id: row.get(0)?,
        name: row.get(1)?,
        species: row.get(2)?,
        breed: row.get(3)?,
        owner_name: row.get(4)?,
        owner_phone: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn validate(animal: &Animal) -> DbResult<()> {
    if animal.name.trim().is_empty() {
        return Err(DbError::Constraint("animal name must not be empty".into()));
    }
    if animal.species.trim().is_empty() {
        return Err(DbError::Constraint("animal species must not be empty".into()));
    }
    Ok(())
}

impl Database {
    /// Insert a new animal.
    pub fn insert_animal(&self, animal: &Animal) -> DbResult<()> {
        validate(animal)?;
        self.conn.execute(
            r#"
            INSERT INTO animals (
                id, name, species, breed, owner_name, owner_phone,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                animal.id,
                animal.name,
                animal.species,
                animal.breed,
                animal.owner_name,
                animal.owner_phone,
                animal.created_at,
                animal.updated_at,
            ],
        )?;
        tracing::debug!(animal_id = %animal.id, species = %animal.species, "inserted animal");
        Ok(())
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: &str) -> DbResult<Option<Animal>> {
        let sql = format!("SELECT {} FROM animals WHERE id = ?", ANIMAL_COLUMNS);
        self.conn
            .query_row(&sql, [id], animal_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List all animals.
    pub fn list_animals(&self) -> DbResult<Vec<Animal>> {
        let sql = format!("SELECT {} FROM animals ORDER BY name", ANIMAL_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], animal_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Fail with `NotFound` unless the animal exists.
    pub(crate) fn ensure_animal_exists(&self, id: &str) -> DbResult<()> {
        match self.get_animal(id)? {
            Some(_) => Ok(()),
            None => Err(DbError::NotFound(format!("animal {}", id))),
        }
    }
}
