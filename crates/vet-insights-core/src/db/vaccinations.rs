//! Vaccination database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult};
use crate::models::Vaccination;

const VACCINATION_COLUMNS: &str = "id, animal_id, vaccine_name, date_given, next_due_date, \
                                   batch_number, administered_by, created_at";

fn vaccination_from_row(row: &Row<'_>) -> rusqlite::Result<Vaccination> {
    Ok(Vaccination {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        vaccine_name: row.get(2)?,
        date_given: row.get(3)?,
        next_due_date: row.get(4)?,
        batch_number: row.get(5)?,
        administered_by: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl Database {
    /// Insert a vaccination for an existing animal.
    pub fn insert_vaccination(&self, vaccination: &Vaccination) -> DbResult<()> {
        self.ensure_animal_exists(&vaccination.animal_id)?;
        self.conn.execute(
            r#"
            INSERT INTO vaccinations (
                id, animal_id, vaccine_name, date_given, next_due_date,
                batch_number, administered_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                vaccination.id,
                vaccination.animal_id,
                vaccination.vaccine_name,
                vaccination.date_given,
                vaccination.next_due_date,
                vaccination.batch_number,
                vaccination.administered_by,
                vaccination.created_at,
            ],
        )?;
        Ok(())
    }

    /// List vaccinations, optionally for a single animal.
    pub fn list_vaccinations(&self, animal_id: Option<&str>) -> DbResult<Vec<Vaccination>> {
        let vaccinations = match animal_id {
            Some(id) => {
                let sql = format!(
                    "SELECT {} FROM vaccinations WHERE animal_id = ? ORDER BY rowid",
                    VACCINATION_COLUMNS
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([id], vaccination_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM vaccinations ORDER BY rowid",
                    VACCINATION_COLUMNS
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], vaccination_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(vaccinations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Animal;

    #[test]
    fn test_insert_and_list() {
        let db = Database::open_in_memory().unwrap();
        let dog = Animal::new("Moti".into(), "dog".into());
        let cat = Animal::new("Billi".into(), "cat".into());
        db.insert_animal(&dog).unwrap();
        db.insert_animal(&cat).unwrap();

        let mut rabies = Vaccination::new(dog.id.clone(), "Rabies".into(), "2024-03-01".into())
            .with_next_due("2025-03-01");
        rabies.batch_number = Some("RB-2291".into());
        db.insert_vaccination(&rabies).unwrap();
        db.insert_vaccination(&Vaccination::new(
            cat.id.clone(),
            "FVRCP".into(),
            "2024-04-01".into(),
        ))
        .unwrap();

        assert_eq!(db.list_vaccinations(None).unwrap().len(), 2);

        let dog_vaccs = db.list_vaccinations(Some(&dog.id)).unwrap();
        assert_eq!(dog_vaccs.len(), 1);
        assert_eq!(dog_vaccs[0], rabies);
    }

    #[test]
    fn test_vaccination_for_unknown_animal() {
        let db = Database::open_in_memory().unwrap();
        let vacc = Vaccination::new("ghost".into(), "Rabies".into(), "2024-01-01".into());
        assert!(db.insert_vaccination(&vacc).is_err());
    }
}
