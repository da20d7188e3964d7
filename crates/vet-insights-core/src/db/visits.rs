//! Medical visit database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult};
use crate::models::VisitRecord;

const VISIT_COLUMNS: &str = "id, animal_id, visit_date, diagnosis, treatment, medications, \
                             veterinarian, notes, created_at";

fn visit_from_row(row: &Row<'_>) -> rusqlite::Result<VisitRecord> {
    Ok(VisitRecord {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        visit_date: row.get(2)?,
        diagnosis: row.get(3)?,
        treatment: row.get(4)?,
        medications: row.get(5)?,
        veterinarian: row.get(6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl Database {
    /// Insert a visit for an existing animal.
    pub fn insert_visit(&self, visit: &VisitRecord) -> DbResult<()> {
        self.ensure_animal_exists(&visit.animal_id)?;
        self.conn.execute(
            r#"
            INSERT INTO visits (
                id, animal_id, visit_date, diagnosis, treatment,
                medications, veterinarian, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                visit.id,
                visit.animal_id,
                visit.visit_date,
                visit.diagnosis,
                visit.treatment,
                visit.medications,
                visit.veterinarian,
                visit.notes,
                visit.created_at,
            ],
        )?;
        Ok(())
    }

    /// List visits, optionally for a single animal.
    ///
    /// Rows come back in insertion order; callers that care about
    /// chronology must sort by the parsed visit date themselves.
    pub fn list_visits(&self, animal_id: Option<&str>) -> DbResult<Vec<VisitRecord>> {
        let visits = match animal_id {
            Some(id) => {
                let sql = format!(
                    "SELECT {} FROM visits WHERE animal_id = ? ORDER BY rowid",
                    VISIT_COLUMNS
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([id], visit_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!("SELECT {} FROM visits ORDER BY rowid", VISIT_COLUMNS);
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], visit_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(visits)
    }
}
