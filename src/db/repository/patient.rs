use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient};

/// List all patients in store order.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, first_name, last_name, age FROM patients")?;
    let rows = stmt.query_map([], row_to_patient)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Look up a patient by id.
pub fn find_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    conn.query_row(
        "SELECT id, first_name, last_name, age FROM patients WHERE id = ?1",
        params![id],
        row_to_patient,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Insert a patient; the store assigns the id.
pub fn insert_patient(conn: &Connection, new: &NewPatient) -> Result<Patient, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (first_name, last_name, age) VALUES (?1, ?2, ?3)",
        params![new.first_name, new.last_name, new.age],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Patient {
        id,
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        age: new.age,
    })
}

/// Replace a patient's fields. Returns `None` when no row with that id
/// exists (no mutation is performed in that case).
pub fn update_patient(
    conn: &Connection,
    id: i64,
    new: &NewPatient,
) -> Result<Option<Patient>, DatabaseError> {
    let affected = conn.execute(
        "UPDATE patients SET first_name = ?1, last_name = ?2, age = ?3 WHERE id = ?4",
        params![new.first_name, new.last_name, new.age, id],
    )?;
    if affected == 0 {
        return Ok(None);
    }
    Ok(Some(Patient {
        id,
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        age: new.age,
    }))
}

/// Delete a patient by id. Linked measurements keep their rows; the FK is
/// nulled by ON DELETE SET NULL.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let affected = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id,
        });
    }
    Ok(())
}

fn row_to_patient(row: &rusqlite::Row) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        age: row.get(3)?,
    })
}
