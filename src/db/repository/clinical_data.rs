use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{ClinicalData, NewClinicalData};

/// List all measurements in store order.
pub fn list_clinical_data(conn: &Connection) -> Result<Vec<ClinicalData>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, component_name, component_value, measured_date_time, patient_id
         FROM clinicaldata",
    )?;
    let rows = stmt.query_map([], row_to_clinical_data)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Look up a measurement by id.
pub fn find_clinical_data(
    conn: &Connection,
    id: i64,
) -> Result<Option<ClinicalData>, DatabaseError> {
    conn.query_row(
        "SELECT id, component_name, component_value, measured_date_time, patient_id
         FROM clinicaldata WHERE id = ?1",
        params![id],
        row_to_clinical_data,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Insert a measurement. The store assigns the id and stamps
/// `measured_date_time` with the insert time.
pub fn insert_clinical_data(
    conn: &Connection,
    new: &NewClinicalData,
) -> Result<ClinicalData, DatabaseError> {
    conn.execute(
        "INSERT INTO clinicaldata (component_name, component_value, measured_date_time, patient_id)
         VALUES (?1, ?2, datetime('now'), ?3)",
        params![new.component_name, new.component_value, new.patient_id],
    )?;
    let id = conn.last_insert_rowid();
    find_clinical_data(conn, id)?.ok_or(DatabaseError::NotFound {
        entity_type: "clinicaldata".into(),
        id,
    })
}

/// Replace a measurement's client-settable fields. The path id wins, the
/// creation timestamp is preserved, and the patient link is cleared (the
/// link can only be set by the record-for-patient operation). Returns
/// `None` when no row with that id exists.
pub fn update_clinical_data(
    conn: &Connection,
    id: i64,
    new: &NewClinicalData,
) -> Result<Option<ClinicalData>, DatabaseError> {
    let affected = conn.execute(
        "UPDATE clinicaldata
         SET component_name = ?1, component_value = ?2, patient_id = ?3
         WHERE id = ?4",
        params![new.component_name, new.component_value, new.patient_id, id],
    )?;
    if affected == 0 {
        return Ok(None);
    }
    find_clinical_data(conn, id)
}

/// Delete a measurement by id.
pub fn delete_clinical_data(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let affected = conn.execute("DELETE FROM clinicaldata WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "clinicaldata".into(),
            id,
        });
    }
    Ok(())
}

fn row_to_clinical_data(row: &rusqlite::Row) -> Result<ClinicalData, rusqlite::Error> {
    let measured_str: String = row.get(3)?;
    Ok(ClinicalData {
        id: row.get(0)?,
        component_name: row.get(1)?,
        component_value: row.get(2)?,
        measured_date_time: NaiveDateTime::parse_from_str(&measured_str, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
        patient_id: row.get(4)?,
    })
}
