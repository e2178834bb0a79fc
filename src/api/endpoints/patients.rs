//! Patient CRUD endpoints.
//!
//! - `GET /patients` — list all
//! - `GET /patients/:id` — single record, 404 when absent
//! - `POST /patients` — create, 201 with `Location`
//! - `PUT /patients/:id` — full replace, path id wins
//! - `DELETE /patients/:id` — 204, 404 when absent

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::api::error::{ApiError, ApiJson, FieldError};
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewPatient, Patient};

/// Patient fields as accepted on the wire. An `id` in the body is accepted
/// and ignored: the store assigns it on create and the path wins on update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    #[allow(dead_code)]
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
}

impl PatientPayload {
    fn validate(self) -> Result<NewPatient, ApiError> {
        let mut errors = Vec::new();

        let first_name = self
            .first_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                errors.push(FieldError::new("firstName", "must not be blank"));
                String::new()
            });
        let last_name = self
            .last_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                errors.push(FieldError::new("lastName", "must not be blank"));
                String::new()
            });
        if let Some(age) = self.age {
            if age < 0 {
                errors.push(FieldError::new("age", "must not be negative"));
            }
        }

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(NewPatient {
            first_name,
            last_name,
            age: self.age,
        })
    }
}

/// `GET /patients` — all patient records.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.open_db()?;
    let patients = repository::list_patients(&conn)?;
    tracing::debug!(count = patients.len(), "Listed patients");
    Ok(Json(patients))
}

/// `GET /patients/:id` — single patient.
pub async fn get_by_id(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let conn = ctx.open_db()?;
    repository::find_patient(&conn, id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("patient".into()))
}

/// `POST /patients` — create, returning the persisted record and a
/// `Location` header for the new resource.
pub async fn create(
    State(ctx): State<ApiContext>,
    ApiJson(payload): ApiJson<PatientPayload>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Patient>), ApiError> {
    let new = payload.validate()?;
    let conn = ctx.open_db()?;
    let saved = repository::insert_patient(&conn, &new)?;
    tracing::info!(id = saved.id, "Created patient");
    let location = format!("/patients/{}", saved.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(saved)))
}

/// `PUT /patients/:id` — full replace. The path id overrides any id in the
/// payload; a missing id yields 404 with no mutation.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<PatientPayload>,
) -> Result<Json<Patient>, ApiError> {
    let new = payload.validate()?;
    let conn = ctx.open_db()?;
    repository::update_patient(&conn, id, &new)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("patient".into()))
}

/// `DELETE /patients/:id` — 204 on success, 404 when absent.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    repository::delete_patient(&conn, id)?;
    tracing::info!(id, "Deleted patient");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(first: Option<&str>, last: Option<&str>, age: Option<i64>) -> PatientPayload {
        PatientPayload {
            id: None,
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            age,
        }
    }

    #[test]
    fn validate_accepts_complete_payload() {
        let new = payload(Some("Ada"), Some("Lovelace"), Some(36))
            .validate()
            .unwrap();
        assert_eq!(new.first_name, "Ada");
        assert_eq!(new.age, Some(36));
    }

    #[test]
    fn validate_rejects_missing_names_with_both_fields() {
        let err = payload(None, Some(" "), None).validate().unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert!(names.contains(&"firstName"));
                assert!(names.contains(&"lastName"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative_age() {
        let err = payload(Some("Ada"), Some("Lovelace"), Some(-1))
            .validate()
            .unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "age");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn payload_id_is_ignored_by_validation() {
        let p = PatientPayload {
            id: Some(999),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            age: None,
        };
        // id does not survive into NewPatient
        let new = p.validate().unwrap();
        assert_eq!(new.first_name, "Ada");
    }
}
