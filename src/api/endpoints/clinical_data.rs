//! ClinicalData CRUD endpoints plus the composite record-for-patient
//! operation.
//!
//! - `GET /clinicaldata` — list all
//! - `GET /clinicaldata/:id` — single record, 404 when absent
//! - `POST /clinicaldata` — create, 201 with `Location`
//! - `PUT /clinicaldata/:id` — full replace, path id wins
//! - `DELETE /clinicaldata/:id` — 204, 404 when absent
//! - `POST /clinicaldata/clinicals` — resolve a patient id and persist a
//!   measurement linked to it; an unknown patient id persists unlinked.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::api::error::{ApiError, ApiJson, FieldError};
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{ClinicalData, NewClinicalData};

/// Measurement fields as accepted on the wire. An `id` in the body is
/// accepted and ignored; the patient link cannot be set here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDataPayload {
    #[allow(dead_code)]
    pub id: Option<i64>,
    pub component_name: Option<String>,
    pub component_value: Option<String>,
}

impl ClinicalDataPayload {
    fn validate(self) -> Result<NewClinicalData, ApiError> {
        let (component_name, component_value) =
            validate_components(self.component_name, self.component_value)?;
        Ok(NewClinicalData {
            component_name,
            component_value,
            patient_id: None,
        })
    }
}

/// Body of the composite operation: a measurement plus the id of the
/// patient it belongs to.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDataRequest {
    pub patient_id: Option<i64>,
    pub component_name: Option<String>,
    pub component_value: Option<String>,
}

fn validate_components(
    name: Option<String>,
    value: Option<String>,
) -> Result<(String, String), ApiError> {
    let mut errors = Vec::new();

    let component_name = name.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
        errors.push(FieldError::new("componentName", "must not be blank"));
        String::new()
    });
    let component_value = value.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
        errors.push(FieldError::new("componentValue", "must not be blank"));
        String::new()
    });

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok((component_name, component_value))
}

/// `GET /clinicaldata` — all measurement records.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<ClinicalData>>, ApiError> {
    let conn = ctx.open_db()?;
    let records = repository::list_clinical_data(&conn)?;
    tracing::debug!(count = records.len(), "Listed clinical data");
    Ok(Json(records))
}

/// `GET /clinicaldata/:id` — single measurement.
pub async fn get_by_id(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<ClinicalData>, ApiError> {
    let conn = ctx.open_db()?;
    repository::find_clinical_data(&conn, id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("clinicaldata".into()))
}

/// `POST /clinicaldata` — create an unlinked measurement, returning the
/// persisted record and a `Location` header.
pub async fn create(
    State(ctx): State<ApiContext>,
    ApiJson(payload): ApiJson<ClinicalDataPayload>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<ClinicalData>), ApiError> {
    let new = payload.validate()?;
    let conn = ctx.open_db()?;
    let saved = repository::insert_clinical_data(&conn, &new)?;
    tracing::info!(id = saved.id, "Created clinical data");
    let location = format!("/clinicaldata/{}", saved.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(saved)))
}

/// `PUT /clinicaldata/:id` — full replace. The path id overrides any id in
/// the payload; a missing id yields 404 with no mutation.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ClinicalDataPayload>,
) -> Result<Json<ClinicalData>, ApiError> {
    let new = payload.validate()?;
    let conn = ctx.open_db()?;
    repository::update_clinical_data(&conn, id, &new)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("clinicaldata".into()))
}

/// `DELETE /clinicaldata/:id` — 204 on success, 404 when absent.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    repository::delete_clinical_data(&conn, id)?;
    tracing::info!(id, "Deleted clinical data");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /clinicaldata/clinicals` — record a measurement for a patient.
///
/// Looks up the patient by id; when found, the new measurement is linked
/// to it. An unknown patient id is not an error: the measurement is
/// persisted unlinked and the call still returns 200.
pub async fn record_for_patient(
    State(ctx): State<ApiContext>,
    ApiJson(request): ApiJson<ClinicalDataRequest>,
) -> Result<Json<ClinicalData>, ApiError> {
    let mut errors = Vec::new();
    if request.patient_id.is_none() {
        errors.push(FieldError::new("patientId", "must be present"));
    }
    let components = validate_components(request.component_name, request.component_value);
    let (component_name, component_value) = match components {
        Ok(pair) => pair,
        Err(ApiError::Validation(mut fields)) => {
            errors.append(&mut fields);
            (String::new(), String::new())
        }
        Err(other) => return Err(other),
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let patient_id = request.patient_id.unwrap_or_default();

    let conn = ctx.open_db()?;
    let patient = repository::find_patient(&conn, patient_id)?;
    if patient.is_none() {
        tracing::warn!(patient_id, "Recording measurement for unknown patient");
    }

    let saved = repository::insert_clinical_data(
        &conn,
        &NewClinicalData {
            component_name,
            component_value,
            patient_id: patient.map(|p| p.id),
        },
    )?;
    tracing::info!(id = saved.id, linked = saved.patient_id.is_some(), "Recorded measurement");
    Ok(Json(saved))
}
