use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single measurement record (name, value, timestamp), optionally linked
/// to one Patient. The patient link is write-only from the API's point of
/// view: it is never serialized back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    pub id: i64,
    pub component_name: String,
    pub component_value: String,
    pub measured_date_time: NaiveDateTime,
    #[serde(skip)]
    pub patient_id: Option<i64>,
}

/// Measurement fields as supplied by clients. `measured_date_time` is
/// assigned by the store at insert. `patient_id` is only ever set by the
/// record-for-patient operation, never from a request body.
#[derive(Debug, Clone)]
pub struct NewClinicalData {
    pub component_name: String,
    pub component_value: String,
    pub patient_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(patient_id: Option<i64>) -> ClinicalData {
        ClinicalData {
            id: 20,
            component_name: "glucose".into(),
            component_value: "90".into(),
            measured_date_time: NaiveDateTime::parse_from_str(
                "2026-01-15 10:30:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            patient_id,
        }
    }

    #[test]
    fn patient_link_never_serialized() {
        let json = serde_json::to_value(sample(Some(1))).unwrap();
        assert_eq!(json["id"], 20);
        assert_eq!(json["componentName"], "glucose");
        assert_eq!(json["componentValue"], "90");
        assert!(json.get("patientId").is_none());
        assert!(json.get("patient_id").is_none());
        assert!(json.get("patient").is_none());
    }

    #[test]
    fn timestamp_serialized_under_camel_case_key() {
        let json = serde_json::to_value(sample(None)).unwrap();
        assert!(json.get("measuredDateTime").is_some());
    }
}
