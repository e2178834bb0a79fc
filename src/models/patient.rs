use serde::{Deserialize, Serialize};

/// A person record identified by a server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
}

/// Patient fields as supplied by clients. The id is always server-assigned
/// (create) or taken from the request path (update).
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
}
