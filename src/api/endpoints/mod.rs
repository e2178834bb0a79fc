pub mod clinical_data;
pub mod health;
pub mod patients;
