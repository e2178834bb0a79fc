pub mod clinical_data;
pub mod patient;

pub use clinical_data::{ClinicalData, NewClinicalData};
pub use patient::{NewPatient, Patient};
