pub mod clinical_data;
pub mod patient;

pub use clinical_data::*;
pub use patient::*;
