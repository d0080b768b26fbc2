pub mod patient;
pub mod role;

pub use patient::{PatientRecord, SummarySet};
pub use role::Role;
