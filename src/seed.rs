//! Compiled-in demo data: the session roster and the built-in test panel.
//!
//! The roster is seeded once at startup and never grows or shrinks at
//! runtime; only `tests` and `summaries` on each record mutate. Contact
//! details are fictional.

use crate::models::PatientRecord;

/// Built-in orderable tests shown as checkboxes on the doctor screen.
/// Custom tests typed by the doctor are allowed on top of these.
pub const BUILTIN_TESTS: &[&str] = &[
    "CBC",
    "CMP",
    "Lipid Panel",
    "HbA1c",
    "Chest X-Ray",
    "ECG",
    "MRI",
    "CT Scan",
    "Urinalysis",
    "COVID-19 PCR",
];

/// The demo roster: five patients, stable order for the session.
pub fn demo_roster() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new("Meera Krishnan", 50, 84.0, "Chest Pain", "meera.krishnan@example.org"),
        PatientRecord::new("Rahul Bose", 35, 70.0, "Headache", "rahul.bose@example.org"),
        PatientRecord::new("Lena Fischer", 29, 62.0, "Fever", "lena.fischer@example.org"),
        PatientRecord::new("Daniel Okafor", 42, 80.0, "Diabetes Checkup", "daniel.okafor@example.org"),
        PatientRecord::new("Hana Suzuki", 31, 56.0, "Cough & Cold", "hana.suzuki@example.org"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_five_records() {
        assert_eq!(demo_roster().len(), 5);
    }

    #[test]
    fn every_record_has_contact_and_reason() {
        for rec in demo_roster() {
            assert!(!rec.name.is_empty());
            assert!(!rec.email.is_empty());
            assert!(!rec.reason.is_empty());
            assert!(rec.weight > 0.0);
        }
    }

    #[test]
    fn builtin_panel_has_no_duplicates() {
        let mut names: Vec<&str> = BUILTIN_TESTS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TESTS.len());
    }

    #[test]
    fn first_record_is_the_chest_pain_visit() {
        assert_eq!(demo_roster()[0].reason, "Chest Pain");
    }
}
