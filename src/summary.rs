//! Audience-summary derivation.
//!
//! One doctor-authored note fans out into three fixed-template texts:
//! a plain-language recap for the patient, a handoff sheet for the
//! nurse, and a de-identified teaching case for the student. The
//! templates are frozen; only the note, the demographics, and the
//! ordered tests flow into them. Derivation is pure and runs at commit
//! time only, never on note edits or test changes.

use crate::models::PatientRecord;

/// The three derived texts for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceSummaries {
    pub patient_text: String,
    pub nurse_text: String,
    pub student_text: String,
}

/// De-identified label for the record at `index` ("Patient 1" for the
/// first roster entry). Also used by student roster cards.
pub fn deidentified_label(index: usize) -> String {
    format!("Patient {}", index + 1)
}

/// Derive the three audience texts from a record.
///
/// Deterministic: identical record and index yield byte-identical
/// output. The student text must never contain the patient's name, so
/// after composition every occurrence of the exact name (the note or
/// the visit reason may mention it) is replaced with the de-identified
/// label. An empty name is never scrubbed.
pub fn audience_summaries(record: &PatientRecord, index: usize) -> AudienceSummaries {
    let base = record.summaries.doctor.trim();
    let label = deidentified_label(index);

    let patient_text = format!(
        "{name} (Age {age}) visited for {reason}.\n\
         What we discussed:\n\
         • Your symptoms and exam\n\
         • Tests ordered: {tests}\n\
         • Next steps and follow-up\n\
         \n\
         Summary:\n\
         {summary}",
        name = record.name,
        age = record.age,
        reason = record.reason,
        tests = joined(&record.tests, "—"),
        summary = if base.is_empty() {
            "Your doctor will add your visit summary shortly."
        } else {
            base
        },
    );

    let nurse_text = format!(
        "{name} (Age {age}) — {reason}\n\
         Handoff notes:\n\
         • Tests: {tests}\n\
         • Monitoring: vitals/symptoms; follow-up on results\n\
         • Education: meds adherence; red flags\n\
         Doctor notes:\n\
         {notes}",
        name = record.name,
        age = record.age,
        reason = record.reason,
        tests = joined(&record.tests, "None"),
        notes = if base.is_empty() { "—" } else { base },
    );

    let student_text = format!(
        "{label}\n\
         Chief Concern: {reason}\n\
         Assessment:\n\
         • Working Dx: (add)\n\
         • DDx: (add 2–3)\n\
         Plan:\n\
         • Tests: {tests}\n\
         • Treatment: (add)\n\
         Rationale:\n\
         {rationale}",
        label = label,
        reason = record.reason,
        tests = joined(&record.tests, "None"),
        rationale = if base.is_empty() { "—" } else { base },
    );
    let student_text = scrub_name(student_text, &record.name, &label);

    AudienceSummaries {
        patient_text,
        nurse_text,
        student_text,
    }
}

fn joined(tests: &[String], empty: &str) -> String {
    if tests.is_empty() {
        empty.to_string()
    } else {
        tests.join(", ")
    }
}

fn scrub_name(text: String, name: &str, label: &str) -> String {
    if name.is_empty() {
        return text;
    }
    text.replace(name, label)
}
