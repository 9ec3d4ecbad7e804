//! Navigation path conventions.
//!
//! Pure string functions. The clinical frontend follows the `next` and
//! `redirect_to` values returned by the API, so these are the canonical
//! destinations after each auth or exam-taking step.

pub const LOGIN: &str = "/login";

pub const WAITING_APPROVAL: &str = "/waiting-approval";

pub const UNAUTHORIZED: &str = "/unauthorized";

pub const INDEX_DOCTOR: &str = "/index_doctor";

pub fn doctor_patient(patient_id: i64) -> String {
    format!("/doctor/{patient_id}")
}

pub fn patient_success(patient_id: i64) -> String {
    format!("/patient/{patient_id}?success=true")
}

/// File name of a questionnaire definition, keyed by exam name.
pub fn exam_definition_file(exam_name: &str) -> String {
    format!("{exam_name}.json")
}
