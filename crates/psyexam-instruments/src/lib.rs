//! psyexam-instruments
//!
//! Questionnaire definitions and scoring. Pure logic with no database or
//! HTTP dependency. Exams are administered from JSON definition files; results
//! are scored by the analyzer registered under the exam's name.

pub mod answers;
pub mod definition;
pub mod error;
pub mod instruments;
pub mod scoring;

use psyexam_core::models::analysis::Analysis;
use scoring::Domain;

/// Trait implemented by each scoring instrument.
pub trait Analyzer: Send + Sync {
    /// Registry key, matched against normalized exam names (e.g. "phq_9").
    fn id(&self) -> &str;

    /// Human-readable name (e.g. "PHQ-9").
    fn name(&self) -> &str;

    /// Number of answer slots the instrument reads.
    fn item_count(&self) -> usize;

    /// The symptom domains the instrument reports on.
    fn domains(&self) -> &[Domain];

    /// Score one result's answer slots. Slots beyond the stored range or left
    /// unanswered are filled with the instrument's default.
    fn analyze(&self, items: &[Option<i64>]) -> Analysis;
}

/// Return all registered analyzers.
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(instruments::phq_9::Phq9),
        Box::new(instruments::sds::Sds),
    ]
}

/// Normalize an exam name to its analyzer key: lowercase, `-` → `_`.
pub fn analyzer_key(exam_name: &str) -> String {
    exam_name.trim().replace('-', "_").to_lowercase()
}

/// Look up the analyzer for an exam by the exam's name.
pub fn get_analyzer(exam_name: &str) -> Option<Box<dyn Analyzer>> {
    let key = analyzer_key(exam_name);
    let found = all_analyzers().into_iter().find(|a| a.id() == key);
    match &found {
        Some(analyzer) => {
            tracing::debug!(exam = exam_name, analyzer = analyzer.id(), "analyzer resolved")
        }
        None => tracing::warn!(exam = exam_name, key = %key, "no analyzer registered"),
    }
    found
}
