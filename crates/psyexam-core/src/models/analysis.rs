use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The output of a scoring analyzer, before it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Analysis {
    pub total_score: f64,
    pub severity: Option<String>,
    pub interpretation: String,
    /// Analyzer-specific breakdown: `item_scores`, `domain_analysis`, and
    /// any index the instrument defines.
    pub details: serde_json::Value,
}

/// A persisted analysis, one per result.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisRecord {
    pub id: i64,
    pub result_id: i64,
    pub patient_id: i64,
    pub exam_id: i64,
    pub total_score: f64,
    pub details: serde_json::Value,
    pub interpretation: String,
    pub severity: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// An analysis listed for a patient, labelled with its exam.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientAnalysis {
    #[serde(flatten)]
    pub record: AnalysisRecord,
    pub exam_name: String,
}
