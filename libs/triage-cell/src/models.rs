// libs/triage-cell/src/models.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TriageQuery {
    pub symptoms: String,
}

/// A specialty suggestion for a symptom description. Best-effort only: the
/// recommendation never gates booking, it just points the patient somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialtyRecommendation {
    pub specialty: &'static str,
    /// Relevance percentage, 0-100.
    pub confidence: u8,
    pub reasoning: &'static str,
}

/// A recommendation joined against the active doctor roster.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorRecommendation {
    pub specialty: &'static str,
    pub confidence: u8,
    pub reasoning: &'static str,
    pub doctor_ids: Vec<i64>,
}
