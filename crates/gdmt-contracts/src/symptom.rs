//! Patient-reported symptom scores (KCCQ-12).

use serde::{Deserialize, Serialize};

/// The scored result of one KCCQ-12 questionnaire.
///
/// Domain scores lie in [0, 100]; `dizziness_score` is the raw answer in
/// [0, 5]. Domains that could not be scored (too many "not applicable"
/// answers) are `None`. Only the symptom-score calculator creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomScore {
    pub overall_score: f64,
    #[serde(default)]
    pub physical_limits_score: Option<f64>,
    #[serde(default)]
    pub symptom_frequency_score: Option<f64>,
    #[serde(default)]
    pub social_limits_score: Option<f64>,
    #[serde(default)]
    pub quality_of_life_score: Option<f64>,
    pub dizziness_score: f64,
}
