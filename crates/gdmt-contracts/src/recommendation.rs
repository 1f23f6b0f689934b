//! Recommendation input and output types.
//!
//! The engine consumes a `RecommendationInput` and produces a list of
//! `RecommendationOutput` values, at most one per drug class. Outputs are
//! plain values: a caller detects changes by comparing them with `==`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    allergy::AllergyIntolerance,
    medication::{MedicationReference, MedicationRequestContext},
    observation::Vitals,
    symptom::SymptomScore,
};

/// The clinical outcome of one recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationCategory {
    /// Current dose is below target and every safety gate passed.
    ImprovementAvailable,
    /// Lab values are missing or too old to decide.
    MoreLabObservationsRequired,
    /// Home measurements are too sparse to decide.
    MorePatientObservationsRequired,
    /// Not started, and starting is not advised right now.
    NoActionRequired,
    /// Not started, and starting is advised.
    NotStarted,
    /// Below target, but the patient's vitals or symptoms cap the dose.
    PersonalTargetDoseReached,
    /// Guideline target daily dose already reached.
    TargetDoseReached,
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ImprovementAvailable => "improvementAvailable",
            Self::MoreLabObservationsRequired => "moreLabObservationsRequired",
            Self::MorePatientObservationsRequired => "morePatientObservationsRequired",
            Self::NoActionRequired => "noActionRequired",
            Self::NotStarted => "notStarted",
            Self::PersonalTargetDoseReached => "personalTargetDoseReached",
            Self::TargetDoseReached => "targetDoseReached",
        };
        f.write_str(name)
    }
}

/// Everything the engine needs for one patient.
///
/// Assembled by the caller from stored patient facts; never mutated by the
/// engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    #[serde(default)]
    pub requests: Vec<MedicationRequestContext>,
    #[serde(default)]
    pub contraindications: Vec<AllergyIntolerance>,
    #[serde(default)]
    pub vitals: Vitals,
    #[serde(default)]
    pub latest_symptom_score: Option<SymptomScore>,
}

/// One drug-class recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationOutput {
    /// The active requests in this class the recommendation is about.
    pub current_medication: Vec<MedicationRequestContext>,
    /// The medication to start or switch to, if any.
    #[serde(default)]
    pub recommended_medication: Option<MedicationReference>,
    pub category: RecommendationCategory,
}
