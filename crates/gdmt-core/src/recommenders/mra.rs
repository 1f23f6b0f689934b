//! Mineralocorticoid receptor antagonist recommender.
//!
//! Both creatinine and potassium must be on file and less than 30 days old,
//! otherwise more lab observations are required. Titration stops above the
//! limits (creatinine > 2.5, potassium > 5); initiation is withheld at or
//! above them (creatinine ≥ 2.5, potassium ≥ 5).

use tracing::{debug, info};

use gdmt_contracts::{
    allergy::ContraindicationCategory,
    error::EngineResult,
    medication::{MedicationClassReference, MedicationReference, MedicationRequestContext},
    observation::Vitals,
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

use super::base::{
    find_current_requests, is_recent, is_target_daily_dose_reached, recommend,
    suggest_without_starting,
};

const CLASS: MedicationClassReference = MedicationClassReference::MineralocorticoidReceptorAntagonists;

const PREFERRED: [MedicationReference; 2] =
    [MedicationReference::Spironolactone, MedicationReference::Eplerenone];

const LAB_MAX_AGE_DAYS: i64 = 30;
const CREATININE_LIMIT: f64 = 2.5;
const POTASSIUM_LIMIT: f64 = 5.0;

pub fn compute(
    input: &RecommendationInput,
    classifier: &ContraindicationClassifier,
) -> EngineResult<Vec<RecommendationOutput>> {
    let current = find_current_requests(&input.requests, &[CLASS]);
    if current.is_empty() {
        return Ok(compute_new(input, classifier));
    }
    compute_titration(current, input)
}

/// Latest creatinine and potassium, if both are fresh enough to act on.
fn recent_labs(vitals: &Vitals) -> Option<(f64, f64)> {
    let creatinine = vitals.creatinine.as_ref().filter(|o| is_recent(o, LAB_MAX_AGE_DAYS))?;
    let potassium = vitals.potassium.as_ref().filter(|o| is_recent(o, LAB_MAX_AGE_DAYS))?;
    Some((creatinine.value, potassium.value))
}

fn compute_titration(
    current: Vec<MedicationRequestContext>,
    input: &RecommendationInput,
) -> EngineResult<Vec<RecommendationOutput>> {
    use RecommendationCategory::*;

    if is_target_daily_dose_reached(&current)? {
        return Ok(recommend(current, None, TargetDoseReached));
    }

    let category = match recent_labs(&input.vitals) {
        None => MoreLabObservationsRequired,
        Some((creatinine, potassium)) if creatinine > CREATININE_LIMIT || potassium > POTASSIUM_LIMIT => {
            PersonalTargetDoseReached
        }
        Some(_) => ImprovementAvailable,
    };

    debug!(class = %CLASS, category = %category, "titration evaluated");
    Ok(recommend(current, None, category))
}

fn compute_new(
    input: &RecommendationInput,
    classifier: &ContraindicationClassifier,
) -> Vec<RecommendationOutput> {
    use RecommendationCategory::*;

    match classifier.classify(&input.contraindications, CLASS) {
        ContraindicationCategory::SevereAllergyIntolerance
        | ContraindicationCategory::AllergyIntolerance => {
            info!(class = %CLASS, "initiation blocked by allergy or intolerance");
            return Vec::new();
        }
        ContraindicationCategory::ClinicianListed => {
            return suggest_without_starting(classifier, &input.contraindications, &PREFERRED);
        }
        ContraindicationCategory::None => {}
    }

    let Some(medication) = classifier.find_eligible_medication(&input.contraindications, &PREFERRED)
    else {
        return suggest_without_starting(classifier, &input.contraindications, &PREFERRED);
    };

    let category = match recent_labs(&input.vitals) {
        None => MoreLabObservationsRequired,
        Some((creatinine, potassium)) if creatinine >= CREATININE_LIMIT || potassium >= POTASSIUM_LIMIT => {
            NoActionRequired
        }
        Some(_) => NotStarted,
    };

    debug!(class = %CLASS, medication = %medication, category = %category, "initiation evaluated");
    recommend(Vec::new(), Some(medication), category)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
