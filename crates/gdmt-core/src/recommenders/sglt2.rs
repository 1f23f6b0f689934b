//! SGLT2 inhibitor recommender.
//!
//! An eGFR below 20 rules out starting an SGLT2 inhibitor before
//! contraindications are even looked at. The only vitals gate is a median
//! systolic BP of at least 100 over the last two weeks.

use tracing::{debug, info};

use gdmt_contracts::{
    allergy::ContraindicationCategory,
    error::EngineResult,
    medication::{MedicationClassReference, MedicationReference, MedicationRequestContext},
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

use super::base::{
    find_current_requests, is_target_daily_dose_reached, recent_median, recommend,
    suggest_without_starting,
};

const CLASS: MedicationClassReference = MedicationClassReference::Sglt2Inhibitors;

const PREFERRED: [MedicationReference; 3] = [
    MedicationReference::Empagliflozin,
    MedicationReference::Dapagliflozin,
    MedicationReference::Sotagliflozin,
];

const MIN_EGFR: f64 = 20.0;
const MIN_SYSTOLIC: f64 = 100.0;

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

fn compute_titration(
    current: Vec<MedicationRequestContext>,
    input: &RecommendationInput,
) -> EngineResult<Vec<RecommendationOutput>> {
    use RecommendationCategory::*;

    if is_target_daily_dose_reached(&current)? {
        return Ok(recommend(current, None, TargetDoseReached));
    }

    let category = match recent_median(&input.vitals.systolic_blood_pressure) {
        None => MorePatientObservationsRequired,
        Some(systolic) if systolic < MIN_SYSTOLIC => PersonalTargetDoseReached,
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

    let egfr = input.vitals.estimated_glomerular_filtration_rate.as_ref();
    if egfr.is_some_and(|o| o.value < MIN_EGFR) {
        info!(class = %CLASS, "initiation blocked by eGFR below 20");
        return Vec::new();
    }

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

    let category = match recent_median(&input.vitals.systolic_blood_pressure) {
        None => MorePatientObservationsRequired,
        Some(systolic) if systolic < MIN_SYSTOLIC => NoActionRequired,
        Some(_) => NotStarted,
    };

    debug!(class = %CLASS, medication = %medication, category = %category, "initiation evaluated");
    recommend(Vec::new(), Some(medication), category)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
