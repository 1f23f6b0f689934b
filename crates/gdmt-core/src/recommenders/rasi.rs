//! Renin-angiotensin system inhibitor recommender (ACEI, ARB, ARNI).
//!
//! The three classes are alternatives within one therapeutic family, ranked
//! ARNI > ACEI/ARB > none. A patient on ARNI titrates ARNI. A patient on an
//! ACEI or ARB is moved to ARNI when ARNI is not contraindicated, otherwise
//! titrates within ACEI/ARB.
//!
//! Safety gates, in order:
//!
//! 1. median systolic BP over two weeks: missing → more patient
//!    observations; below 100, or two or more readings below 85 anywhere in
//!    the history → unsafe
//! 2. latest creatinine ≥ 2.5 or potassium ≥ 5 (no recency filter) → unsafe
//! 3. dizziness score of 3 or more → unsafe (titration only)

use tracing::{debug, info};

use gdmt_contracts::{
    allergy::ContraindicationCategory,
    error::EngineResult,
    medication::{MedicationClassReference, MedicationReference, MedicationRequestContext},
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

use super::base::{
    count_below, find_current_requests, is_dizzy, is_target_daily_dose_reached, recent_median,
    recommend,
};

const ARNI: MedicationClassReference = MedicationClassReference::AngiotensinReceptorNeprilysinInhibitors;
const ACEI: MedicationClassReference = MedicationClassReference::AngiotensinConvertingEnzymeInhibitors;
const ARB: MedicationClassReference = MedicationClassReference::AngiotensinReceptorBlockers;

const MIN_SYSTOLIC: f64 = 100.0;
const HYPOTENSION_THRESHOLD: f64 = 85.0;
const MAX_HYPOTENSIVE_READINGS: usize = 2;
const CREATININE_LIMIT: f64 = 2.5;
const POTASSIUM_LIMIT: f64 = 5.0;

pub fn compute(
    input: &RecommendationInput,
    classifier: &ContraindicationClassifier,
) -> EngineResult<Vec<RecommendationOutput>> {
    let arni = find_current_requests(&input.requests, &[ARNI]);
    if !arni.is_empty() {
        return compute_titration(arni, input);
    }

    let acei_arb = find_current_requests(&input.requests, &[ACEI, ARB]);
    if !acei_arb.is_empty() {
        return compute_acei_arb(acei_arb, input, classifier);
    }

    Ok(compute_new(input, classifier))
}

fn compute_acei_arb(
    current: Vec<MedicationRequestContext>,
    input: &RecommendationInput,
    classifier: &ContraindicationClassifier,
) -> EngineResult<Vec<RecommendationOutput>> {
    if classifier.classify(&input.contraindications, ARNI) != ContraindicationCategory::None {
        return compute_titration(current, input);
    }

    // Switching to ARNI is an improvement regardless of the current dose, but
    // it still has to pass the safety gates.
    let category = titration_gate(input).unwrap_or(RecommendationCategory::ImprovementAvailable);
    let recommended = (category == RecommendationCategory::ImprovementAvailable)
        .then_some(MedicationReference::SacubitrilValsartan);

    debug!(category = %category, "switch from ACEI/ARB to ARNI evaluated");
    Ok(recommend(current, recommended, category))
}

fn compute_titration(
    current: Vec<MedicationRequestContext>,
    input: &RecommendationInput,
) -> EngineResult<Vec<RecommendationOutput>> {
    if is_target_daily_dose_reached(&current)? {
        return Ok(recommend(current, None, RecommendationCategory::TargetDoseReached));
    }

    let category = titration_gate(input).unwrap_or(RecommendationCategory::ImprovementAvailable);
    debug!(category = %category, "RASI titration evaluated");
    Ok(recommend(current, None, category))
}

/// The first failing titration gate, if any.
fn titration_gate(input: &RecommendationInput) -> Option<RecommendationCategory> {
    use RecommendationCategory::*;

    match vitals_gate(input) {
        GateOutcome::MissingData => Some(MorePatientObservationsRequired),
        GateOutcome::Unsafe => Some(PersonalTargetDoseReached),
        GateOutcome::Pass if is_dizzy(input) => Some(PersonalTargetDoseReached),
        GateOutcome::Pass => None,
    }
}

enum GateOutcome {
    MissingData,
    Unsafe,
    Pass,
}

/// Blood pressure then lab gates, shared by titration and initiation.
fn vitals_gate(input: &RecommendationInput) -> GateOutcome {
    let vitals = &input.vitals;

    let Some(systolic) = recent_median(&vitals.systolic_blood_pressure) else {
        return GateOutcome::MissingData;
    };
    let hypotensive = count_below(&vitals.systolic_blood_pressure, HYPOTENSION_THRESHOLD);
    if systolic < MIN_SYSTOLIC || hypotensive >= MAX_HYPOTENSIVE_READINGS {
        return GateOutcome::Unsafe;
    }

    let creatinine_high = vitals.creatinine.as_ref().is_some_and(|o| o.value >= CREATININE_LIMIT);
    let potassium_high = vitals.potassium.as_ref().is_some_and(|o| o.value >= POTASSIUM_LIMIT);
    if creatinine_high || potassium_high {
        return GateOutcome::Unsafe;
    }

    GateOutcome::Pass
}

fn compute_new(
    input: &RecommendationInput,
    classifier: &ContraindicationClassifier,
) -> Vec<RecommendationOutput> {
    let allergies = &input.contraindications;
    let arb = classifier.classify(allergies, ARB);
    let acei = classifier.classify(allergies, ACEI);
    let arni = classifier.classify(allergies, ARNI);

    // First choice first.
    let candidates = [
        (arni, MedicationReference::SacubitrilValsartan),
        (arb, MedicationReference::Losartan),
        (acei, MedicationReference::Lisinopril),
    ];

    let choice = candidates
        .iter()
        .find(|(category, _)| *category == ContraindicationCategory::None)
        .or_else(|| {
            candidates
                .iter()
                .find(|(category, _)| *category == ContraindicationCategory::ClinicianListed)
        });

    let Some(&(contraindication, medication)) = choice else {
        info!("RASI initiation blocked: ARNI, ARB and ACEI all contraindicated");
        return Vec::new();
    };

    if contraindication == ContraindicationCategory::ClinicianListed {
        return recommend(Vec::new(), Some(medication), RecommendationCategory::NoActionRequired);
    }

    let category = match vitals_gate(input) {
        GateOutcome::MissingData => RecommendationCategory::MorePatientObservationsRequired,
        GateOutcome::Unsafe => RecommendationCategory::NoActionRequired,
        GateOutcome::Pass => RecommendationCategory::NotStarted,
    };

    debug!(medication = %medication, category = %category, "RASI initiation evaluated");
    recommend(Vec::new(), Some(medication), category)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
