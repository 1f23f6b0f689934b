//! Beta-blocker recommender.
//!
//! Titration gates, in order:
//!
//! 1. median systolic BP over two weeks: missing → more patient observations,
//!    below 100 → personal target
//! 2. median heart rate over two weeks: missing → more patient observations,
//!    below 60 → personal target
//! 3. dizziness score of 3 or more → personal target
//!
//! Initiation runs gates 1 and 2 with `NoActionRequired` for unsafe values.

use tracing::{debug, info};

use gdmt_contracts::{
    allergy::ContraindicationCategory,
    error::EngineResult,
    medication::{MedicationClassReference, MedicationReference, MedicationRequestContext},
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

use super::base::{
    find_current_requests, is_dizzy, is_target_daily_dose_reached, recent_median, recommend,
    suggest_without_starting,
};

const CLASS: MedicationClassReference = MedicationClassReference::BetaBlockers;

/// Preferred starting medications, first choice first.
const PREFERRED: [MedicationReference; 3] = [
    MedicationReference::Carvedilol,
    MedicationReference::MetoprololSuccinate,
    MedicationReference::Bisoprolol,
];

const MIN_SYSTOLIC: f64 = 100.0;
const MIN_HEART_RATE: f64 = 60.0;

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
        Some(_) => match recent_median(&input.vitals.heart_rate) {
            None => MorePatientObservationsRequired,
            Some(heart_rate) if heart_rate < MIN_HEART_RATE => PersonalTargetDoseReached,
            Some(_) if is_dizzy(input) => PersonalTargetDoseReached,
            Some(_) => ImprovementAvailable,
        },
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

    let category = match recent_median(&input.vitals.systolic_blood_pressure) {
        None => MorePatientObservationsRequired,
        Some(systolic) if systolic < MIN_SYSTOLIC => NoActionRequired,
        Some(_) => match recent_median(&input.vitals.heart_rate) {
            None => MorePatientObservationsRequired,
            Some(heart_rate) if heart_rate < MIN_HEART_RATE => NoActionRequired,
            Some(_) => NotStarted,
        },
    };

    debug!(class = %CLASS, medication = %medication, category = %category, "initiation evaluated");
    recommend(Vec::new(), Some(medication), category)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use gdmt_contracts::{
        allergy::{AllergyCriticality, AllergyIntolerance, AllergyType},
        error::EngineError,
        medication::MedicationReference,
        recommendation::{RecommendationCategory, RecommendationInput},
    };

    use super::compute;
    use crate::testing::{classifier, classifier_with, request, series, stable_vitals, symptom_score};

    fn titrating(vitals_fn: impl FnOnce(&mut RecommendationInput)) -> RecommendationInput {
        let mut input = RecommendationInput {
            requests: vec![request(MedicationReference::Carvedilol, 6.25, 2.0)],
            vitals: stable_vitals(),
            ..Default::default()
        };
        vitals_fn(&mut input);
        input
    }

    fn category_of(input: &RecommendationInput) -> RecommendationCategory {
        let outputs = compute(input, &classifier()).unwrap();
        assert_eq!(outputs.len(), 1);
        outputs[0].category
    }

    // ── initiation ───────────────────────────────────────────────────────────

    #[test]
    fn not_started_with_stable_vitals() {
        let input = RecommendationInput {
            vitals: stable_vitals(),
            ..Default::default()
        };
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].category, RecommendationCategory::NotStarted);
        assert_eq!(outputs[0].recommended_medication, Some(MedicationReference::Carvedilol));
        assert!(outputs[0].current_medication.is_empty());
    }

    #[test]
    fn allergy_blocks_initiation() {
        for criticality in [None, Some(AllergyCriticality::High)] {
            let input = RecommendationInput {
                contraindications: vec![AllergyIntolerance::new(AllergyType::Allergy, criticality, &["293962009"])],
                vitals: stable_vitals(),
                ..Default::default()
            };
            assert!(compute(&input, &classifier()).unwrap().is_empty());
        }
    }

    #[test]
    fn clinician_listed_suggests_without_starting() {
        let input = RecommendationInput {
            contraindications: vec![AllergyIntolerance::new(AllergyType::Financial, None, &["293962009"])],
            vitals: stable_vitals(),
            ..Default::default()
        };
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs[0].category, RecommendationCategory::NoActionRequired);
        assert_eq!(outputs[0].recommended_medication, Some(MedicationReference::Carvedilol));
    }

    #[test]
    fn carvedilol_allergy_falls_back_to_metoprolol() {
        let input = RecommendationInput {
            contraindications: vec![AllergyIntolerance::new(AllergyType::Allergy, None, &["294297007"])],
            vitals: stable_vitals(),
            ..Default::default()
        };
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs[0].category, RecommendationCategory::NotStarted);
        assert_eq!(outputs[0].recommended_medication, Some(MedicationReference::MetoprololSuccinate));
    }

    #[test]
    fn clinician_listed_class_skips_allergic_medication() {
        let input = RecommendationInput {
            contraindications: vec![
                AllergyIntolerance::new(AllergyType::Financial, None, &["293962009"]),
                AllergyIntolerance::new(AllergyType::Allergy, Some(AllergyCriticality::High), &["294297007"]),
            ],
            vitals: stable_vitals(),
            ..Default::default()
        };
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].category, RecommendationCategory::NoActionRequired);
        assert_eq!(outputs[0].recommended_medication, Some(MedicationReference::MetoprololSuccinate));
    }

    #[test]
    fn every_preferred_medication_allergic_gives_nothing() {
        let classifier = classifier_with(&[
            ("test-metoprolol", MedicationReference::MetoprololSuccinate),
            ("test-bisoprolol", MedicationReference::Bisoprolol),
        ]);
        let allergic = |code: &str| AllergyIntolerance::new(AllergyType::Allergy, Some(AllergyCriticality::High), &[code]);
        let mut input = RecommendationInput {
            contraindications: vec![
                allergic("294297007"),
                allergic("test-metoprolol"),
                allergic("test-bisoprolol"),
            ],
            vitals: stable_vitals(),
            ..Default::default()
        };
        assert!(compute(&input, &classifier).unwrap().is_empty());

        // A clinician-listed class record does not reopen a blocked medication.
        input
            .contraindications
            .push(AllergyIntolerance::new(AllergyType::Preference, None, &["293962009"]));
        assert!(compute(&input, &classifier).unwrap().is_empty());
    }

    #[test]
    fn initiation_needs_vitals() {
        let input = RecommendationInput::default();
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs[0].category, RecommendationCategory::MorePatientObservationsRequired);
    }

    #[test]
    fn initiation_held_for_bradycardia() {
        let mut input = RecommendationInput {
            vitals: stable_vitals(),
            ..Default::default()
        };
        input.vitals.heart_rate = series(&[55.0, 58.0, 61.0]);
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs[0].category, RecommendationCategory::NoActionRequired);
    }

    // ── titration ────────────────────────────────────────────────────────────

    #[test]
    fn improvement_available_below_target() {
        assert_eq!(category_of(&titrating(|_| {})), RecommendationCategory::ImprovementAvailable);
    }

    #[test]
    fn target_dose_reached_short_circuits_gates() {
        let input = titrating(|input| {
            input.requests = vec![request(MedicationReference::Carvedilol, 25.0, 2.0)];
            input.vitals.systolic_blood_pressure.clear();
        });
        assert_eq!(category_of(&input), RecommendationCategory::TargetDoseReached);
    }

    #[test]
    fn too_few_systolic_readings() {
        let input = titrating(|input| {
            input.vitals.systolic_blood_pressure = series(&[120.0, 121.0]);
        });
        assert_eq!(category_of(&input), RecommendationCategory::MorePatientObservationsRequired);
    }

    #[test]
    fn low_systolic_is_personal_target() {
        let input = titrating(|input| {
            input.vitals.systolic_blood_pressure = series(&[95.0, 98.0, 104.0]);
        });
        assert_eq!(category_of(&input), RecommendationCategory::PersonalTargetDoseReached);
    }

    #[test]
    fn systolic_gate_runs_before_heart_rate_gate() {
        let input = titrating(|input| {
            input.vitals.systolic_blood_pressure = series(&[95.0, 98.0, 90.0]);
            input.vitals.heart_rate.clear();
        });
        assert_eq!(category_of(&input), RecommendationCategory::PersonalTargetDoseReached);
    }

    #[test]
    fn missing_heart_rate() {
        let input = titrating(|input| input.vitals.heart_rate.clear());
        assert_eq!(category_of(&input), RecommendationCategory::MorePatientObservationsRequired);
    }

    #[test]
    fn low_heart_rate_is_personal_target() {
        let input = titrating(|input| {
            input.vitals.heart_rate = series(&[58.0, 59.0, 64.0]);
        });
        assert_eq!(category_of(&input), RecommendationCategory::PersonalTargetDoseReached);
    }

    #[test]
    fn dizziness_stops_titration() {
        let dizzy = titrating(|input| input.latest_symptom_score = Some(symptom_score(3.0)));
        assert_eq!(category_of(&dizzy), RecommendationCategory::PersonalTargetDoseReached);

        let steady = titrating(|input| input.latest_symptom_score = Some(symptom_score(2.0)));
        assert_eq!(category_of(&steady), RecommendationCategory::ImprovementAvailable);
    }

    #[test]
    fn output_carries_current_requests() {
        let input = titrating(|_| {});
        let outputs = compute(&input, &classifier()).unwrap();
        assert_eq!(outputs[0].current_medication, input.requests);
        assert_eq!(outputs[0].recommended_medication, None);
    }

    #[test]
    fn missing_target_dose_propagates() {
        let input = titrating(|input| input.requests[0].target_daily_dose = None);
        assert!(matches!(
            compute(&input, &classifier()),
            Err(EngineError::MissingTargetDailyDose { .. })
        ));
    }
}
