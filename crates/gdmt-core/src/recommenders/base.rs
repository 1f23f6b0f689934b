//! Helpers shared by every drug-class recommender.
//!
//! All functions are pure. The ones that look at observation dates compute
//! their cutoff from the system clock once per call.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use gdmt_contracts::{
    allergy::AllergyIntolerance,
    error::{EngineError, EngineResult},
    medication::{MedicationClassReference, MedicationReference, MedicationRequestContext},
    observation::Observation,
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

/// Rolling window for home measurements.
pub const VITALS_WINDOW_DAYS: i64 = 14;

/// Fewest readings a median is computed from.
pub const MIN_MEDIAN_READINGS: usize = 3;

/// Dizziness answer from which titration stops.
pub const DIZZINESS_LIMIT: f64 = 3.0;

/// Requests whose resolved class is one of `classes`, in input order.
pub fn find_current_requests(
    requests: &[MedicationRequestContext],
    classes: &[MedicationClassReference],
) -> Vec<MedicationRequestContext> {
    requests
        .iter()
        .filter(|request| classes.contains(&request.medication_class_reference))
        .cloned()
        .collect()
}

/// Whether the current daily dose has reached the medication's target.
///
/// Requests are grouped by medication. For each group the current dose is
/// the sum over requests of daily units times the drug's total ingredient
/// strength, and the target is the sum of the medication's per-ingredient
/// target amounts. The result is true if any group reaches its target.
///
/// # Errors
///
/// `MissingTargetDailyDose` when a medication has no target on file, and
/// `UnresolvedCurrentDose` when a request has no ingredients, no schedule,
/// or a non-finite dose.
pub fn is_target_daily_dose_reached(requests: &[MedicationRequestContext]) -> EngineResult<bool> {
    let mut groups: Vec<(MedicationReference, Vec<&MedicationRequestContext>)> = Vec::new();
    for request in requests {
        match groups.iter_mut().find(|(medication, _)| *medication == request.medication_reference) {
            Some((_, members)) => members.push(request),
            None => groups.push((request.medication_reference, vec![request])),
        }
    }

    let mut reached = false;
    for (medication, members) in groups {
        let target = target_daily_dose(medication, &members)?;
        let mut current = 0.0;
        for request in members {
            current += current_daily_dose(request)?;
        }
        reached |= current >= target;
    }
    Ok(reached)
}

fn target_daily_dose(
    medication: MedicationReference,
    members: &[&MedicationRequestContext],
) -> EngineResult<f64> {
    members
        .iter()
        .find_map(|request| request.target_daily_dose.as_ref())
        .filter(|amounts| !amounts.is_empty())
        .map(|amounts| amounts.iter().sum::<f64>())
        .ok_or_else(|| EngineError::MissingTargetDailyDose {
            medication: medication.to_string(),
        })
}

fn current_daily_dose(request: &MedicationRequestContext) -> EngineResult<f64> {
    let unresolved = |reason: &str| EngineError::UnresolvedCurrentDose {
        drug: request.drug_reference.to_string(),
        reason: reason.to_string(),
    };

    if request.ingredients.is_empty() {
        return Err(unresolved("drug has no ingredients"));
    }
    if request.schedule.is_empty() {
        return Err(unresolved("request has no dosage schedule"));
    }

    let strength: f64 = request.ingredients.iter().map(|i| i.strength_mg).sum();
    let units: f64 = request.schedule.iter().map(|s| s.daily_units()).sum();
    let dose = strength * units;
    if !dose.is_finite() || dose < 0.0 {
        return Err(unresolved("dose is not a finite, non-negative amount"));
    }
    Ok(dose)
}

/// Median of the observation values, or `None` with fewer than three.
pub fn median_value(observations: &[Observation]) -> Option<f64> {
    if observations.len() < MIN_MEDIAN_READINGS {
        return None;
    }
    let mut values: Vec<f64> = observations.iter().map(|o| o.value).collect();
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Observations dated within the last two weeks.
pub fn observations_in_last_two_weeks(observations: &[Observation]) -> Vec<Observation> {
    observations_since(observations, Utc::now() - Duration::days(VITALS_WINDOW_DAYS))
}

/// Observations dated at or after `cutoff`.
pub fn observations_since(observations: &[Observation], cutoff: DateTime<Utc>) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| o.date >= cutoff)
        .cloned()
        .collect()
}

/// Median of the last two weeks of `observations`.
pub fn recent_median(observations: &[Observation]) -> Option<f64> {
    median_value(&observations_in_last_two_weeks(observations))
}

/// True if the observation is less than `days` old.
pub fn is_recent(observation: &Observation, days: i64) -> bool {
    observation.date > Utc::now() - Duration::days(days)
}

/// How many observations fall strictly below `threshold`, over the whole
/// history.
pub fn count_below(observations: &[Observation], threshold: f64) -> usize {
    observations.iter().filter(|o| o.value < threshold).count()
}

/// True if the latest symptom score reports dizziness at or above the limit.
pub fn is_dizzy(input: &RecommendationInput) -> bool {
    input
        .latest_symptom_score
        .as_ref()
        .is_some_and(|score| score.dizziness_score >= DIZZINESS_LIMIT)
}

/// A single-element recommendation list.
pub fn recommend(
    current_medication: Vec<MedicationRequestContext>,
    recommended_medication: Option<MedicationReference>,
    category: RecommendationCategory,
) -> Vec<RecommendationOutput> {
    vec![RecommendationOutput {
        current_medication,
        recommended_medication,
        category,
    }]
}

/// Name the first candidate not blocked by an allergy or intolerance, without
/// advising to start it. Empty when every candidate is blocked.
pub fn suggest_without_starting(
    classifier: &ContraindicationClassifier,
    allergies: &[AllergyIntolerance],
    candidates: &[MedicationReference],
) -> Vec<RecommendationOutput> {
    match classifier.find_suggestable_medication(allergies, candidates) {
        Some(medication) => recommend(
            Vec::new(),
            Some(medication),
            RecommendationCategory::NoActionRequired,
        ),
        None => {
            info!(candidates = candidates.len(), "every candidate blocked by allergy or intolerance");
            Vec::new()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gdmt_contracts::medication::DoseSchedule;

    use crate::testing::{days_ago, obs, request};

    // ── find_current_requests ────────────────────────────────────────────────

    #[test]
    fn find_current_requests_filters_by_class() {
        let requests = vec![
            request(MedicationReference::Carvedilol, 6.25, 2.0),
            request(MedicationReference::Lisinopril, 10.0, 1.0),
            request(MedicationReference::Losartan, 25.0, 1.0),
        ];

        let found = find_current_requests(
            &requests,
            &[
                MedicationClassReference::AngiotensinConvertingEnzymeInhibitors,
                MedicationClassReference::AngiotensinReceptorBlockers,
            ],
        );
        assert_eq!(found, requests[1..].to_vec());

        let none = find_current_requests(&requests, &[MedicationClassReference::Diuretics]);
        assert!(none.is_empty());
    }

    #[test]
    fn find_current_requests_is_idempotent() {
        let requests = vec![
            request(MedicationReference::Spironolactone, 25.0, 1.0),
            request(MedicationReference::Empagliflozin, 10.0, 1.0),
        ];
        let classes = [MedicationClassReference::MineralocorticoidReceptorAntagonists];
        let once = find_current_requests(&requests, &classes);
        let twice = find_current_requests(&once, &classes);
        assert_eq!(once, twice);
    }

    // ── is_target_daily_dose_reached ─────────────────────────────────────────

    #[test]
    fn target_dose_reached_at_exact_target() {
        // 25 mg twice daily = 50 mg/day, carvedilol target 50 mg/day.
        let at_target = request(MedicationReference::Carvedilol, 25.0, 2.0);
        assert!(is_target_daily_dose_reached(&[at_target]).unwrap());

        let below = request(MedicationReference::Carvedilol, 12.5, 2.0);
        assert!(!is_target_daily_dose_reached(&[below]).unwrap());
    }

    #[test]
    fn target_dose_sums_requests_of_one_medication() {
        let requests = [
            request(MedicationReference::Carvedilol, 12.5, 2.0),
            request(MedicationReference::Carvedilol, 12.5, 2.0),
        ];
        assert!(is_target_daily_dose_reached(&requests).unwrap());
    }

    #[test]
    fn target_dose_sums_combination_ingredients() {
        // 97/103 mg twice daily = 400 mg/day against a 194 + 206 target.
        let mut arni = request(MedicationReference::SacubitrilValsartan, 97.0, 2.0);
        arni.ingredients.push(gdmt_contracts::medication::Ingredient {
            name: "valsartan".to_string(),
            strength_mg: 103.0,
        });
        assert!(is_target_daily_dose_reached(&[arni]).unwrap());
    }

    #[test]
    fn target_dose_is_monotonic_in_quantity() {
        let mut request = request(MedicationReference::MetoprololSuccinate, 50.0, 1.0);
        let mut previous = false;
        for quantity in [1.0, 2.0, 3.0, 4.0, 5.0, 8.0] {
            request.schedule = vec![DoseSchedule::new(1.0, vec![quantity])];
            let reached = is_target_daily_dose_reached(std::slice::from_ref(&request)).unwrap();
            assert!(reached || !previous, "dose reached flipped back at quantity {quantity}");
            previous = reached;
        }
        assert!(previous);
    }

    #[test]
    fn missing_target_dose_is_an_error() {
        let mut request = request(MedicationReference::Furosemide, 40.0, 1.0);
        request.target_daily_dose = None;
        match is_target_daily_dose_reached(&[request]) {
            Err(EngineError::MissingTargetDailyDose { medication }) => {
                assert_eq!(medication, "medications/4603");
            }
            other => panic!("expected MissingTargetDailyDose, got {:?}", other),
        }
    }

    #[test]
    fn missing_schedule_is_an_error() {
        let mut request = request(MedicationReference::Carvedilol, 6.25, 2.0);
        request.schedule.clear();
        assert!(matches!(
            is_target_daily_dose_reached(&[request]),
            Err(EngineError::UnresolvedCurrentDose { .. })
        ));
    }

    // ── median_value ─────────────────────────────────────────────────────────

    #[test]
    fn median_needs_three_readings() {
        assert_eq!(median_value(&[]), None);
        assert_eq!(median_value(&[obs(0, 120.0)]), None);
        assert_eq!(median_value(&[obs(0, 120.0), obs(1, 110.0)]), None);
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        let odd = [obs(0, 130.0), obs(1, 90.0), obs(2, 110.0)];
        assert_eq!(median_value(&odd), Some(110.0));

        let even = [obs(0, 130.0), obs(1, 90.0), obs(2, 110.0), obs(3, 100.0)];
        assert_eq!(median_value(&even), Some(105.0));
    }

    // ── windows ──────────────────────────────────────────────────────────────

    #[test]
    fn two_week_window_drops_older_readings() {
        let observations = [obs(1, 120.0), obs(13, 118.0), obs(15, 90.0), obs(40, 80.0)];
        let recent = observations_in_last_two_weeks(&observations);
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|o| o.value > 100.0));
    }

    #[test]
    fn recent_median_ignores_stale_readings() {
        let observations = [obs(1, 120.0), obs(2, 118.0), obs(20, 90.0), obs(21, 91.0)];
        assert_eq!(recent_median(&observations), None);
    }

    #[test]
    fn is_recent_is_strict() {
        assert!(is_recent(&obs(29, 1.0), 30));
        assert!(!is_recent(&obs(31, 1.0), 30));
        let exactly = gdmt_contracts::observation::Observation::new(days_ago(30), 1.0);
        assert!(!is_recent(&exactly, 30));
    }

    #[test]
    fn count_below_uses_full_history() {
        let observations = [obs(1, 84.0), obs(60, 80.0), obs(2, 85.0), obs(3, 120.0)];
        assert_eq!(count_below(&observations, 85.0), 2);
    }
}
