//! Loop diuretic recommender.
//!
//! Diuretics are dosed for congestion, not titrated to a guideline target,
//! so an existing request is always held at its personal target and nothing
//! is suggested for patients who are not on one.

use tracing::debug;

use gdmt_contracts::{
    error::EngineResult,
    medication::MedicationClassReference,
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

use super::base::{find_current_requests, recommend};

const CLASS: MedicationClassReference = MedicationClassReference::Diuretics;

pub fn compute(
    input: &RecommendationInput,
    _classifier: &ContraindicationClassifier,
) -> EngineResult<Vec<RecommendationOutput>> {
    let current = find_current_requests(&input.requests, &[CLASS]);
    if current.is_empty() {
        debug!(class = %CLASS, "no active request, nothing to recommend");
        return Ok(Vec::new());
    }
    Ok(recommend(current, None, RecommendationCategory::PersonalTargetDoseReached))
}
