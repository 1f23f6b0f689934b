//! Drug-class recommenders.
//!
//! Each recommender is a pure function with the [`Recommender`] signature.
//! It returns exactly one output, or an empty list when the class is blocked
//! (allergy, intolerance, or a hard lab cutoff). The shape is the same for
//! every class:
//!
//!   active request → target reached? → safety gates in order → improvement
//!   no request     → contraindication → safety gates in order → not started
//!
//! The first gate that lacks data or finds an unsafe value decides the
//! category; later gates are not evaluated.

use gdmt_contracts::{
    error::EngineResult,
    recommendation::{RecommendationInput, RecommendationOutput},
};

use crate::contraindication::ContraindicationClassifier;

pub mod base;
pub mod beta_blocker;
pub mod diuretic;
pub mod mra;
pub mod rasi;
pub mod sglt2;

/// The common signature of every drug-class recommender.
pub type Recommender =
    fn(&RecommendationInput, &ContraindicationClassifier) -> EngineResult<Vec<RecommendationOutput>>;
