//! Data-integrity error types for the titration engine.
//!
//! Clinical outcomes (missing vitals, stale labs, unsafe values) are never
//! errors; they are `RecommendationCategory` values. Everything in this module
//! signals a defect in reference data or data entry that will recur
//! identically until the underlying record is fixed.

use thiserror::Error;

/// The unified error type for the titration engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request references a medication with no published target daily dose.
    #[error("medication '{medication}' has no target daily dose")]
    MissingTargetDailyDose { medication: String },

    /// The current daily dose of a request could not be computed.
    #[error("current daily dose for drug '{drug}' cannot be resolved: {reason}")]
    UnresolvedCurrentDose { drug: String, reason: String },

    /// A drug or medication reference is not present in the reference catalog.
    #[error("unknown reference '{reference}'")]
    UnknownReference { reference: String },

    /// A required questionnaire item is absent from the response.
    #[error("questionnaire item '{link_id}' is missing")]
    MissingAnswer { link_id: String },

    /// A questionnaire item carries more or fewer than one answer.
    #[error("questionnaire item '{link_id}' has {count} answers, expected exactly one")]
    InvalidAnswerCount { link_id: String, count: usize },

    /// A reference catalog or input document could not be loaded.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the engine crates.
pub type EngineResult<T> = Result<T, EngineError>;
