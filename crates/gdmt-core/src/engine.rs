//! The recommendation engine: runs every drug-class recommender for a patient.
//!
//! Recommenders are independent of each other. Their outputs are concatenated
//! in a fixed class order so the result is stable for a given input:
//!
//!   beta blocker → RASI → MRA → SGLT2 inhibitor → diuretic
//!
//! A data-integrity fault in any recommender fails the whole patient. In a
//! batch the fault is logged and recorded against that patient, and the
//! remaining patients are still evaluated. Faults are never retried: they
//! recur until the underlying record is fixed.

use tracing::{debug, error, info};

use gdmt_catalog::Catalog;
use gdmt_contracts::{
    error::{EngineError, EngineResult},
    recommendation::{RecommendationInput, RecommendationOutput},
};

use crate::{
    contraindication::ContraindicationClassifier,
    recommenders::{beta_blocker, diuretic, mra, rasi, sglt2, Recommender},
};

/// Recommenders in output order.
const RECOMMENDERS: [(&str, Recommender); 5] = [
    ("beta_blocker", beta_blocker::compute),
    ("rasi", rasi::compute),
    ("mra", mra::compute),
    ("sglt2", sglt2::compute),
    ("diuretic", diuretic::compute),
];

// ── Batch results ─────────────────────────────────────────────────────────────

/// Recommendations for one patient in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecommendations {
    pub patient_id: String,
    pub recommendations: Vec<RecommendationOutput>,
}

/// A patient whose input could not be evaluated.
#[derive(Debug)]
pub struct PatientFailure {
    pub patient_id: String,
    pub error: EngineError,
}

/// Outcome of [`RecommendationEngine::compute_batch`], in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<PatientRecommendations>,
    pub failed: Vec<PatientFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Stateless after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    classifier: ContraindicationClassifier,
}

impl RecommendationEngine {
    pub fn new(classifier: ContraindicationClassifier) -> Self {
        Self { classifier }
    }

    /// Build an engine whose classifier uses the catalog's contraindication
    /// codes.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(ContraindicationClassifier::from_catalog(catalog))
    }

    /// Evaluate every drug class for one patient.
    ///
    /// # Errors
    ///
    /// The first data-integrity fault raised by any recommender. Partial
    /// results are discarded.
    pub fn compute(&self, input: &RecommendationInput) -> EngineResult<Vec<RecommendationOutput>> {
        let mut outputs = Vec::new();
        for (name, recommender) in RECOMMENDERS {
            let class_outputs = recommender(input, &self.classifier)?;
            debug!(recommender = name, count = class_outputs.len(), "recommender finished");
            outputs.extend(class_outputs);
        }
        Ok(outputs)
    }

    /// Evaluate a batch of patients independently.
    ///
    /// A failing patient is logged at `error` and collected in
    /// [`BatchReport::failed`]; it does not stop the batch.
    pub fn compute_batch<I, S>(&self, patients: I) -> BatchReport
    where
        I: IntoIterator<Item = (S, RecommendationInput)>,
        S: Into<String>,
    {
        let mut report = BatchReport::default();
        for (patient_id, input) in patients {
            let patient_id = patient_id.into();
            match self.compute(&input) {
                Ok(recommendations) => report.succeeded.push(PatientRecommendations {
                    patient_id,
                    recommendations,
                }),
                Err(e) => {
                    error!(patient_id = %patient_id, error = %e, "patient evaluation failed");
                    report.failed.push(PatientFailure { patient_id, error: e });
                }
            }
        }
        info!(
            total = report.total(),
            failed = report.failed.len(),
            "batch evaluated"
        );
        report
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
