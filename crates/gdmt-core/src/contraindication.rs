//! Contraindication classifier.
//!
//! Maps a patient's allergy and intolerance records to a
//! `ContraindicationCategory` for one medication or medication class.
//!
//! Classification algorithm:
//!
//! 1. For every record, look each SNOMED code up in the code table.
//! 2. A record matches when any of its codes references the target. For a
//!    medication target, a code referencing the medication's class matches
//!    too.
//! 3. A matching record scores `SevereAllergyIntolerance` when its
//!    criticality is high, `AllergyIntolerance` for allergy or intolerance
//!    records, and `ClinicianListed` for financial or preference records.
//! 4. The result is the maximum over all matching records, `None` if no
//!    record matches. Taking the maximum makes the result independent of
//!    record order.

use std::collections::HashMap;

use tracing::debug;

use gdmt_catalog::Catalog;
use gdmt_contracts::{
    allergy::{
        AllergyCriticality, AllergyIntolerance, AllergyType, ContraindicationCategory,
        ContraindicationTarget,
    },
    medication::MedicationReference,
};

/// Classifies allergy records against a fixed SNOMED code table.
#[derive(Debug, Clone, Default)]
pub struct ContraindicationClassifier {
    codes: HashMap<String, Vec<ContraindicationTarget>>,
}

impl ContraindicationClassifier {
    pub fn new(codes: HashMap<String, Vec<ContraindicationTarget>>) -> Self {
        Self { codes }
    }

    /// Build a classifier over the catalog's contraindication codes.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.contraindication_table().clone())
    }

    /// Classify `allergies` against a medication or medication class.
    pub fn classify(
        &self,
        allergies: &[AllergyIntolerance],
        target: impl Into<ContraindicationTarget>,
    ) -> ContraindicationCategory {
        let target = target.into();
        let category = allergies
            .iter()
            .filter(|record| self.references(record, target))
            .map(record_category)
            .max()
            .unwrap_or_default();

        debug!(target = %target, category = ?category, "classified contraindications");
        category
    }

    /// The first of `candidates` with no contraindication at all.
    pub fn find_eligible_medication(
        &self,
        allergies: &[AllergyIntolerance],
        candidates: &[MedicationReference],
    ) -> Option<MedicationReference> {
        candidates
            .iter()
            .copied()
            .find(|medication| self.classify(allergies, *medication) == ContraindicationCategory::None)
    }

    /// The first of `candidates` that is not blocked by an allergy or
    /// intolerance. Clinician-listed restrictions do not exclude a candidate.
    pub fn find_suggestable_medication(
        &self,
        allergies: &[AllergyIntolerance],
        candidates: &[MedicationReference],
    ) -> Option<MedicationReference> {
        candidates
            .iter()
            .copied()
            .find(|medication| !self.classify(allergies, *medication).blocks_recommendation())
    }

    fn references(&self, record: &AllergyIntolerance, target: ContraindicationTarget) -> bool {
        record.codes.iter().any(|code| {
            self.codes
                .get(code)
                .is_some_and(|targets| targets.iter().any(|t| covers(*t, target)))
        })
    }
}

/// True if a code referencing `listed` restricts `target`.
fn covers(listed: ContraindicationTarget, target: ContraindicationTarget) -> bool {
    match (listed, target) {
        (listed, target) if listed == target => true,
        (ContraindicationTarget::Class(class), ContraindicationTarget::Medication(medication)) => {
            medication.class() == class
        }
        _ => false,
    }
}

fn record_category(record: &AllergyIntolerance) -> ContraindicationCategory {
    if record.criticality == Some(AllergyCriticality::High) {
        return ContraindicationCategory::SevereAllergyIntolerance;
    }
    match record.allergy_type {
        AllergyType::Allergy | AllergyType::Intolerance => ContraindicationCategory::AllergyIntolerance,
        AllergyType::Financial | AllergyType::Preference => ContraindicationCategory::ClinicianListed,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
