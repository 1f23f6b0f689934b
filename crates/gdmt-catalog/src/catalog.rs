//! TOML-driven reference catalog.
//!
//! `Catalog` loads a `CatalogConfig` from a TOML string or file and indexes
//! it into plain lookup maps. It is built once at startup and only read
//! afterwards, so it can be shared freely between threads.
//!
//! Load-time checks:
//!
//! 1. No medication, drug or code appears twice.
//! 2. Every drug names a medication that is in the catalog.
//! 3. Every drug has at least one ingredient with a positive strength.

use std::{
    collections::{hash_map::Entry, HashMap},
    path::Path,
};

use tracing::{debug, warn};

use gdmt_contracts::{
    allergy::ContraindicationTarget,
    error::{EngineError, EngineResult},
    medication::{DoseSchedule, DrugReference, MedicationReference, MedicationRequestContext},
};

use crate::entry::{CatalogConfig, DrugEntry, MedicationEntry};

/// Reference data shipped with the engine.
const BUILTIN_CATALOG: &str = include_str!("../catalog/default.toml");

/// Indexed medication, drug and contraindication-code tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    medications: HashMap<MedicationReference, MedicationEntry>,
    drugs: HashMap<DrugReference, DrugEntry>,
    contraindication_codes: HashMap<String, Vec<ContraindicationTarget>>,
}

impl Catalog {
    /// Parse `s` as TOML and build a `Catalog`.
    ///
    /// Returns `EngineError::ConfigError` if the TOML is malformed, does not
    /// match `CatalogConfig`, or fails a load-time check.
    pub fn from_toml_str(s: &str) -> EngineResult<Self> {
        let config: CatalogConfig = toml::from_str(s).map_err(|e| EngineError::ConfigError {
            reason: format!("failed to parse catalog TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a TOML catalog.
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The catalog embedded in this crate.
    pub fn builtin() -> EngineResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Index a deserialized configuration.
    pub fn from_config(config: CatalogConfig) -> EngineResult<Self> {
        let mut catalog = Catalog::default();

        for medication in config.medications {
            let reference = medication.reference;
            if catalog.medications.insert(reference, medication).is_some() {
                return Err(duplicate("medication", &reference.to_string()));
            }
        }

        for drug in config.drugs {
            if !catalog.medications.contains_key(&drug.medication) {
                return Err(EngineError::ConfigError {
                    reason: format!(
                        "drug '{}' references unknown medication '{}'",
                        drug.reference, drug.medication
                    ),
                });
            }
            if drug.ingredients.is_empty() || drug.ingredients.iter().any(|i| i.strength_mg <= 0.0) {
                return Err(EngineError::ConfigError {
                    reason: format!("drug '{}' has no usable ingredient strength", drug.reference),
                });
            }
            match catalog.drugs.entry(drug.reference.clone()) {
                Entry::Occupied(_) => return Err(duplicate("drug", &drug.reference.0)),
                Entry::Vacant(slot) => {
                    slot.insert(drug);
                }
            }
        }

        for entry in config.contraindication_codes {
            if entry.targets.is_empty() {
                warn!(code = %entry.code, "contraindication code has no targets");
            }
            match catalog.contraindication_codes.entry(entry.code.clone()) {
                Entry::Occupied(_) => return Err(duplicate("contraindication code", &entry.code)),
                Entry::Vacant(slot) => {
                    slot.insert(entry.targets);
                }
            }
        }

        debug!(
            medications = catalog.medications.len(),
            drugs = catalog.drugs.len(),
            codes = catalog.contraindication_codes.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    pub fn medication(&self, reference: MedicationReference) -> Option<&MedicationEntry> {
        self.medications.get(&reference)
    }

    pub fn drug(&self, reference: &DrugReference) -> Option<&DrugEntry> {
        self.drugs.get(reference)
    }

    /// All drugs of `medication`, weakest first.
    pub fn drugs_for(&self, medication: MedicationReference) -> Vec<&DrugEntry> {
        let mut drugs: Vec<&DrugEntry> =
            self.drugs.values().filter(|d| d.medication == medication).collect();
        drugs.sort_by(|a, b| total_strength(a).total_cmp(&total_strength(b)));
        drugs
    }

    /// The next stronger drug of the same medication, `None` at the top
    /// strength or for an unknown drug.
    pub fn next_strength(&self, drug: &DrugReference) -> Option<&DrugEntry> {
        let current = self.drug(drug)?;
        let strength = total_strength(current);
        self.drugs_for(current.medication)
            .into_iter()
            .find(|candidate| total_strength(candidate) > strength)
    }

    /// The full code table, for callers that want their own copy.
    pub fn contraindication_table(&self) -> &HashMap<String, Vec<ContraindicationTarget>> {
        &self.contraindication_codes
    }

    /// Resolve a prescribed drug and its dosage schedule into the context the
    /// recommenders work on.
    ///
    /// Returns `EngineError::UnknownReference` if the drug (or its medication)
    /// is not in the catalog.
    pub fn resolve_request(
        &self,
        drug: &DrugReference,
        schedule: Vec<DoseSchedule>,
    ) -> EngineResult<MedicationRequestContext> {
        let drug_entry = self.drug(drug).ok_or_else(|| EngineError::UnknownReference {
            reference: drug.to_string(),
        })?;
        let medication = self
            .medication(drug_entry.medication)
            .ok_or_else(|| EngineError::UnknownReference {
                reference: drug_entry.medication.to_string(),
            })?;

        Ok(MedicationRequestContext {
            drug_reference: drug_entry.reference.clone(),
            ingredients: drug_entry.ingredients.iter().map(Into::into).collect(),
            medication_reference: medication.reference,
            medication_class_reference: medication.reference.class(),
            target_daily_dose: medication.target_daily_dose.clone(),
            schedule,
        })
    }
}

fn total_strength(drug: &DrugEntry) -> f64 {
    drug.ingredients.iter().map(|i| i.strength_mg).sum()
}

fn duplicate(kind: &str, key: &str) -> EngineError {
    EngineError::ConfigError {
        reason: format!("duplicate {} '{}' in catalog", kind, key),
    }
}
