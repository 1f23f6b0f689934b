//! Catalog entry types and configuration schema.
//!
//! A `CatalogConfig` is deserialized from TOML and holds three flat lists:
//! medications, drugs and contraindication codes. Lists are turned into
//! lookup maps once, when the `Catalog` is built.

use serde::{Deserialize, Serialize};

use gdmt_contracts::{
    allergy::ContraindicationTarget,
    medication::{DrugReference, Ingredient, MedicationReference},
};

/// A generic medication and its published target daily dose.
///
/// Example in TOML:
/// ```toml
/// [[medications]]
/// reference = "medications/20352"
/// name = "Carvedilol"
/// target_daily_dose = [50.0]
/// ```
///
/// Combination products list one target amount per ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub reference: MedicationReference,
    pub name: String,
    /// Omitted for medications without a titration target (loop diuretics).
    #[serde(default)]
    pub target_daily_dose: Option<Vec<f64>>,
}

/// One strength in mg per unit of a drug ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub name: String,
    pub strength_mg: f64,
}

impl From<&IngredientEntry> for Ingredient {
    fn from(entry: &IngredientEntry) -> Self {
        Ingredient {
            name: entry.name.clone(),
            strength_mg: entry.strength_mg,
        }
    }
}

/// A specific strength and form of a medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugEntry {
    pub reference: DrugReference,
    pub medication: MedicationReference,
    pub description: String,
    pub ingredients: Vec<IngredientEntry>,
}

/// A SNOMED CT code and the medications or classes it contraindicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContraindicationCodeEntry {
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub targets: Vec<ContraindicationTarget>,
}

/// The top-level structure deserialized from a TOML catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    #[serde(default)]
    pub drugs: Vec<DrugEntry>,
    #[serde(default)]
    pub contraindication_codes: Vec<ContraindicationCodeEntry>,
}
