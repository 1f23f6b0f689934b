//! Allergy and intolerance records and the contraindication scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::medication::{MedicationClassReference, MedicationReference};

/// What kind of restriction a record documents.
///
/// `Financial` and `Preference` are listed by the clinician rather than
/// observed reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllergyType {
    Allergy,
    Intolerance,
    Financial,
    Preference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllergyCriticality {
    Low,
    High,
    UnableToAssess,
}

/// A documented allergy, intolerance or prescribing restriction.
///
/// `codes` are SNOMED CT concept identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergyIntolerance {
    #[serde(rename = "type")]
    pub allergy_type: AllergyType,
    #[serde(default)]
    pub criticality: Option<AllergyCriticality>,
    pub codes: Vec<String>,
}

impl AllergyIntolerance {
    pub fn new(allergy_type: AllergyType, criticality: Option<AllergyCriticality>, codes: &[&str]) -> Self {
        Self {
            allergy_type,
            criticality,
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// How strongly the record set restricts a medication or class.
///
/// Variants are declared in ascending severity, so the derived `Ord` is the
/// total order used to resolve several matching records: highest wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ContraindicationCategory {
    #[default]
    None,
    ClinicianListed,
    AllergyIntolerance,
    SevereAllergyIntolerance,
}

impl ContraindicationCategory {
    /// True for the categories that suppress a recommendation entirely.
    pub fn blocks_recommendation(&self) -> bool {
        matches!(self, Self::AllergyIntolerance | Self::SevereAllergyIntolerance)
    }
}

/// What a contraindication code refers to: one medication or a whole class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContraindicationTarget {
    Medication(MedicationReference),
    Class(MedicationClassReference),
}

impl From<MedicationReference> for ContraindicationTarget {
    fn from(medication: MedicationReference) -> Self {
        Self::Medication(medication)
    }
}

impl From<MedicationClassReference> for ContraindicationTarget {
    fn from(class: MedicationClassReference) -> Self {
        Self::Class(class)
    }
}

impl fmt::Display for ContraindicationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medication(medication) => fmt::Display::fmt(medication, f),
            Self::Class(class) => fmt::Display::fmt(class, f),
        }
    }
}
