//! Medication, drug and request types.
//!
//! References serialize to the document paths used by the reference data
//! (`medicationClasses/<slug>`, `medications/<rxcui>`,
//! `medications/<rxcui>/drugs/<rxcui>`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven therapeutic classes the engine reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MedicationClassReference {
    #[serde(rename = "medicationClasses/beta-blockers")]
    BetaBlockers,
    #[serde(rename = "medicationClasses/sglt2-inhibitors")]
    Sglt2Inhibitors,
    #[serde(rename = "medicationClasses/mineralocorticoid-receptor-antagonists")]
    MineralocorticoidReceptorAntagonists,
    #[serde(rename = "medicationClasses/angiotensin-converting-enzyme-inhibitors")]
    AngiotensinConvertingEnzymeInhibitors,
    #[serde(rename = "medicationClasses/angiotensin-receptor-blockers")]
    AngiotensinReceptorBlockers,
    #[serde(rename = "medicationClasses/angiotensin-receptor-neprilysin-inhibitors")]
    AngiotensinReceptorNeprilysinInhibitors,
    #[serde(rename = "medicationClasses/diuretics")]
    Diuretics,
}

impl MedicationClassReference {
    pub const ALL: [MedicationClassReference; 7] = [
        Self::BetaBlockers,
        Self::Sglt2Inhibitors,
        Self::MineralocorticoidReceptorAntagonists,
        Self::AngiotensinConvertingEnzymeInhibitors,
        Self::AngiotensinReceptorBlockers,
        Self::AngiotensinReceptorNeprilysinInhibitors,
        Self::Diuretics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BetaBlockers => "medicationClasses/beta-blockers",
            Self::Sglt2Inhibitors => "medicationClasses/sglt2-inhibitors",
            Self::MineralocorticoidReceptorAntagonists => {
                "medicationClasses/mineralocorticoid-receptor-antagonists"
            }
            Self::AngiotensinConvertingEnzymeInhibitors => {
                "medicationClasses/angiotensin-converting-enzyme-inhibitors"
            }
            Self::AngiotensinReceptorBlockers => "medicationClasses/angiotensin-receptor-blockers",
            Self::AngiotensinReceptorNeprilysinInhibitors => {
                "medicationClasses/angiotensin-receptor-neprilysin-inhibitors"
            }
            Self::Diuretics => "medicationClasses/diuretics",
        }
    }
}

impl fmt::Display for MedicationClassReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generic medication, identified by its RxNorm ingredient code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MedicationReference {
    // Beta blockers
    #[serde(rename = "medications/20352")]
    Carvedilol,
    #[serde(rename = "medications/6918")]
    MetoprololSuccinate,
    #[serde(rename = "medications/19484")]
    Bisoprolol,

    // SGLT2 inhibitors
    #[serde(rename = "medications/1488564")]
    Dapagliflozin,
    #[serde(rename = "medications/1545653")]
    Empagliflozin,
    #[serde(rename = "medications/2638675")]
    Sotagliflozin,

    // Mineralocorticoid receptor antagonists
    #[serde(rename = "medications/9997")]
    Spironolactone,
    #[serde(rename = "medications/298869")]
    Eplerenone,

    // ACE inhibitors
    #[serde(rename = "medications/35208")]
    Quinapril,
    #[serde(rename = "medications/54552")]
    Perindopril,
    #[serde(rename = "medications/35296")]
    Ramipril,
    #[serde(rename = "medications/18867")]
    Benazepril,
    #[serde(rename = "medications/1998")]
    Captopril,
    #[serde(rename = "medications/3827")]
    Enalapril,
    #[serde(rename = "medications/29046")]
    Lisinopril,
    #[serde(rename = "medications/50166")]
    Fosinopril,
    #[serde(rename = "medications/38454")]
    Trandolapril,

    // Angiotensin receptor blockers
    #[serde(rename = "medications/52175")]
    Losartan,
    #[serde(rename = "medications/69749")]
    Valsartan,
    #[serde(rename = "medications/214354")]
    Candesartan,
    #[serde(rename = "medications/83818")]
    Irbesartan,
    #[serde(rename = "medications/73494")]
    Telmisartan,
    #[serde(rename = "medications/321064")]
    Olmesartan,

    // ARNI
    #[serde(rename = "medications/1656339")]
    SacubitrilValsartan,

    // Loop diuretics
    #[serde(rename = "medications/4603")]
    Furosemide,
    #[serde(rename = "medications/1808")]
    Bumetanide,
    #[serde(rename = "medications/38413")]
    Torsemide,
}

impl MedicationReference {
    /// The RxNorm ingredient code backing this reference.
    pub fn rxcui(&self) -> &'static str {
        match self {
            Self::Carvedilol => "20352",
            Self::MetoprololSuccinate => "6918",
            Self::Bisoprolol => "19484",
            Self::Dapagliflozin => "1488564",
            Self::Empagliflozin => "1545653",
            Self::Sotagliflozin => "2638675",
            Self::Spironolactone => "9997",
            Self::Eplerenone => "298869",
            Self::Quinapril => "35208",
            Self::Perindopril => "54552",
            Self::Ramipril => "35296",
            Self::Benazepril => "18867",
            Self::Captopril => "1998",
            Self::Enalapril => "3827",
            Self::Lisinopril => "29046",
            Self::Fosinopril => "50166",
            Self::Trandolapril => "38454",
            Self::Losartan => "52175",
            Self::Valsartan => "69749",
            Self::Candesartan => "214354",
            Self::Irbesartan => "83818",
            Self::Telmisartan => "73494",
            Self::Olmesartan => "321064",
            Self::SacubitrilValsartan => "1656339",
            Self::Furosemide => "4603",
            Self::Bumetanide => "1808",
            Self::Torsemide => "38413",
        }
    }

    /// The therapeutic class this medication belongs to.
    pub fn class(&self) -> MedicationClassReference {
        use MedicationClassReference as C;
        match self {
            Self::Carvedilol | Self::MetoprololSuccinate | Self::Bisoprolol => C::BetaBlockers,
            Self::Dapagliflozin | Self::Empagliflozin | Self::Sotagliflozin => C::Sglt2Inhibitors,
            Self::Spironolactone | Self::Eplerenone => C::MineralocorticoidReceptorAntagonists,
            Self::Quinapril
            | Self::Perindopril
            | Self::Ramipril
            | Self::Benazepril
            | Self::Captopril
            | Self::Enalapril
            | Self::Lisinopril
            | Self::Fosinopril
            | Self::Trandolapril => C::AngiotensinConvertingEnzymeInhibitors,
            Self::Losartan
            | Self::Valsartan
            | Self::Candesartan
            | Self::Irbesartan
            | Self::Telmisartan
            | Self::Olmesartan => C::AngiotensinReceptorBlockers,
            Self::SacubitrilValsartan => C::AngiotensinReceptorNeprilysinInhibitors,
            Self::Furosemide | Self::Bumetanide | Self::Torsemide => C::Diuretics,
        }
    }
}

impl fmt::Display for MedicationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "medications/{}", self.rxcui())
    }
}

/// A specific strength and form of a medication.
///
/// Example: DrugReference("medications/20352/drugs/200031")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrugReference(pub String);

impl DrugReference {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl fmt::Display for DrugReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of a dosage instruction: `frequency` administrations per day,
/// each taking the listed `quantity` of units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseSchedule {
    pub frequency: f64,
    pub quantity: Vec<f64>,
}

impl DoseSchedule {
    pub fn new(frequency: f64, quantity: Vec<f64>) -> Self {
        Self { frequency, quantity }
    }

    /// Units taken per day under this schedule.
    pub fn daily_units(&self) -> f64 {
        self.frequency * self.quantity.iter().sum::<f64>()
    }
}

/// An active ingredient of a drug and its strength in milligrams per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub strength_mg: f64,
}

/// A currently prescribed drug with everything resolved that the
/// recommenders need.
///
/// Built by the caller (or by the reference catalog) before the engine runs.
/// `target_daily_dose` lists the per-ingredient target amounts in mg/day as
/// published for the medication; `None` means no target is on file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequestContext {
    pub drug_reference: DrugReference,
    pub ingredients: Vec<Ingredient>,
    pub medication_reference: MedicationReference,
    pub medication_class_reference: MedicationClassReference,
    #[serde(default)]
    pub target_daily_dose: Option<Vec<f64>>,
    pub schedule: Vec<DoseSchedule>,
}
