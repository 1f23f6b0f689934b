//! Builders shared by the unit tests in this crate.

use chrono::{DateTime, Duration, Utc};

use gdmt_catalog::Catalog;
use gdmt_contracts::{
    allergy::ContraindicationTarget,
    medication::{DoseSchedule, DrugReference, Ingredient, MedicationReference, MedicationRequestContext},
    observation::{Observation, Vitals},
    symptom::SymptomScore,
};

use crate::contraindication::ContraindicationClassifier;

pub(crate) fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

pub(crate) fn obs(days: i64, value: f64) -> Observation {
    Observation::new(days_ago(days), value)
}

/// One reading per day, the first taken today.
pub(crate) fn series(values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(day, value)| obs(day as i64, *value))
        .collect()
}

pub(crate) fn classifier() -> ContraindicationClassifier {
    ContraindicationClassifier::from_catalog(&Catalog::builtin().unwrap())
}

/// The builtin code table plus one extra code per listed medication.
pub(crate) fn classifier_with(codes: &[(&str, MedicationReference)]) -> ContraindicationClassifier {
    let mut table = Catalog::builtin().unwrap().contraindication_table().clone();
    for (code, medication) in codes {
        table.insert(code.to_string(), vec![ContraindicationTarget::Medication(*medication)]);
    }
    ContraindicationClassifier::new(table)
}

/// A request for one unit of `strength_mg`, `frequency` times a day, with the
/// medication's target dose taken from the builtin catalog.
pub(crate) fn request(
    medication: MedicationReference,
    strength_mg: f64,
    frequency: f64,
) -> MedicationRequestContext {
    let catalog = Catalog::builtin().unwrap();
    MedicationRequestContext {
        drug_reference: DrugReference::new(format!("{}/drugs/test", medication)),
        ingredients: vec![Ingredient {
            name: format!("{:?}", medication).to_lowercase(),
            strength_mg,
        }],
        medication_reference: medication,
        medication_class_reference: medication.class(),
        target_daily_dose: catalog
            .medication(medication)
            .and_then(|entry| entry.target_daily_dose.clone()),
        schedule: vec![DoseSchedule::new(frequency, vec![1.0])],
    }
}

/// Vitals and labs that pass every safety gate.
pub(crate) fn stable_vitals() -> Vitals {
    Vitals {
        systolic_blood_pressure: series(&[120.0, 118.0, 124.0]),
        diastolic_blood_pressure: series(&[78.0, 80.0, 76.0]),
        heart_rate: series(&[72.0, 70.0, 75.0]),
        creatinine: Some(obs(3, 1.1)),
        potassium: Some(obs(3, 4.2)),
        estimated_glomerular_filtration_rate: Some(obs(3, 60.0)),
        dry_weight: Some(obs(10, 80.0)),
    }
}

pub(crate) fn symptom_score(dizziness: f64) -> SymptomScore {
    SymptomScore {
        overall_score: 60.0,
        physical_limits_score: Some(50.0),
        symptom_frequency_score: Some(60.0),
        social_limits_score: Some(55.0),
        quality_of_life_score: Some(75.0),
        dizziness_score: dizziness,
    }
}
