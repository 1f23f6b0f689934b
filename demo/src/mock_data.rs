//! Fictional patients for the `run-all` demo.
//!
//! Every observation is dated relative to the time the demo runs, so lab
//! freshness and the two-week vitals window behave the same on every run.
//! Medication requests are resolved through the catalog exactly as a caller
//! would resolve stored prescriptions.

use std::collections::HashMap;

use chrono::{Duration, Utc};

use gdmt_catalog::Catalog;
use gdmt_contracts::{
    allergy::{AllergyCriticality, AllergyIntolerance, AllergyType},
    error::EngineResult,
    medication::{DoseSchedule, DrugReference, MedicationRequestContext},
    observation::{Observation, Vitals},
    recommendation::RecommendationInput,
    symptom::SymptomScore,
};
use gdmt_symptoms::{calculate, KccqItem, SymptomAnswers};

pub struct MockPatient {
    pub id: &'static str,
    pub summary: &'static str,
    pub input: RecommendationInput,
}

// ── Builders ──────────────────────────────────────────────────────────────────

fn observed(days_ago: i64, value: f64) -> Observation {
    Observation::new(Utc::now() - Duration::days(days_ago), value)
}

/// One reading per day, the first taken today.
fn daily(values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(day, value)| observed(day as i64, *value))
        .collect()
}

fn vitals(systolic: &[f64], heart_rate: &[f64], labs_days_ago: i64) -> Vitals {
    Vitals {
        systolic_blood_pressure: daily(systolic),
        diastolic_blood_pressure: daily(&[78.0, 80.0, 76.0, 79.0]),
        heart_rate: daily(heart_rate),
        creatinine: Some(observed(labs_days_ago, 1.1)),
        potassium: Some(observed(labs_days_ago, 4.2)),
        estimated_glomerular_filtration_rate: Some(observed(labs_days_ago, 58.0)),
        dry_weight: Some(observed(20, 82.5)),
    }
}

fn prescribe(
    catalog: &Catalog,
    drug: &str,
    frequency: f64,
) -> EngineResult<MedicationRequestContext> {
    catalog.resolve_request(
        &DrugReference::new(drug),
        vec![DoseSchedule::new(frequency, vec![1.0])],
    )
}

/// Score a KCCQ-12 submission given as the 13 answers in questionnaire order.
fn kccq(values: [f64; 13]) -> EngineResult<SymptomScore> {
    let raw: HashMap<String, f64> = KccqItem::ALL
        .iter()
        .zip(values)
        .map(|(item, value)| (item.link_id().to_string(), value))
        .collect();
    Ok(calculate(&SymptomAnswers::from_raw(&raw)?))
}

// ── Patients ──────────────────────────────────────────────────────────────────

pub fn mock_patients(catalog: &Catalog) -> EngineResult<Vec<MockPatient>> {
    let stable_bp = [122.0, 118.0, 125.0, 120.0];
    let stable_hr = [72.0, 70.0, 74.0, 71.0];

    Ok(vec![
        MockPatient {
            id: "hf-001",
            summary: "newly diagnosed, no GDMT, stable vitals and fresh labs",
            input: RecommendationInput {
                vitals: vitals(&stable_bp, &stable_hr, 4),
                ..Default::default()
            },
        },
        MockPatient {
            id: "hf-002",
            summary: "low-dose carvedilol, lisinopril and spironolactone, on furosemide",
            input: RecommendationInput {
                requests: vec![
                    prescribe(catalog, "medications/20352/drugs/200031", 2.0)?,
                    prescribe(catalog, "medications/29046/drugs/314076", 1.0)?,
                    prescribe(catalog, "medications/9997/drugs/313096", 1.0)?,
                    prescribe(catalog, "medications/4603/drugs/313988", 1.0)?,
                ],
                vitals: vitals(&stable_bp, &stable_hr, 10),
                latest_symptom_score: Some(kccq([
                    4.0, 3.0, 4.0, 3.0, 5.0, 4.0, 3.0, 4.0, 4.0, 4.0, 6.0, 3.0, 1.0,
                ])?),
                ..Default::default()
            },
        },
        MockPatient {
            id: "hf-003",
            summary: "sacubitril/valsartan mid dose, soft blood pressure, dizzy",
            input: RecommendationInput {
                requests: vec![
                    prescribe(catalog, "medications/1656339/drugs/1656354", 2.0)?,
                    prescribe(catalog, "medications/6918/drugs/866436", 1.0)?,
                    prescribe(catalog, "medications/1545653/drugs/1545658", 1.0)?,
                ],
                vitals: vitals(&[98.0, 94.0, 101.0, 96.0], &stable_hr, 45),
                latest_symptom_score: Some(kccq([
                    3.0, 2.0, 2.0, 2.0, 3.0, 3.0, 1.0, 3.0, 3.0, 1.0, 1.0, 2.0, 4.0,
                ])?),
                ..Default::default()
            },
        },
        MockPatient {
            id: "hf-004",
            summary: "beta-blocker allergy, reduced kidney function, stale labs",
            input: RecommendationInput {
                contraindications: vec![
                    AllergyIntolerance::new(
                        AllergyType::Allergy,
                        Some(AllergyCriticality::High),
                        &["293962009"],
                    ),
                    AllergyIntolerance::new(AllergyType::Preference, None, &["1255026006"]),
                ],
                vitals: Vitals {
                    estimated_glomerular_filtration_rate: Some(observed(60, 18.0)),
                    ..vitals(&stable_bp, &stable_hr, 60)
                },
                ..Default::default()
            },
        },
        MockPatient {
            id: "hf-005",
            summary: "carvedilol request imported without a dosage schedule",
            input: RecommendationInput {
                requests: vec![catalog.resolve_request(
                    &DrugReference::new("medications/20352/drugs/200032"),
                    Vec::new(),
                )?],
                vitals: vitals(&stable_bp, &stable_hr, 4),
                ..Default::default()
            },
        },
    ])
}
