//! Vital signs and laboratory observations.
//!
//! Units are normalized by the caller before observations reach the engine:
//! blood pressure in mmHg, heart rate in bpm, creatinine in mg/dL,
//! potassium in mEq/L, eGFR in mL/min/1.73m² and weight in kg.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single dated measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl Observation {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }
}

/// Everything the recommenders know about a patient's measurements.
///
/// Series fields hold the history fetched by the caller; single fields hold
/// the latest lab value only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    #[serde(default)]
    pub systolic_blood_pressure: Vec<Observation>,
    #[serde(default)]
    pub diastolic_blood_pressure: Vec<Observation>,
    #[serde(default)]
    pub heart_rate: Vec<Observation>,
    #[serde(default)]
    pub creatinine: Option<Observation>,
    #[serde(default)]
    pub potassium: Option<Observation>,
    #[serde(default)]
    pub estimated_glomerular_filtration_rate: Option<Observation>,
    #[serde(default)]
    pub dry_weight: Option<Observation>,
}
