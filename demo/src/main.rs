//! GDMT Titration Engine: demo CLI
//!
//! Runs the recommendation engine over bundled mock patients, or over a
//! recommendation input / KCCQ-12 submission read from a JSON file.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- recommend demo/data/patient.json
//!   cargo run -p demo -- score demo/data/kccq.json
//!   cargo run -p demo -- --catalog my-catalog.toml run-all

mod mock_data;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gdmt_catalog::Catalog;
use gdmt_contracts::{
    error::{EngineError, EngineResult},
    recommendation::{RecommendationCategory, RecommendationInput, RecommendationOutput},
};
use gdmt_core::RecommendationEngine;
use gdmt_symptoms::{calculate, QuestionnaireResponse, SymptomAnswers};

// ── CLI definition ────────────────────────────────────────────────────────────

/// GDMT heart-failure medication titration demo.
///
/// Each subcommand evaluates patients with the recommendation engine or scores
/// a symptom questionnaire.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "GDMT titration engine demo",
    long_about = "Computes per-class GDMT recommendations (beta blocker, RASI, MRA,\n\
                  SGLT2 inhibitor, diuretic) and KCCQ-12 symptom scores."
)]
struct Cli {
    /// Reference catalog to use instead of the built-in one.
    #[arg(long, global = true, value_name = "FILE.toml")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate every bundled mock patient as one batch.
    RunAll,
    /// Evaluate a JSON recommendation input and print the outputs as JSON.
    Recommend {
        /// Path to a `RecommendationInput` JSON document.
        path: PathBuf,
    },
    /// Score a KCCQ-12 submission (answer map or questionnaire response).
    Score {
        /// Path to the JSON submission.
        path: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for gate-level output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_catalog(cli.catalog.as_deref()).and_then(|catalog| match cli.command {
        Command::RunAll => {
            print_banner();
            run_all(&catalog)
        }
        Command::Recommend { path } => run_recommend(&catalog, &path),
        Command::Score { path } => run_score(&path),
    });

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn load_catalog(path: Option<&Path>) -> EngineResult<Catalog> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            Catalog::from_file(path)
        }
        None => Catalog::builtin(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> EngineResult<T> {
    let text = std::fs::read_to_string(path).map_err(|e| EngineError::ConfigError {
        reason: format!("failed to read {} '{}': {}", what, path.display(), e),
    })?;
    serde_json::from_str(&text).map_err(|e| EngineError::ConfigError {
        reason: format!("failed to parse {} JSON: {}", what, e),
    })
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_all(catalog: &Catalog) -> EngineResult<()> {
    let engine = RecommendationEngine::from_catalog(catalog);
    let patients = mock_data::mock_patients(catalog)?;

    let summaries: HashMap<&str, &str> = patients.iter().map(|p| (p.id, p.summary)).collect();
    let report = engine.compute_batch(patients.iter().map(|p| (p.id, p.input.clone())));

    for patient in &report.succeeded {
        println!("=== Patient {} ===", patient.patient_id);
        if let Some(summary) = summaries.get(patient.patient_id.as_str()) {
            println!("  {}", summary);
        }
        println!();
        for output in &patient.recommendations {
            print_output(catalog, output);
        }
        println!();
    }

    for failure in &report.failed {
        println!("=== Patient {} ===", failure.patient_id);
        println!("  NOT EVALUATED: {}", failure.error);
        println!();
    }

    println!(
        "{} patients evaluated, {} with data faults.",
        report.total(),
        report.failed.len()
    );
    Ok(())
}

fn run_recommend(catalog: &Catalog, path: &Path) -> EngineResult<()> {
    let input: RecommendationInput = read_json(path, "recommendation input")?;
    let outputs = RecommendationEngine::from_catalog(catalog).compute(&input)?;
    print_json(&outputs)
}

fn run_score(path: &Path) -> EngineResult<()> {
    let document: serde_json::Value = read_json(path, "questionnaire")?;
    let answers = if document.get("items").is_some() {
        let response: QuestionnaireResponse =
            serde_json::from_value(document).map_err(|e| EngineError::ConfigError {
                reason: format!("failed to parse questionnaire response: {}", e),
            })?;
        SymptomAnswers::from_response(&response)?
    } else {
        let raw: HashMap<String, f64> =
            serde_json::from_value(document).map_err(|e| EngineError::ConfigError {
                reason: format!("failed to parse answer map: {}", e),
            })?;
        SymptomAnswers::from_raw(&raw)?
    };
    print_json(&calculate(&answers))
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_output(catalog: &Catalog, output: &RecommendationOutput) {
    let current = if output.current_medication.is_empty() {
        "none".to_string()
    } else {
        output
            .current_medication
            .iter()
            .map(|request| {
                catalog
                    .drug(&request.drug_reference)
                    .map(|drug| drug.description.clone())
                    .unwrap_or_else(|| request.drug_reference.to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    let recommended = output
        .recommended_medication
        .map(|medication| {
            catalog
                .medication(medication)
                .map(|entry| entry.name.clone())
                .unwrap_or_else(|| medication.to_string())
        })
        .unwrap_or_else(|| "-".to_string());

    println!("  {:<28} current: {}", output.category.to_string(), current);
    println!("  {:<28} suggest: {}", "", recommended);

    if output.category == RecommendationCategory::ImprovementAvailable
        && output.recommended_medication.is_none()
    {
        for request in &output.current_medication {
            if let Some(next) = catalog.next_strength(&request.drug_reference) {
                println!("  {:<28} next:    {}", "", next.description);
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> EngineResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| EngineError::ConfigError {
        reason: format!("failed to encode output JSON: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("GDMT Titration Engine");
    println!("Heart-failure recommendation demo");
    println!("=================================");
    println!();
    println!("Recommenders run per patient, in order:");
    println!("  [1] Beta blocker      blood pressure, heart rate, dizziness");
    println!("  [2] RASI              ACEI/ARB → ARNI switch, hypotension, kidney labs");
    println!("  [3] MRA               creatinine and potassium within 30 days");
    println!("  [4] SGLT2 inhibitor   eGFR floor, blood pressure");
    println!("  [5] Diuretic          held at the current dose");
    println!();
}
