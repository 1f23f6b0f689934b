//! # gdmt-core
//!
//! Decision logic for guideline-directed medical therapy titration in heart
//! failure with reduced ejection fraction.
//!
//! This crate provides:
//! - The `ContraindicationClassifier`, which maps allergy records to a
//!   contraindication severity for a medication or class
//! - One pure recommender per drug class (`recommenders`)
//! - The `RecommendationEngine`, which runs them in a fixed order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gdmt_catalog::Catalog;
//! use gdmt_core::RecommendationEngine;
//!
//! let engine = RecommendationEngine::from_catalog(&Catalog::builtin()?);
//! let outputs = engine.compute(&input)?;
//! ```

pub mod contraindication;
pub mod engine;
pub mod recommenders;

#[cfg(test)]
mod testing;

pub use contraindication::ContraindicationClassifier;
pub use engine::{BatchReport, PatientFailure, PatientRecommendations, RecommendationEngine};
