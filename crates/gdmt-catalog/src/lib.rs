//! # gdmt-catalog
//!
//! Static reference data for the GDMT titration engine, loaded from TOML.
//!
//! ## Overview
//!
//! [`Catalog`] indexes three tables:
//!
//! - medication → target daily dose (per ingredient, mg/day)
//! - drug → medication and ingredient strengths
//! - SNOMED CT code → contraindicated medications or classes
//!
//! A default catalog is embedded in the crate; deployments with their own
//! curated tables load them with [`Catalog::from_file`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use gdmt_catalog::Catalog;
//!
//! let catalog = Catalog::builtin()?;
//! let request = catalog.resolve_request(&drug, schedule)?;
//! ```

pub mod catalog;
pub mod entry;

pub use catalog::Catalog;
pub use entry::{CatalogConfig, ContraindicationCodeEntry, DrugEntry, IngredientEntry, MedicationEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
