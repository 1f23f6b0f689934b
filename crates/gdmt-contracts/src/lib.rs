//! # gdmt-contracts
//!
//! Shared clinical data model for the GDMT titration engine.
//!
//! All crates in the workspace import from here. No decision logic lives in
//! this crate, only data definitions and error types.

pub mod allergy;
pub mod error;
pub mod medication;
pub mod observation;
pub mod recommendation;
pub mod symptom;
