//! # gdmt-symptoms
//!
//! Scores the KCCQ-12 heart-failure questionnaire into a `SymptomScore`.
//!
//! Answers enter through [`SymptomAnswers::from_raw`] or
//! [`SymptomAnswers::from_response`], which reject incomplete submissions,
//! and are scored by [`calculate`].

pub mod answers;
pub mod calculator;

pub use answers::{KccqItem, QuestionnaireResponse, ResponseItem, SymptomAnswers};
pub use calculator::calculate;
