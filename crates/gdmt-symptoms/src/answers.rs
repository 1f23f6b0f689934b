//! KCCQ-12 answers as the calculator consumes them.
//!
//! The questionnaire has 12 questions and 13 answers (question 1 and 8 are
//! split into three parts each). Parts of questions 1 and 8 accept 6 for
//! "limited for other reasons or did not do the activity"; that sentinel is
//! turned into `None` here so the calculator never sees it.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use gdmt_contracts::error::{EngineError, EngineResult};

/// The "not applicable" answer for the split activity questions.
pub const NOT_APPLICABLE: f64 = 6.0;

/// One of the 13 answer slots, identified by its link ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KccqItem {
    Answer1a,
    Answer1b,
    Answer1c,
    Answer2,
    Answer3,
    Answer4,
    Answer5,
    Answer6,
    Answer7,
    Answer8a,
    Answer8b,
    Answer8c,
    Answer9,
}

impl KccqItem {
    pub const ALL: [KccqItem; 13] = [
        Self::Answer1a,
        Self::Answer1b,
        Self::Answer1c,
        Self::Answer2,
        Self::Answer3,
        Self::Answer4,
        Self::Answer5,
        Self::Answer6,
        Self::Answer7,
        Self::Answer8a,
        Self::Answer8b,
        Self::Answer8c,
        Self::Answer9,
    ];

    pub fn link_id(&self) -> &'static str {
        match self {
            Self::Answer1a => "answer1a",
            Self::Answer1b => "answer1b",
            Self::Answer1c => "answer1c",
            Self::Answer2 => "answer2",
            Self::Answer3 => "answer3",
            Self::Answer4 => "answer4",
            Self::Answer5 => "answer5",
            Self::Answer6 => "answer6",
            Self::Answer7 => "answer7",
            Self::Answer8a => "answer8a",
            Self::Answer8b => "answer8b",
            Self::Answer8c => "answer8c",
            Self::Answer9 => "answer9",
        }
    }
}

impl fmt::Display for KccqItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.link_id())
    }
}

// ── Questionnaire response ────────────────────────────────────────────────────

/// A submitted questionnaire: one item per link ID, each with its answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    #[serde(default)]
    pub items: Vec<ResponseItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    pub link_id: String,
    #[serde(default)]
    pub answers: Vec<f64>,
}

// ── SymptomAnswers ────────────────────────────────────────────────────────────

/// The 13 raw answers, with "not applicable" already removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymptomAnswers {
    pub answer1a: Option<f64>,
    pub answer1b: Option<f64>,
    pub answer1c: Option<f64>,
    pub answer2: f64,
    pub answer3: f64,
    pub answer4: f64,
    pub answer5: f64,
    pub answer6: f64,
    pub answer7: f64,
    pub answer8a: Option<f64>,
    pub answer8b: Option<f64>,
    pub answer8c: Option<f64>,
    pub answer9: f64,
}

impl SymptomAnswers {
    /// Read answers from a flat map keyed `answer1a` … `answer9`.
    ///
    /// # Errors
    ///
    /// `MissingAnswer` naming the first absent key.
    pub fn from_raw(raw: &HashMap<String, f64>) -> EngineResult<Self> {
        Self::from_lookup(|item| {
            raw.get(item.link_id())
                .copied()
                .ok_or_else(|| EngineError::MissingAnswer {
                    link_id: item.link_id().to_string(),
                })
        })
    }

    /// Read answers from a questionnaire response.
    ///
    /// # Errors
    ///
    /// `MissingAnswer` when an item is absent, and `InvalidAnswerCount` when
    /// an item carries anything other than exactly one answer.
    pub fn from_response(response: &QuestionnaireResponse) -> EngineResult<Self> {
        Self::from_lookup(|item| {
            let link_id = item.link_id();
            let found = response
                .items
                .iter()
                .find(|i| i.link_id == link_id)
                .ok_or_else(|| EngineError::MissingAnswer {
                    link_id: link_id.to_string(),
                })?;
            match found.answers.as_slice() {
                [answer] => Ok(*answer),
                other => Err(EngineError::InvalidAnswerCount {
                    link_id: link_id.to_string(),
                    count: other.len(),
                }),
            }
        })
    }

    fn from_lookup(mut get: impl FnMut(KccqItem) -> EngineResult<f64>) -> EngineResult<Self> {
        use KccqItem::*;

        let mut optional = |item| get(item).map(applicable);
        let answer1a = optional(Answer1a)?;
        let answer1b = optional(Answer1b)?;
        let answer1c = optional(Answer1c)?;
        let answer8a = optional(Answer8a)?;
        let answer8b = optional(Answer8b)?;
        let answer8c = optional(Answer8c)?;

        Ok(Self {
            answer1a,
            answer1b,
            answer1c,
            answer2: get(Answer2)?,
            answer3: get(Answer3)?,
            answer4: get(Answer4)?,
            answer5: get(Answer5)?,
            answer6: get(Answer6)?,
            answer7: get(Answer7)?,
            answer8a,
            answer8b,
            answer8c,
            answer9: get(Answer9)?,
        })
    }
}

fn applicable(answer: f64) -> Option<f64> {
    (answer != NOT_APPLICABLE).then_some(answer)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
