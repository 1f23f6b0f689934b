//! KCCQ-12 scoring.
//!
//! Every answer is mapped linearly onto 0–100 using its own range, domains
//! average their answers, and the overall score averages the domains that
//! could be scored. Nothing is rounded.

use tracing::debug;

use gdmt_contracts::symptom::SymptomScore;

use crate::answers::SymptomAnswers;

/// Fewest applicable answers a split-question domain needs.
const MIN_APPLICABLE: usize = 2;

/// Score one questionnaire.
pub fn calculate(answers: &SymptomAnswers) -> SymptomScore {
    let physical_limits = split_domain([answers.answer1a, answers.answer1b, answers.answer1c]);

    let symptom_frequency = mean(&[
        scaled(answers.answer2, 4.0),
        scaled(answers.answer3, 6.0),
        scaled(answers.answer4, 6.0),
        scaled(answers.answer5, 4.0),
    ]);

    let quality_of_life = mean(&[scaled(answers.answer6, 4.0), scaled(answers.answer7, 4.0)]);

    let social_limits = split_domain([answers.answer8a, answers.answer8b, answers.answer8c]);

    let defined: Vec<f64> = [
        physical_limits,
        Some(symptom_frequency),
        Some(quality_of_life),
        social_limits,
    ]
    .into_iter()
    .flatten()
    .collect();
    let overall = mean(&defined);

    debug!(
        overall,
        domains = defined.len(),
        "symptom score calculated"
    );

    SymptomScore {
        overall_score: overall,
        physical_limits_score: physical_limits,
        symptom_frequency_score: Some(symptom_frequency),
        social_limits_score: social_limits,
        quality_of_life_score: Some(quality_of_life),
        dizziness_score: answers.answer9,
    }
}

/// Maps an answer in `1..=1+span` onto 0–100.
fn scaled(answer: f64, span: f64) -> f64 {
    100.0 * (answer - 1.0) / span
}

/// Mean of the applicable answers, or `None` with fewer than two.
fn split_domain(answers: [Option<f64>; 3]) -> Option<f64> {
    let applicable: Vec<f64> = answers
        .into_iter()
        .flatten()
        .map(|answer| scaled(answer, 4.0))
        .collect();
    (applicable.len() >= MIN_APPLICABLE).then(|| mean(&applicable))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::calculate;
    use crate::answers::SymptomAnswers;

    const EPSILON: f64 = 1e-4;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn fixture() -> SymptomAnswers {
        SymptomAnswers {
            answer1a: Some(1.0),
            answer1b: Some(2.0),
            answer1c: Some(4.0),
            answer2: 2.0,
            answer3: 1.0,
            answer4: 2.0,
            answer5: 3.0,
            answer6: 4.0,
            answer7: 2.0,
            answer8a: Some(1.0),
            answer8b: Some(2.0),
            answer8c: Some(1.0),
            answer9: 3.0,
        }
    }

    #[test]
    fn reference_questionnaire_scores() {
        let score = calculate(&fixture());
        approx(score.overall_score, 28.6458);
        approx(score.physical_limits_score.unwrap(), 33.3333);
        approx(score.symptom_frequency_score.unwrap(), 22.9167);
        approx(score.quality_of_life_score.unwrap(), 50.0);
        approx(score.social_limits_score.unwrap(), 8.3333);
        assert_eq!(score.dizziness_score, 3.0);
    }

    #[test]
    fn scores_are_not_rounded() {
        let score = calculate(&fixture());
        assert_ne!(score.overall_score, score.overall_score.round());
        approx(score.overall_score, 275.0 / 9.6);
    }

    #[test]
    fn two_applicable_answers_still_score() {
        let answers = SymptomAnswers {
            answer1b: None,
            ..fixture()
        };
        // 1a = 1, 1c = 4 → 0, 75
        approx(calculate(&answers).physical_limits_score.unwrap(), 37.5);
    }

    #[test]
    fn one_applicable_answer_leaves_domain_undefined() {
        let answers = SymptomAnswers {
            answer8a: None,
            answer8b: None,
            ..fixture()
        };
        let score = calculate(&answers);
        assert_eq!(score.social_limits_score, None);
        // Averaged over the three remaining domains, not counted as zero.
        approx(score.overall_score, (100.0 / 3.0 + 22.916_666 + 50.0) / 3.0);
    }

    #[test]
    fn both_split_domains_undefined() {
        let answers = SymptomAnswers {
            answer1a: None,
            answer1b: None,
            answer1c: None,
            answer8a: None,
            answer8b: None,
            answer8c: None,
            ..fixture()
        };
        let score = calculate(&answers);
        assert_eq!(score.physical_limits_score, None);
        assert_eq!(score.social_limits_score, None);
        approx(score.overall_score, (22.916_666 + 50.0) / 2.0);
    }

    #[test]
    fn bounds() {
        let best = SymptomAnswers {
            answer1a: Some(5.0),
            answer1b: Some(5.0),
            answer1c: Some(5.0),
            answer2: 5.0,
            answer3: 7.0,
            answer4: 7.0,
            answer5: 5.0,
            answer6: 5.0,
            answer7: 5.0,
            answer8a: Some(5.0),
            answer8b: Some(5.0),
            answer8c: Some(5.0),
            answer9: 0.0,
        };
        let score = calculate(&best);
        approx(score.overall_score, 100.0);
        assert_eq!(score.dizziness_score, 0.0);

        let worst = SymptomAnswers {
            answer1a: Some(1.0),
            answer1b: Some(1.0),
            answer1c: Some(1.0),
            answer2: 1.0,
            answer3: 1.0,
            answer4: 1.0,
            answer5: 1.0,
            answer6: 1.0,
            answer7: 1.0,
            answer8a: Some(1.0),
            answer8b: Some(1.0),
            answer8c: Some(1.0),
            answer9: 5.0,
        };
        approx(calculate(&worst).overall_score, 0.0);
    }
}
