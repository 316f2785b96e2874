use std::collections::HashMap;

use store::Question;

/// Outcome of grading one submission
#[derive(Clone, Debug, PartialEq)]
pub struct GradedAttempt {
    /// One entry per question, `None` when unanswered
    pub answers: Vec<Option<usize>>,
    pub correct: usize,
    /// Percentage rounded to 2 decimal places
    pub score: f64,
}

/// Reads the answer for each question from submitted form fields.
///
/// The answer to question `i` is the field `q{i}`. Missing fields and values
/// that are not a choice index are treated as unanswered.
pub fn answers_from_fields(
    question_count: usize,
    fields: &HashMap<String, String>,
) -> Vec<Option<usize>> {
    (0..question_count)
        .map(|i| {
            fields
                .get(&format!("q{i}"))
                .and_then(|value| value.trim().parse().ok())
        })
        .collect()
}

/// Grades `answers` against the stored correct indices.
///
/// The returned answers always hold one entry per question, extra submitted
/// answers are dropped and missing ones count as unanswered.
pub fn grade(questions: &[Question], answers: &[Option<usize>]) -> GradedAttempt {
    let answers: Vec<Option<usize>> = (0..questions.len())
        .map(|i| answers.get(i).copied().flatten())
        .collect();

    let correct = questions
        .iter()
        .zip(&answers)
        .filter(|(question, answer)| **answer == Some(question.answer))
        .count();

    GradedAttempt {
        score: calculate_score(correct, questions.len()),
        answers,
        correct,
    }
}

/// `100 * correct / total`, rounded to 2 decimal places.
///
/// A quiz without questions scores 0.
pub fn calculate_score(correct: usize, total: usize) -> f64 {
    let score = 100.0 * correct as f64 / total.max(1) as f64;
    (score * 100.0).round() / 100.0
}
