use store::Question;

use crate::error::Error;

/// Sample shown in the quiz creation form
pub const SAMPLE_QUESTIONS: &str = r#"[{"q":"Sample?","choices":["A","B","C","D"],"answer":0}]"#;

/// Parses the JSON question list submitted with a new quiz, and validates it.
///
/// Expects a JSON array of `{"q": string, "choices": [string], "answer": index}`.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, Error> {
    let questions: Vec<Question> = serde_json::from_str(raw).map_err(|e| {
        Error::InvalidQuestions(format!(
            "questions must be a JSON list of {{\"q\", \"choices\", \"answer\"}} objects: {e}"
        ))
    })?;
    validate_questions(&questions)?;
    Ok(questions)
}

/// Validate Questions:
/// - `choices` is not empty
/// - `answer` indexes into `choices`
pub fn validate_questions(questions: &[Question]) -> Result<(), Error> {
    for (i, question) in questions.iter().enumerate() {
        let number = i + 1;
        if question.choices.is_empty() {
            return Err(Error::InvalidQuestions(format!(
                "question {number} has no choices"
            )));
        }
        if question.answer >= question.choices.len() {
            return Err(Error::InvalidQuestions(format!(
                "question {number} answer index {} is out of range for {} choices",
                question.answer,
                question.choices.len()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_questions_are_valid() {
        let questions = parse_questions(SAMPLE_QUESTIONS).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "Sample?");
        assert_eq!(questions[0].answer, 0);
    }

    #[test]
    fn prompt_is_accepted_in_place_of_q() {
        let questions =
            parse_questions(r#"[{"prompt":"Why?","choices":["Because"],"answer":0}]"#).unwrap();
        assert_eq!(questions[0].prompt, "Why?");
    }

    #[test]
    fn empty_list_is_allowed() {
        assert!(parse_questions("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_questions("not json").unwrap_err();
        assert!(matches!(err, Error::InvalidQuestions(_)));

        let err = parse_questions(r#"{"q":"Not a list","choices":["A"],"answer":0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidQuestions(_)));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = parse_questions(r#"[{"q":"No choices","answer":0}]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidQuestions(_)));
    }

    #[test]
    fn negative_answer_is_rejected() {
        let err = parse_questions(r#"[{"q":"?","choices":["A"],"answer":-1}]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidQuestions(_)));
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let err = parse_questions(
            r#"[{"q":"ok","choices":["A","B"],"answer":1},{"q":"bad","choices":["A","B"],"answer":2}]"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "question 2 answer index 2 is out of range for 2 choices"
        );
    }

    #[test]
    fn question_without_choices_is_rejected() {
        let err = parse_questions(r#"[{"q":"?","choices":[],"answer":0}]"#).unwrap_err();
        assert_eq!(err.to_string(), "question 1 has no choices");
    }
}
