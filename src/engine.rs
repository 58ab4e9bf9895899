//! Conditional visibility and answer validation over assessment schemas.
//!
//! Pure functions over schema + answers; persistence is the service
//! layer's job. Consulted while authoring (builder preview) and while
//! answering (form submission).

use crate::error::{Error, Result};
use crate::models::{Answer, AnswerMap, Question, QuestionKind, Section};

/// A question with no dependency is always visible; one with `show_if` is
/// visible iff the recorded answer for the referenced question is a text
/// answer strictly equal to the expected value. Multi-select answers never
/// satisfy the predicate.
pub fn is_visible(question: &Question, answers: &AnswerMap) -> bool {
    match &question.show_if {
        None => true,
        Some(cond) => answers
            .get(&cond.question_id)
            .and_then(Answer::as_text)
            .map(|text| text == cond.equals)
            .unwrap_or(false),
    }
}

/// The questions a respondent currently sees, in answer-collection order.
/// Hidden questions keep their recorded answers; they are just skipped.
pub fn visible_questions<'a>(sections: &'a [Section], answers: &AnswerMap) -> Vec<&'a Question> {
    sections
        .iter()
        .flat_map(|section| section.questions.iter())
        .filter(|q| is_visible(q, answers))
        .collect()
}

/// Check a submitted answer set against the schema, visible questions
/// only, stopping at the first failure.
pub fn validate_answers(sections: &[Section], answers: &AnswerMap) -> Result<()> {
    for question in visible_questions(sections, answers) {
        let answer = answers.get(&question.id);

        if question.required && answer.map(Answer::is_empty).unwrap_or(true) {
            return Err(Error::invalid_answer("missing required", &question.id));
        }

        let Some(answer) = answer else { continue };
        if answer.is_empty() {
            continue;
        }

        match &question.kind {
            QuestionKind::Number { min, max } => {
                let value: f64 = answer
                    .as_text()
                    .and_then(|text| text.trim().parse().ok())
                    .ok_or_else(|| Error::invalid_answer("must be a number", &question.id))?;
                if let Some(min) = min {
                    if value < *min {
                        return Err(Error::invalid_answer(
                            format!("must be >= {min}"),
                            &question.id,
                        ));
                    }
                }
                if let Some(max) = max {
                    if value > *max {
                        return Err(Error::invalid_answer(
                            format!("must be <= {max}"),
                            &question.id,
                        ));
                    }
                }
            }
            QuestionKind::Short { max_length } | QuestionKind::Long { max_length } => {
                if let (Some(limit), Some(text)) = (max_length, answer.as_text()) {
                    if text.chars().count() as u32 > *limit {
                        return Err(Error::invalid_answer(
                            format!("exceeds max length {limit}"),
                            &question.id,
                        ));
                    }
                }
            }
            QuestionKind::Single { .. } | QuestionKind::Multi { .. } | QuestionKind::File => {}
        }
    }
    Ok(())
}
