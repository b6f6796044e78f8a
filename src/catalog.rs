//! The fixed survey question catalog.
//!
//! Six questions: five rating questions (ids 1-5) and one free-text
//! question (id 6). Defined at process start and never mutated.

use crate::models::{Question, QuestionKind};

/// Returns the full question catalog in declared order (ascending id).
pub fn survey_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            text: "Was the training content helpful for performing your work?".to_string(),
            kind: QuestionKind::Rating,
        },
        Question {
            id: 2,
            text: "Are you satisfied with the instructor's expertise and delivery?".to_string(),
            kind: QuestionKind::Rating,
        },
        Question {
            id: 3,
            text: "Were the training materials (handouts, audiovisual aids) easy to understand?"
                .to_string(),
            kind: QuestionKind::Rating,
        },
        Question {
            id: 4,
            text: "Were the training schedule and venue (or environment) appropriate?".to_string(),
            kind: QuestionKind::Rating,
        },
        Question {
            id: 5,
            text: "How satisfied are you with the safety and health training overall?".to_string(),
            kind: QuestionKind::Rating,
        },
        Question {
            id: 6,
            text: "Please share any requests or suggestions for future training sessions."
                .to_string(),
            kind: QuestionKind::FreeText,
        },
    ]
}

/// Human-readable label for a rating value (1..=5).
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Very Dissatisfied",
        2 => "Dissatisfied",
        3 => "Neutral",
        4 => "Satisfied",
        5 => "Very Satisfied",
        _ => "Unknown",
    }
}
