//! Response aggregation and statistics.
//!
//! This module computes per-question frequency counts and means over the
//! rating questions, classifies rounded means into satisfaction bands,
//! and extracts free-text comments for the comment-listing path.

use crate::models::{
    CommentEntry, Question, QuestionKind, QuestionStatistic, SatisfactionBand, SurveyResponse,
    SurveyStatistics,
};

/// Compute descriptive statistics over the full response list.
///
/// Returns `None` for an empty response list so callers must handle the
/// "no data" case explicitly rather than receive zero-filled statistics.
///
/// For each rating question, in catalog order:
/// - an answer is counted only if it is an integer in 1..=5; absent,
///   non-numeric, and out-of-range answers are skipped entirely;
/// - the mean divides the sum of valid ratings by the **total** response
///   count, not by the number of valid answers, so a skipped question
///   lowers that question's mean relative to full participation.
///
/// Pure function of its inputs; no side effects.
pub fn compute_statistics(
    responses: &[SurveyResponse],
    questions: &[Question],
) -> Option<SurveyStatistics> {
    if responses.is_empty() {
        return None;
    }

    let total = responses.len();

    let per_question = questions
        .iter()
        .filter(|q| q.kind == QuestionKind::Rating)
        .map(|question| {
            let mut counts = [0u32; 5];
            let mut sum = 0u64;

            for response in responses {
                if let Some(rating) = response
                    .answers
                    .get(&question.id)
                    .and_then(|answer| answer.as_rating())
                {
                    counts[(rating - 1) as usize] += 1;
                    sum += u64::from(rating);
                }
            }

            QuestionStatistic {
                question_id: question.id,
                text: question.text.clone(),
                counts,
                mean: round_one_decimal(sum as f64 / total as f64),
            }
        })
        .collect();

    Some(SurveyStatistics {
        total_responses: total,
        per_question,
    })
}

/// Round to one decimal place, half away from zero.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify a rounded mean into one of five satisfaction bands.
///
/// Inclusive lower bounds at 1.5 / 2.5 / 3.5 / 4.5; a mean sitting exactly
/// on a boundary goes to the higher band. Total over the whole real line.
pub fn classify_band(mean: f64) -> SatisfactionBand {
    if mean >= 4.5 {
        SatisfactionBand::VerySatisfied
    } else if mean >= 3.5 {
        SatisfactionBand::Satisfied
    } else if mean >= 2.5 {
        SatisfactionBand::Neutral
    } else if mean >= 1.5 {
        SatisfactionBand::Dissatisfied
    } else {
        SatisfactionBand::VeryDissatisfied
    }
}

/// Collect all non-empty free-text answers with their submission times,
/// in response order.
///
/// Empty and whitespace-only strings are treated as absent.
pub fn collect_comment_entries(
    responses: &[SurveyResponse],
    questions: &[Question],
) -> Vec<CommentEntry> {
    let free_text_ids: Vec<u32> = questions
        .iter()
        .filter(|q| q.kind == QuestionKind::FreeText)
        .map(|q| q.id)
        .collect();

    responses
        .iter()
        .flat_map(|response| {
            free_text_ids.iter().filter_map(|id| {
                response
                    .answers
                    .get(id)
                    .and_then(|answer| answer.as_text())
                    .map(|text| CommentEntry {
                        text: text.to_string(),
                        timestamp: response.timestamp,
                    })
            })
        })
        .collect()
}

/// Collect all non-empty free-text answers, in response order.
pub fn collect_comments(responses: &[SurveyResponse], questions: &[Question]) -> Vec<String> {
    collect_comment_entries(responses, questions)
        .into_iter()
        .map(|entry| entry.text)
        .collect()
}
