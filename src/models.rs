//! Data models for the survey tool.
//!
//! This module contains all the core data structures used throughout
//! the application for representing questions, responses, statistics,
//! and AI analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a survey question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Answered with an integer rating from 1 to 5.
    Rating,
    /// Answered with an open text comment.
    FreeText,
}

/// A single entry of the fixed question catalog.
///
/// Questions are defined statically at startup and are never mutated
/// or persisted per-response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable, unique question identifier.
    pub id: u32,
    /// Display text shown to respondents.
    pub text: String,
    /// Whether this question takes a rating or free text.
    pub kind: QuestionKind,
}

/// One answer inside a response: either a numeric rating or free text.
///
/// Stored data is untrusted; range validation happens at aggregation time,
/// not on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(i64),
    Text(String),
}

impl Answer {
    /// Returns the answer as a valid rating (integer in 1..=5), if it is one.
    pub fn as_rating(&self) -> Option<u8> {
        match self {
            Answer::Number(n) if (1..=5).contains(n) => Some(*n as u8),
            _ => None,
        }
    }

    /// Returns the answer as trimmed, non-empty text, if it is one.
    ///
    /// Empty or whitespace-only strings are treated as absent.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            Answer::Number(_) => None,
        }
    }
}

/// One respondent's complete submission.
///
/// Created once at submission time and never mutated; removed only by the
/// bulk clear operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// Unique response identifier (UUID v4).
    pub id: String,
    /// Submission time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Question identifier -> answer.
    pub answers: BTreeMap<u32, Answer>,
}

impl SurveyResponse {
    /// Creates a new response with a fresh id and the current time.
    pub fn new(answers: BTreeMap<u32, Answer>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            answers,
        }
    }

    /// Submission time as a UTC datetime, if the stored millis are valid.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Descriptive statistics for one rating question.
///
/// Derived on every read of the store; never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStatistic {
    /// Identifier of the question these statistics describe.
    pub question_id: u32,
    /// Display text of the question.
    pub text: String,
    /// Response count per rating value; index 0 holds rating 1, index 4 rating 5.
    pub counts: [u32; 5],
    /// Sum of the valid ratings divided by the total response count,
    /// rounded to one decimal place.
    pub mean: f64,
}

impl QuestionStatistic {
    /// Number of responses that gave the exact rating value (1..=5).
    pub fn count_for(&self, rating: u8) -> u32 {
        assert!((1..=5).contains(&rating), "rating out of range");
        self.counts[(rating - 1) as usize]
    }

    /// Number of responses with a valid answer for this question.
    pub fn answered(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Aggregated statistics over the full response list.
///
/// Only produced for a non-empty dataset; the empty case is represented
/// by `None` from the aggregator so callers must branch explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyStatistics {
    /// Total number of responses, regardless of per-question completeness.
    pub total_responses: usize,
    /// Per-question statistics for the rating questions, in catalog order.
    pub per_question: Vec<QuestionStatistic>,
}

/// Satisfaction band for a question's rounded mean, used for color-coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionBand {
    VeryDissatisfied,
    Dissatisfied,
    Neutral,
    Satisfied,
    VerySatisfied,
}

impl SatisfactionBand {
    /// Human-readable band label.
    pub fn label(&self) -> &'static str {
        match self {
            SatisfactionBand::VeryDissatisfied => "Very Dissatisfied",
            SatisfactionBand::Dissatisfied => "Dissatisfied",
            SatisfactionBand::Neutral => "Neutral",
            SatisfactionBand::Satisfied => "Satisfied",
            SatisfactionBand::VerySatisfied => "Very Satisfied",
        }
    }

    /// Returns an emoji representation of the band.
    pub fn emoji(&self) -> &'static str {
        match self {
            SatisfactionBand::VeryDissatisfied => "🔴",
            SatisfactionBand::Dissatisfied => "🟠",
            SatisfactionBand::Neutral => "🟡",
            SatisfactionBand::Satisfied => "🔵",
            SatisfactionBand::VerySatisfied => "🟢",
        }
    }

    /// Hex color used by chart-style renderings (red through green).
    pub fn color(&self) -> &'static str {
        match self {
            SatisfactionBand::VeryDissatisfied => "#EF4444",
            SatisfactionBand::Dissatisfied => "#F97316",
            SatisfactionBand::Neutral => "#EAB308",
            SatisfactionBand::Satisfied => "#3B82F6",
            SatisfactionBand::VerySatisfied => "#22C55E",
        }
    }
}

impl fmt::Display for SatisfactionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse three-way classification of aggregate comment tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}

impl Sentiment {
    /// Returns an emoji representation of the sentiment.
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "😟",
        }
    }
}

/// Structured result of the AI comment analysis.
///
/// Held only transiently; a new analysis request overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall summary of the free-text feedback.
    pub summary: String,
    /// Overall tone of the feedback.
    pub sentiment: Sentiment,
    /// Key improvement requests or notable opinions, in model order.
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
}

impl AnalysisResult {
    /// Fixed result returned when there are no comments to analyze.
    pub fn no_data() -> Self {
        Self {
            summary: "There is no feedback data to analyze.".to_string(),
            sentiment: Sentiment::Neutral,
            key_points: Vec::new(),
        }
    }

    /// Fixed fallback returned when the AI analysis fails for any reason.
    pub fn fallback() -> Self {
        Self {
            summary: "The AI analysis could not be completed. Please try again later."
                .to_string(),
            sentiment: Sentiment::Neutral,
            key_points: vec!["Analysis failed".to_string()],
        }
    }
}

/// Metadata about a generated dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Path of the data file the report was computed from.
    pub data_file: String,
    /// Total number of responses in the dataset.
    pub total_responses: usize,
}

/// A single free-text comment with its submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
    /// The comment text.
    pub text: String,
    /// Submission time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// The complete admin dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Per-question statistics in catalog order.
    pub statistics: Vec<QuestionStatistic>,
    /// All free-text comments, in response order.
    pub comments: Vec<CommentEntry>,
    /// AI analysis of the comments, if one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_as_rating() {
        assert_eq!(Answer::Number(3).as_rating(), Some(3));
        assert_eq!(Answer::Number(1).as_rating(), Some(1));
        assert_eq!(Answer::Number(5).as_rating(), Some(5));
        assert_eq!(Answer::Number(0).as_rating(), None);
        assert_eq!(Answer::Number(6).as_rating(), None);
        assert_eq!(Answer::Number(-2).as_rating(), None);
        assert_eq!(Answer::Text("4".to_string()).as_rating(), None);
    }

    #[test]
    fn test_answer_as_text() {
        assert_eq!(
            Answer::Text("great session".to_string()).as_text(),
            Some("great session")
        );
        assert_eq!(
            Answer::Text("  padded  ".to_string()).as_text(),
            Some("padded")
        );
        assert_eq!(Answer::Text(String::new()).as_text(), None);
        assert_eq!(Answer::Text("   ".to_string()).as_text(), None);
        assert_eq!(Answer::Number(3).as_text(), None);
    }

    #[test]
    fn test_answer_untagged_serde() {
        let json = r#"{"1": 5, "6": "more hands-on drills"}"#;
        let answers: BTreeMap<u32, Answer> = serde_json::from_str(json).unwrap();
        assert_eq!(answers[&1], Answer::Number(5));
        assert_eq!(answers[&6], Answer::Text("more hands-on drills".to_string()));
    }

    #[test]
    fn test_response_ids_are_unique() {
        let a = SurveyResponse::new(BTreeMap::new());
        let b = SurveyResponse::new(BTreeMap::new());
        assert_ne!(a.id, b.id);
        assert!(a.submitted_at().is_some());
    }

    #[test]
    fn test_question_statistic_helpers() {
        let stat = QuestionStatistic {
            question_id: 1,
            text: "Q1".to_string(),
            counts: [0, 1, 2, 3, 4],
            mean: 4.0,
        };
        assert_eq!(stat.count_for(1), 0);
        assert_eq!(stat.count_for(5), 4);
        assert_eq!(stat.answered(), 10);
    }

    #[test]
    fn test_band_colors_span_red_to_green() {
        assert_eq!(SatisfactionBand::VeryDissatisfied.color(), "#EF4444");
        assert_eq!(SatisfactionBand::VerySatisfied.color(), "#22C55E");
        assert_eq!(SatisfactionBand::Neutral.label(), "Neutral");
    }

    #[test]
    fn test_sentiment_serde_lowercase() {
        let s: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(s, Sentiment::Negative);
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
    }

    #[test]
    fn test_analysis_result_wire_field_names() {
        let json = r#"{"summary":"ok","sentiment":"positive","keyPoints":["a","b"]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.key_points, vec!["a", "b"]);
    }

    #[test]
    fn test_fixed_results() {
        let no_data = AnalysisResult::no_data();
        assert_eq!(no_data.sentiment, Sentiment::Neutral);
        assert!(no_data.key_points.is_empty());

        let fallback = AnalysisResult::fallback();
        assert_eq!(fallback.sentiment, Sentiment::Neutral);
        assert_eq!(fallback.key_points, vec!["Analysis failed".to_string()]);
    }
}
