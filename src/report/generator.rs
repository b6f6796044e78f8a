//! Markdown dashboard generation.
//!
//! This module renders the per-question statistics, the free-text
//! comments, and the optional AI analysis as a Markdown document.

use crate::analysis::classify_band;
use crate::catalog::rating_label;
use crate::models::{
    AnalysisResult, CommentEntry, DashboardReport, QuestionStatistic, ReportMetadata,
};
use anyhow::Result;
use chrono::DateTime;

/// Generate a complete Markdown dashboard report.
pub fn generate_markdown_report(report: &DashboardReport) -> String {
    let mut output = String::new();

    output.push_str("# Safety Training Survey Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_statistics_section(&report.statistics));
    output.push_str(&generate_comments_section(&report.comments));

    if let Some(ref analysis) = report.analysis {
        output.push_str(&generate_analysis_section(analysis));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Data File:** `{}`\n", metadata.data_file));
    section.push_str(&format!(
        "- **Total Responses:** {}\n",
        metadata.total_responses
    ));
    section.push('\n');

    section
}

/// Generate the per-question statistics section.
fn generate_statistics_section(statistics: &[QuestionStatistic]) -> String {
    let mut section = String::new();

    section.push_str("## Satisfaction by Question\n\n");

    section.push_str("| # | Question | Mean | Band | Answered |\n");
    section.push_str("|:---:|:---|:---:|:---|:---:|\n");
    for stat in statistics {
        let band = classify_band(stat.mean);
        section.push_str(&format!(
            "| Q{} | {} | **{:.1}** / 5.0 | {} {} | {} |\n",
            stat.question_id,
            stat.text,
            stat.mean,
            band.emoji(),
            band.label(),
            stat.answered(),
        ));
    }
    section.push('\n');

    // Rating breakdown per question
    for stat in statistics {
        section.push_str(&generate_breakdown_block(stat));
    }

    section
}

/// Generate the rating-frequency breakdown for one question.
fn generate_breakdown_block(stat: &QuestionStatistic) -> String {
    let mut block = String::new();

    block.push_str(&format!("### Q{}: {}\n\n", stat.question_id, stat.text));
    block.push_str("| Rating | Label | Count |\n");
    block.push_str("|:---:|:---|:---:|\n");

    // Highest rating first, matching the chart legends.
    for rating in (1..=5u8).rev() {
        block.push_str(&format!(
            "| {} | {} | {} |\n",
            rating,
            rating_label(rating),
            stat.count_for(rating)
        ));
    }
    block.push('\n');

    block
}

/// Generate the free-text comments section.
fn generate_comments_section(comments: &[CommentEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Free-Text Responses\n\n");

    if comments.is_empty() {
        section.push_str("*No free-text responses were submitted.*\n\n");
        return section;
    }

    for comment in comments {
        let submitted = DateTime::from_timestamp_millis(comment.timestamp)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        section.push_str(&format!("> \"{}\"\n>\n> — {}\n\n", comment.text, submitted));
    }

    section
}

/// Generate the AI analysis section.
fn generate_analysis_section(analysis: &AnalysisResult) -> String {
    let mut section = String::new();

    section.push_str("## AI Feedback Analysis\n\n");
    section.push_str(&format!(
        "**Overall Sentiment:** {} {}\n\n",
        analysis.sentiment.emoji(),
        analysis.sentiment
    ));
    section.push_str(&format!("**Summary:** {}\n\n", analysis.summary));

    if !analysis.key_points.is_empty() {
        section.push_str("**Key Points:**\n\n");
        for (i, point) in analysis.key_points.iter().enumerate() {
            section.push_str(&format!("{}. {}\n", i + 1, point));
        }
        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by EduPulse*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use chrono::Utc;

    fn create_test_report() -> DashboardReport {
        DashboardReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                data_file: "survey_responses.json".to_string(),
                total_responses: 6,
            },
            statistics: vec![QuestionStatistic {
                question_id: 1,
                text: "Was the training content helpful?".to_string(),
                counts: [0, 0, 1, 2, 2],
                mean: 4.3,
            }],
            comments: vec![CommentEntry {
                text: "More hands-on drills please".to_string(),
                timestamp: 1_700_000_000_000,
            }],
            analysis: Some(AnalysisResult {
                summary: "Mostly positive feedback.".to_string(),
                sentiment: Sentiment::Positive,
                key_points: vec!["More practical exercises".to_string()],
            }),
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Safety Training Survey Report"));
        assert!(markdown.contains("## Overview"));
        assert!(markdown.contains("**Total Responses:** 6"));
        assert!(markdown.contains("## Satisfaction by Question"));
        assert!(markdown.contains("**4.3** / 5.0"));
        assert!(markdown.contains("Satisfied"));
        assert!(markdown.contains("More hands-on drills please"));
        assert!(markdown.contains("## AI Feedback Analysis"));
        assert!(markdown.contains("More practical exercises"));
    }

    #[test]
    fn test_markdown_without_analysis_omits_ai_section() {
        let mut report = create_test_report();
        report.analysis = None;

        let markdown = generate_markdown_report(&report);
        assert!(!markdown.contains("## AI Feedback Analysis"));
    }

    #[test]
    fn test_empty_comments_message() {
        let mut report = create_test_report();
        report.comments.clear();

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("No free-text responses were submitted."));
    }

    #[test]
    fn test_breakdown_lists_all_five_ratings() {
        let report = create_test_report();
        let block = generate_breakdown_block(&report.statistics[0]);

        for rating in 1..=5u8 {
            assert!(block.contains(&format!("| {} |", rating)));
        }
        assert!(block.contains("Very Satisfied"));
        assert!(block.contains("Very Dissatisfied"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"total_responses\""));
        assert!(json.contains("\"statistics\""));
        assert!(json.contains("\"keyPoints\""));
    }
}
