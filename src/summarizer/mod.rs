//! AI summarization of free-text feedback.
//!
//! The summarizer forwards all comments to a generative model in a single
//! request and relays a structured result. Every failure mode (transport,
//! parsing, missing credential) is absorbed into a fixed fallback result;
//! errors never propagate past this boundary.

pub mod gemini;

pub use gemini::GeminiClient;

use crate::models::AnalysisResult;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// A remote generative model that answers a prompt with a JSON document.
///
/// Object-safe so tests can substitute a stub that never touches the network.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send one prompt and return the model's raw JSON text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Summarizes free-text survey comments via a generative model.
pub struct FeedbackSummarizer {
    model: Box<dyn GenerativeModel>,
}

impl FeedbackSummarizer {
    /// Creates a summarizer over the given model.
    pub fn new(model: Box<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Analyze the given comments and return a structured summary.
    ///
    /// With no comments, returns the fixed no-data result without any
    /// remote call. On any model or parse failure, returns the fixed
    /// fallback result with neutral sentiment. Never fails.
    pub async fn summarize(&self, comments: &[String]) -> AnalysisResult {
        if comments.is_empty() {
            info!("No comments to analyze, returning no-data result");
            return AnalysisResult::no_data();
        }

        let prompt = build_prompt(comments);

        match self.model.generate(&prompt).await {
            Ok(text) => match serde_json::from_str::<AnalysisResult>(&text) {
                Ok(result) => {
                    info!("AI analysis complete ({} key points)", result.key_points.len());
                    result
                }
                Err(e) => {
                    warn!("Failed to parse AI response: {}", e);
                    AnalysisResult::fallback()
                }
            },
            Err(e) => {
                warn!("AI analysis failed: {}", e);
                AnalysisResult::fallback()
            }
        }
    }
}

/// Build the analysis prompt containing every comment.
fn build_prompt(comments: &[String]) -> String {
    let mut prompt = String::from(ANALYSIS_PROMPT_HEADER);
    for comment in comments {
        prompt.push_str("- ");
        prompt.push_str(comment);
        prompt.push('\n');
    }
    prompt
}

/// Instruction header for the comment-analysis prompt.
const ANALYSIS_PROMPT_HEADER: &str = r#"The following are free-text responses from a satisfaction survey taken after a workplace safety and health training session.
Analyze the responses and provide:
1. An overall summary (summary)
2. The overall sentiment (sentiment: one of positive, neutral, negative)
3. Three to five key improvement requests or notable opinions (keyPoints)

Respond with a single JSON object with exactly the fields "summary" (string), "sentiment" (string), and "keyPoints" (array of strings). Output only JSON, no other text.

Responses:
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Stub model that counts calls and returns a canned reply.
    struct StubModel {
        calls: Arc<AtomicUsize>,
        reply: Result<String, String>,
    }

    #[async_trait]
    impl GenerativeModel for StubModel {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(anyhow::anyhow!(msg.clone())),
            }
        }
    }

    fn stub(reply: Result<String, String>) -> (Arc<AtomicUsize>, FeedbackSummarizer) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = StubModel {
            calls: calls.clone(),
            reply,
        };
        (calls, FeedbackSummarizer::new(Box::new(model)))
    }

    #[tokio::test]
    async fn test_empty_comments_skip_the_model() {
        let (calls, summarizer) = stub(Ok("unused".to_string()));

        let result = summarizer.summarize(&[]).await;

        assert_eq!(result, AnalysisResult::no_data());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_error_yields_fallback() {
        let (calls, summarizer) = stub(Err("connection refused".to_string()));

        let result = summarizer
            .summarize(&["the drills were useful".to_string()])
            .await;

        assert_eq!(result, AnalysisResult::fallback());
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unparsable_reply_yields_fallback() {
        let (_, summarizer) = stub(Ok("I am not JSON".to_string()));

        let result = summarizer.summarize(&["anything".to_string()]).await;

        assert_eq!(result, AnalysisResult::fallback());
    }

    #[tokio::test]
    async fn test_valid_reply_is_relayed() {
        let reply = r#"{
            "summary": "Trainees found the session practical.",
            "sentiment": "positive",
            "keyPoints": ["More hands-on drills", "Shorter lecture blocks"]
        }"#;
        let (calls, summarizer) = stub(Ok(reply.to_string()));

        let comments = vec![
            "loved the hands-on part".to_string(),
            "lectures ran long".to_string(),
        ];
        let result = summarizer.summarize(&comments).await;

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.key_points.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prompt_contains_every_comment() {
        let comments = vec!["first opinion".to_string(), "second opinion".to_string()];
        let prompt = build_prompt(&comments);

        assert!(prompt.contains("- first opinion"));
        assert!(prompt.contains("- second opinion"));
        assert!(prompt.contains("keyPoints"));
    }
}
