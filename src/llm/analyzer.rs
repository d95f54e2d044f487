use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, SyncError};
use crate::llm::{GeminiClient, GeminiConfig, build_listening_prompt};
use crate::models::{AnalysisResult, Category};
use crate::text::extract_json_object;

/// Classifies why a sentence is hard to catch by ear
pub struct ListeningAnalyzer {
    client: GeminiClient,
}

impl ListeningAnalyzer {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: GeminiClient::new(config),
        }
    }

    /// Analyze a normalized sentence.
    ///
    /// Never fails: a missing key, API error or unparseable answer comes back
    /// as an `Error`-category result carrying the message.
    pub async fn analyze(&self, sentence: &str) -> AnalysisResult {
        if !self.client.config().has_credential() {
            return AnalysisResult::error(SyncError::MissingCredential("Gemini API Key").to_string());
        }

        match self.try_analyze(sentence).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Listening analysis failed: {}", e);
                AnalysisResult::error(e.to_string())
            }
        }
    }

    async fn try_analyze(&self, sentence: &str) -> Result<AnalysisResult> {
        let prompt = build_listening_prompt(sentence);

        let text = match self.client.generate_text(&prompt).await {
            Err(SyncError::RateLimited) => {
                let delay = self.client.config().retry_delay;
                info!("Gemini rate limited, retrying once in {:?}", delay);
                tokio::time::sleep(delay).await;
                self.client
                    .generate_text(&prompt)
                    .await
                    .map_err(|e| match e {
                        SyncError::RateLimited => SyncError::Api { status: 429 },
                        other => other,
                    })?
            }
            result => result?,
        };

        parse_analysis(&text)
    }
}

/// Turn the model's raw text answer into an `AnalysisResult`
pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let value = extract_json_object(text)?;

    let raw_category = match value.get("category") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let analysis = match value.get("analysis_ja") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(AnalysisResult::new(
        Category::from_model_label(&raw_category),
        analysis,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddonConfig;

    #[test]
    fn test_parse_fenced_answer() {
        let text = "```json\n{\"category\": \"liaison (linking)\", \"analysis_ja\": \"音がつながる\"}\n```";
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.category, Category::Liaison);
        assert_eq!(result.analysis, "音がつながる");
    }

    #[test]
    fn test_parse_unknown_category_and_missing_analysis() {
        let result = parse_analysis("{\"category\": \"Intonation\"}").unwrap();
        assert_eq!(result.category, Category::Vocabulary);
        assert_eq!(result.analysis, "");

        let result = parse_analysis("{\"category\": 3, \"analysis_ja\": null}").unwrap();
        assert_eq!(result.category, Category::Vocabulary);
        assert_eq!(result.analysis, "");
    }

    #[test]
    fn test_parse_failure_message() {
        let err = parse_analysis("no json here").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse AI response.");
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let mut config = GeminiConfig::from_addon(&AddonConfig::default());
        // unroutable, would fail loudly if contacted
        config.base_url = "http://127.0.0.1:1".to_string();
        let analyzer = ListeningAnalyzer::new(config);

        let result = analyzer.analyze("Hello there").await;
        assert!(result.is_error());
        assert_eq!(result.analysis, "Gemini API Key is missing in config.");
    }
}
