use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default Gemini model used for the listening analysis
pub const DEFAULT_GEMINI_MODEL: &str = "models/gemini-flash-latest";

/// Add-on configuration, read once from the host's `config.json`.
///
/// Every key is optional and defaults to an empty string. A missing value
/// disables the feature that needs it instead of failing the load.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    #[serde(rename = "GEMINI_API_KEY")]
    pub gemini_api_key: String,
    #[serde(rename = "NOTION_TOKEN")]
    pub notion_token: String,
    #[serde(rename = "DATABASE_ID")]
    pub database_id: String,
    #[serde(rename = "TARGET_NOTE_TYPE")]
    pub target_note_type: String,
    #[serde(rename = "FIELD_SENTENCE")]
    pub field_sentence: String,
    #[serde(rename = "FIELD_TRANSLATION")]
    pub field_translation: String,
    /// Gemini model path, e.g. "models/gemini-flash-latest"
    #[serde(rename = "GEMINI_MODEL")]
    pub gemini_model: String,
    /// Column names of the target Notion database
    #[serde(rename = "NOTION_PROPERTIES")]
    pub notion_properties: NotionProperties,
}

/// Property (column) names written on each created Notion page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotionProperties {
    /// Title column holding the source sentence
    pub sentence: String,
    /// Rich-text column holding the translation
    pub translation: String,
    /// Date column
    pub date: String,
    /// Multi-select column holding the category label
    pub category: String,
    /// Rich-text column holding the explanation
    pub analysis: String,
}

impl Default for NotionProperties {
    fn default() -> Self {
        Self {
            sentence: "English study".to_string(),
            translation: "日本語訳".to_string(),
            date: "日付".to_string(),
            category: "エラーカテゴリ".to_string(),
            analysis: "分析".to_string(),
        }
    }
}

impl AddonConfig {
    /// Parse the add-on config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AddonConfig =
            serde_json::from_str(json).context("Failed to parse add-on config JSON")?;
        Ok(config)
    }

    /// Load the add-on config from a `config.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json_str(&content)
    }

    /// Overlay values from the environment (or any key lookup).
    ///
    /// Keys use the same names as `config.json`; only non-empty values win.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots: [(&str, &mut String); 7] = [
            ("GEMINI_API_KEY", &mut self.gemini_api_key),
            ("NOTION_TOKEN", &mut self.notion_token),
            ("DATABASE_ID", &mut self.database_id),
            ("TARGET_NOTE_TYPE", &mut self.target_note_type),
            ("FIELD_SENTENCE", &mut self.field_sentence),
            ("FIELD_TRANSLATION", &mut self.field_translation),
            ("GEMINI_MODEL", &mut self.gemini_model),
        ];

        for (key, slot) in slots {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
        self
    }

    /// Gemini model path, falling back to the default model
    pub fn gemini_model(&self) -> &str {
        if self.gemini_model.is_empty() {
            DEFAULT_GEMINI_MODEL
        } else {
            &self.gemini_model
        }
    }
}

impl fmt::Debug for AddonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddonConfig")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("notion_token", &redact(&self.notion_token))
            .field("database_id", &self.database_id)
            .field("target_note_type", &self.target_note_type)
            .field("field_sentence", &self.field_sentence)
            .field("field_translation", &self.field_translation)
            .field("gemini_model", &self.gemini_model())
            .field("notion_properties", &self.notion_properties)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}
