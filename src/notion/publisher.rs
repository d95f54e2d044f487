use chrono::{Local, NaiveDate};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::{AddonConfig, NotionProperties};
use crate::error::{Result, SyncError};
use crate::llm::{GeminiConfig, ListeningAnalyzer};
use crate::models::{Category, Note};
use crate::notion::{NotionPageRequest, PageContent};
use crate::text::normalize;

/// Public Notion API host
pub const NOTION_BASE_URL: &str = "https://api.notion.com";

/// Pinned Notion API version
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Configuration for the Notion side of the pipeline
#[derive(Clone)]
pub struct NotionConfig {
    /// Integration token, sent as a bearer token
    pub token: String,
    /// Target database
    pub database_id: String,
    /// API host, overridable for tests
    pub base_url: String,
    /// Column names of the target database
    pub properties: NotionProperties,
}

impl NotionConfig {
    pub fn from_addon(config: &AddonConfig) -> Self {
        Self {
            token: config.notion_token.clone(),
            database_id: config.database_id.clone(),
            base_url: NOTION_BASE_URL.to_string(),
            properties: config.notion_properties.clone(),
        }
    }

    fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.database_id.is_empty()
    }

    fn pages_endpoint(&self) -> String {
        format!("{}/v1/pages", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Note fields the sentence and its translation are read from
#[derive(Debug, Clone, Default)]
pub struct NoteFields {
    pub sentence: String,
    pub translation: String,
}

impl NoteFields {
    pub fn from_addon(config: &AddonConfig) -> Self {
        Self {
            sentence: config.field_sentence.clone(),
            translation: config.field_translation.clone(),
        }
    }
}

/// Why a note was not published
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotionNotConfigured,
    MissingField(String),
    EmptySentence,
}

/// What happened to one note; informational only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Skipped(SkipReason),
    Published { category: Category },
    Failed(String),
}

/// Analyses a note's sentence and records it as a Notion database page
pub struct NotionPublisher {
    client: Client,
    config: NotionConfig,
    fields: NoteFields,
    analyzer: ListeningAnalyzer,
}

impl NotionPublisher {
    pub fn new(config: NotionConfig, fields: NoteFields, analyzer: ListeningAnalyzer) -> Self {
        Self {
            client: Client::new(),
            config,
            fields,
            analyzer,
        }
    }

    /// Wire up a publisher from the loaded add-on settings
    pub fn from_addon(config: &AddonConfig) -> Self {
        Self::new(
            NotionConfig::from_addon(config),
            NoteFields::from_addon(config),
            ListeningAnalyzer::new(GeminiConfig::from_addon(config)),
        )
    }

    /// Publish a note dated today (local time)
    pub async fn publish<N: Note + ?Sized>(&self, note: &N) -> PublishOutcome {
        self.publish_on(note, Local::now().date_naive()).await
    }

    /// Publish a note with an explicit page date.
    ///
    /// Unmet preconditions return `Skipped` without any HTTP call. Notion
    /// failures are logged and returned as `Failed`, never retried.
    pub async fn publish_on<N: Note + ?Sized>(&self, note: &N, date: NaiveDate) -> PublishOutcome {
        if !self.config.is_configured() {
            debug!("Notion token or database id not configured, skipping note");
            return PublishOutcome::Skipped(SkipReason::NotionNotConfigured);
        }

        let (Some(raw_sentence), Some(raw_translation)) = (
            note.field(&self.fields.sentence),
            note.field(&self.fields.translation),
        ) else {
            let missing = if note.has_field(&self.fields.sentence) {
                &self.fields.translation
            } else {
                &self.fields.sentence
            };
            debug!("Note has no field {:?}, skipping", missing);
            return PublishOutcome::Skipped(SkipReason::MissingField(missing.clone()));
        };

        let sentence = normalize(raw_sentence);
        let translation = normalize(raw_translation);
        if sentence.is_empty() {
            debug!("Sentence is empty after normalization, skipping");
            return PublishOutcome::Skipped(SkipReason::EmptySentence);
        }

        let analysis = self.analyzer.analyze(&sentence).await;

        let request = NotionPageRequest::new(
            &self.config.database_id,
            &self.config.properties,
            &PageContent {
                sentence: &sentence,
                translation: &translation,
                date,
                analysis: &analysis,
            },
        );

        match self.create_page(&request).await {
            Ok(()) => {
                info!("Notion page created for {:?} ({})", sentence, analysis.category);
                PublishOutcome::Published {
                    category: analysis.category,
                }
            }
            Err(e) => {
                warn!("Notion Error: {}", e);
                PublishOutcome::Failed(e.to_string())
            }
        }
    }

    async fn create_page(&self, request: &NotionPageRequest) -> Result<()> {
        let response = self
            .client
            .post(self.config.pages_endpoint())
            .bearer_auth(&self.config.token)
            .header("Notion-Version", NOTION_API_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Notion error body: {}", body);
            return Err(SyncError::Api {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
