pub mod config;
pub mod error;
pub mod hooks;
pub mod llm;
pub mod models;
pub mod notion;
pub mod text;

pub use config::{AddonConfig, NotionProperties};
pub use error::{ExtractError, SyncError};
pub use hooks::{NoteAddedBinding, NoteAddedHooks};
pub use llm::{GeminiClient, GeminiConfig, ListeningAnalyzer};
pub use models::{AnalysisResult, Category, FieldNote, Note};
pub use notion::{
    NoteFields, NotionConfig, NotionPageRequest, NotionPublisher, PublishOutcome, SkipReason,
};
pub use text::{extract_json_object, normalize};
