use std::fmt;

use serde::{Deserialize, Serialize};

/// Listening-difficulty label written to the Notion multi-select column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Words linked together in connected speech
    Liaison,
    /// Flapped t/d (e.g., "water" -> "wader")
    Flapping,
    /// Unfamiliar words or idioms
    Vocabulary,
    /// Grammatical structure hard to follow by ear
    Grammar,
    /// Delivery too fast to segment
    Speed,
    /// Analysis failed; not a listening category
    Error,
}

impl Category {
    /// Labels the model output is matched against, in priority order
    pub const LISTENING: [Category; 5] = [
        Category::Liaison,
        Category::Flapping,
        Category::Vocabulary,
        Category::Grammar,
        Category::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Liaison => "Liaison",
            Category::Flapping => "Flapping",
            Category::Vocabulary => "Vocabulary",
            Category::Grammar => "Grammar",
            Category::Speed => "Speed",
            Category::Error => "Error",
        }
    }

    /// Map a free-text model label onto the closed taxonomy.
    ///
    /// Case-insensitive substring match, first listed label wins, anything
    /// unrecognised falls back to `Vocabulary`.
    pub fn from_model_label(raw: &str) -> Category {
        let raw = raw.to_lowercase();
        Self::LISTENING
            .into_iter()
            .find(|c| raw.contains(&c.as_str().to_lowercase()))
            .unwrap_or(Category::Vocabulary)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one listening analysis; failures are carried as `Category::Error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: Category,
    pub analysis: String,
}

impl AnalysisResult {
    pub fn new(category: Category, analysis: impl Into<String>) -> Self {
        Self {
            category,
            analysis: analysis.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Category::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.category == Category::Error
    }
}
