use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A host-owned flashcard note, seen read-only
pub trait Note {
    /// Name of the note type (schema) this note belongs to
    fn note_type(&self) -> &str;

    /// Raw value of a named field, `None` if the note type has no such field
    fn field(&self, name: &str) -> Option<&str>;

    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Plain note carried over the host bridge as JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldNote {
    pub note_type: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl FieldNote {
    pub fn new(note_type: impl Into<String>) -> Self {
        Self {
            note_type: note_type.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Note for FieldNote {
    fn note_type(&self) -> &str {
        &self.note_type
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let note = FieldNote::new("Basic").with_field("Front", "hello").with_field("Back", "");
        assert_eq!(note.note_type(), "Basic");
        assert_eq!(note.field("Front"), Some("hello"));
        assert!(note.has_field("Back"));
        assert!(!note.has_field("Extra"));
    }

    #[test]
    fn test_deserialize_without_fields() {
        let note: FieldNote = serde_json::from_str(r#"{"note_type": "Cloze"}"#).unwrap();
        assert_eq!(note.note_type, "Cloze");
        assert!(note.fields.is_empty());
    }
}
