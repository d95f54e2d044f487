use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ExtractError;

fn fence_regex() -> &'static Regex {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    FENCE_RE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence regex must compile")
    })
}

/// Remove markdown code fences, keeping their contents
pub fn strip_code_fences(text: &str) -> String {
    fence_regex().replace_all(text, "$1").into_owned()
}

/// Best-effort extraction of a JSON object from noisy model output.
///
/// Fences are stripped, then everything from the first `{` to the last `}`
/// (inclusive) is parsed. Braces inside string values can break this.
pub fn extract_json_object(text: &str) -> Result<Value, ExtractError> {
    let content = strip_code_fences(text);

    let start = content.find('{').ok_or(ExtractError::NoObject)?;
    let end = content.rfind('}').ok_or(ExtractError::NoObject)?;
    if end < start {
        return Err(ExtractError::NoObject);
    }

    Ok(serde_json::from_str(&content[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json() {
        let text = "```json\n{\"category\": \"Liaison\", \"analysis_ja\": \"連結\"}\n```";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["category"], "Liaison");
        assert_eq!(value["analysis_ja"], "連結");
    }

    #[test]
    fn test_bare_fence_and_surrounding_prose() {
        let text = "Sure! Here you go:\n```\n{\"category\": \"Speed\"}\n```\nHope it helps.";
        assert_eq!(extract_json_object(text).unwrap()["category"], "Speed");
    }

    #[test]
    fn test_unfenced_with_noise() {
        let text = "Result => {\"category\": \"Grammar\", \"analysis_ja\": \"x\"} (end)";
        assert_eq!(extract_json_object(text).unwrap()["category"], "Grammar");
    }

    #[test]
    fn test_nested_object() {
        let text = "{\"category\": \"Flapping\", \"extra\": {\"k\": 1}}";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["extra"]["k"], 1);
    }

    #[test]
    fn test_no_braces() {
        assert!(matches!(
            extract_json_object("I cannot help with that."),
            Err(ExtractError::NoObject)
        ));
        assert!(matches!(extract_json_object(""), Err(ExtractError::NoObject)));
    }

    #[test]
    fn test_reversed_braces() {
        assert!(matches!(
            extract_json_object("} nothing here {"),
            Err(ExtractError::NoObject)
        ));
    }

    #[test]
    fn test_invalid_json_between_braces() {
        assert!(matches!(
            extract_json_object("{category: Liaison}"),
            Err(ExtractError::Invalid(_))
        ));
    }

    #[test]
    fn test_trailing_brace_in_prose_breaks_parse() {
        // last `}` belongs to the prose, so the slice is not valid JSON
        let text = "{\"category\": \"Speed\"} and a stray }";
        assert!(matches!(extract_json_object(text), Err(ExtractError::Invalid(_))));
    }
}
