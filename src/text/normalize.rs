use std::sync::OnceLock;

use regex::Regex;

fn sound_tag_regex() -> &'static Regex {
    static SOUND_TAG_RE: OnceLock<Regex> = OnceLock::new();
    SOUND_TAG_RE.get_or_init(|| Regex::new(r"\[sound:.*?\]").expect("sound tag regex must compile"))
}

fn markup_tag_regex() -> &'static Regex {
    static MARKUP_TAG_RE: OnceLock<Regex> = OnceLock::new();
    MARKUP_TAG_RE.get_or_init(|| Regex::new(r"<.*?>").expect("markup tag regex must compile"))
}

/// Clean a raw note field into plain text.
///
/// Order matters: sound markers are removed first, then entities are decoded
/// (so `&lt;b&gt;` becomes a tag and is stripped), then NBSPs, tags and
/// whitespace runs.
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let raw = match raw.into() {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };

    let text = sound_tag_regex().replace_all(raw, "");
    let text = html_escape::decode_html_entities(&text);
    let text = text.replace('\u{a0}', " ");
    let text = markup_tag_regex().replace_all(&text, "");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_markup() {
        assert_eq!(normalize("<b>Hi</b>&nbsp;there  [sound:x.mp3]"), "Hi there");
    }

    #[test]
    fn test_empty_and_none() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(None::<&str>), "");
        assert_eq!(normalize("   \n\t "), "");
        assert_eq!(normalize("[sound:only.mp3]"), "");
    }

    #[test]
    fn test_entities_and_apostrophes() {
        assert_eq!(normalize("I&#39;d like a cup of tea."), "I'd like a cup of tea.");
        assert_eq!(normalize("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(normalize("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn test_encoded_tags_are_stripped() {
        assert_eq!(normalize("&lt;i&gt;quoted&lt;/i&gt; text"), "quoted text");
    }

    #[test]
    fn test_multiple_sound_tags_and_breaks() {
        let raw = "[sound:a.mp3]First line<br>second&nbsp;line<div>third</div>[sound:b.mp3]";
        assert_eq!(normalize(raw), "First linesecond linethird");

        let raw = "First line<br> second line\n\nthird";
        assert_eq!(normalize(raw), "First line second line third");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "<b>Hi</b>&nbsp;there  [sound:x.mp3]",
            "  I&#39;d <i>like</i>\n a cup of tea.  ",
            "お茶が<span style=\"color: red\">欲しい</span>です。",
            "plain text",
            "",
            "[sound:a.mp3][sound:b.mp3]",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(once.as_str()), once, "not idempotent for {:?}", sample);
        }
    }
}
