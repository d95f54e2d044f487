/// Build the listening-coach prompt for a single sentence.
///
/// The model must not explain meaning and must answer with a JSON object
/// holding `category` and `analysis_ja`.
pub fn build_listening_prompt(sentence: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an expert English listening coach for Japanese learners.\n");
    prompt.push_str(&format!("Target English Phrase: '{}'\n\n", sentence));
    prompt.push_str(
        "Task: Analyze why a Japanese speaker might struggle to catch this phrase aurally.\n",
    );
    prompt.push_str("Constraints: 1. NO meaning/topic explanation. 2. Output ONLY JSON.\n");
    prompt.push_str(r#"JSON Format: {"category": "...", "analysis_ja": "..."}"#);

    prompt
}
