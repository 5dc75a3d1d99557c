use crate::model::VideoBrief;

/// Maximum number of description sentences carried into the script;
/// keeps shorts short.
const MAX_BODY_SENTENCES: usize = 5;

/// Turns a brief into the narration script
pub struct ScriptWriter;

impl ScriptWriter {
    /// Compose the full script: opening, body sentences from the
    /// description, and a tone-dependent closing line.
    pub fn compose(brief: &VideoBrief) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!("Welcome to {}", brief.topic));

        parts.extend(
            Self::split_sentences(&brief.description)
                .into_iter()
                .take(MAX_BODY_SENTENCES),
        );

        parts.push(Self::closing_line(&brief.tone).to_string());

        format!("{}.", parts.join(". "))
    }

    /// Split free-form text into sentences, treating '!' and '?' as
    /// sentence terminators.
    pub fn split_sentences(text: &str) -> Vec<String> {
        text.replace(['!', '?'], ".")
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn closing_line(tone: &str) -> &'static str {
        match tone.to_lowercase().as_str() {
            "motivational" => "You can achieve great things",
            "informative" => "Now you know more about this topic",
            "storytelling" => "And that's the story",
            _ => "Thanks for watching",
        }
    }
}
