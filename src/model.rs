use serde::{Deserialize, Serialize};

/// Inbound request describing the video to generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoBrief {
    pub topic: String,
    #[serde(default)]
    pub description: String,
    /// Target video length in seconds
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Free-form; "motivational", "informative" and "storytelling" get
    /// dedicated closing lines, anything else falls back to the default
    #[serde(default)]
    pub tone: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for VideoBrief {
    fn default() -> Self {
        Self {
            topic: String::new(),
            description: String::new(),
            duration: default_duration(),
            tone: String::new(),
            voice: default_voice(),
            language: default_language(),
        }
    }
}

fn default_duration() -> u32 {
    30
}

fn default_voice() -> String {
    "female".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// One narrated segment of the video
///
/// `scene_id` is assigned in planning order and defines both narration
/// order and timeline order downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub scene_id: usize,
    pub text: String,
}

impl Scene {
    pub fn new(scene_id: usize, text: impl Into<String>) -> Self {
        Self {
            scene_id,
            text: text.into(),
        }
    }
}

/// Per-scene caption record, produced after a successful video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    pub scene_id: usize,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_deserialization() {
        let json = r#"
        {
            "topic": "Coffee",
            "description": "Coffee is great. It wakes you up.",
            "duration": 30,
            "tone": "motivational",
            "voice": "female",
            "language": "en"
        }
        "#;

        let brief: VideoBrief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.topic, "Coffee");
        assert_eq!(brief.duration, 30);
        assert_eq!(brief.tone, "motivational");
    }

    #[test]
    fn test_brief_defaults() {
        let json = r#"{"topic": "Space"}"#;
        let brief: VideoBrief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.description, "");
        assert_eq!(brief.duration, 30);
        assert_eq!(brief.voice, "female");
        assert_eq!(brief.language, "en");
    }

    #[test]
    fn test_scene_roundtrip() {
        let scene = Scene::new(2, "Coffee wakes you up");
        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains("\"scene_id\":2"));

        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scene_id, 2);
        assert_eq!(back.text, "Coffee wakes you up");
    }
}
