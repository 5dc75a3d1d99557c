use crate::model::Scene;
use anyhow::Result;
use regex::Regex;

/// Seconds of narration a single scene is budgeted for
const SECONDS_PER_SCENE: u32 = 5;

/// Splits a script into ordered scenes sized to the target duration
pub struct ScenePlanner;

impl ScenePlanner {
    /// Plan scenes for the given script. Scene ids are assigned 0.. in
    /// script order; later stages rely on that ordering.
    pub fn plan(script: &str, target_duration: u32) -> Result<Vec<Scene>> {
        let sentences = Self::sentences(script);
        if sentences.is_empty() {
            anyhow::bail!("Script contains no sentences to plan scenes from");
        }

        let scene_count = (target_duration / SECONDS_PER_SCENE)
            .max(1)
            .min(sentences.len() as u32) as usize;

        // Contiguous, as-even-as-possible distribution: the first
        // `remainder` scenes take one extra sentence.
        let base = sentences.len() / scene_count;
        let remainder = sentences.len() % scene_count;

        let mut scenes = Vec::with_capacity(scene_count);
        let mut cursor = 0;
        for scene_id in 0..scene_count {
            let take = if scene_id < remainder { base + 1 } else { base };
            let chunk = &sentences[cursor..cursor + take];
            cursor += take;
            scenes.push(Scene::new(scene_id, format!("{}.", chunk.join(". "))));
        }

        Ok(scenes)
    }

    fn sentences(script: &str) -> Vec<String> {
        let boundary = Regex::new(r"[.!?]").expect("valid sentence regex");
        boundary
            .split(script)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
