use crate::canvas::text;
use crate::model::{Caption, Scene};

/// Derive per-scene captions; called only after a successful video.
/// Text is truncated the same way the on-canvas caption is, so the two
/// never disagree.
pub fn build(scenes: &[Scene]) -> Vec<Caption> {
    scenes
        .iter()
        .map(|scene| Caption {
            scene_id: scene.scene_id,
            text: text::truncate(&scene.text, text::CAPTION_MAX_CHARS),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_caption_per_scene_in_order() {
        let scenes = vec![Scene::new(0, "First"), Scene::new(1, "Second")];
        let captions = build(&scenes);

        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].scene_id, 0);
        assert_eq!(captions[0].text, "First");
        assert_eq!(captions[1].scene_id, 1);
    }

    #[test]
    fn test_caption_text_is_truncated() {
        let long = "x".repeat(500);
        let captions = build(&[Scene::new(0, long)]);
        assert_eq!(captions[0].text.chars().count(), 200);
    }
}
