use crate::audio;
use crate::config::AppConfig;
use crate::model::Scene;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Ephemeral pairing of one scene's image and narration; exists only
/// while the final video is being assembled
#[derive(Debug, Clone)]
pub struct SceneClip {
    pub scene_id: usize,
    pub image: PathBuf,
    pub audio: PathBuf,
    /// Seconds the image stays on screen; always the measured audio
    /// length, never derived from the image
    pub duration: f64,
}

/// Builds the final video from per-scene images and narration using an
/// external FFmpeg process
pub struct ClipAssembler {
    fps: u32,
    width: u32,
    height: u32,
    videos_dir: PathBuf,
    filename: String,
}

impl ClipAssembler {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            fps: config.video.fps,
            width: config.canvas.width,
            height: config.canvas.height,
            videos_dir: config.videos_dir(),
            filename: config.video.filename.clone(),
        }
    }

    /// Check if FFmpeg is available
    pub fn is_ffmpeg_available() -> bool {
        Command::new("ffmpeg").arg("-version").output().is_ok()
    }

    /// Assemble all surviving scene pairs into one video. Any failure is
    /// caught here and reported as `None`; the orchestrator treats that
    /// as a terminal pipeline failure.
    pub fn assemble(
        &self,
        scenes: &[Scene],
        images: &[Option<PathBuf>],
        audio: &[Option<PathBuf>],
    ) -> Option<PathBuf> {
        match self.try_assemble(scenes, images, audio) {
            Ok(path) => Some(path),
            Err(e) => {
                eprintln!("Error building video: {:#}", e);
                None
            }
        }
    }

    fn try_assemble(
        &self,
        scenes: &[Scene],
        images: &[Option<PathBuf>],
        audio: &[Option<PathBuf>],
    ) -> Result<PathBuf> {
        if !Self::is_ffmpeg_available() {
            anyhow::bail!("FFmpeg not found. Please install ffmpeg to enable video assembly.");
        }

        let clips = Self::collect_clips(scenes, images, audio);
        if clips.is_empty() {
            anyhow::bail!("No valid scene pairs were created");
        }

        let segments: Vec<PathBuf> = clips
            .iter()
            .map(|clip| self.videos_dir.join(format!("segment_{}.mp4", clip.scene_id)))
            .collect();
        let concat_list = self.videos_dir.join("concat.txt");

        let result = self.encode(&clips, &segments, &concat_list);

        // Intermediate segments and the concat list are removed on both
        // success and failure paths
        for segment in &segments {
            let _ = fs::remove_file(segment);
        }
        let _ = fs::remove_file(&concat_list);

        result
    }

    /// Pair each scene's assets, skipping scenes whose image or audio is
    /// absent or missing on disk. Duration comes from measuring the
    /// audio asset. Order follows the scene list.
    pub fn collect_clips(
        scenes: &[Scene],
        images: &[Option<PathBuf>],
        audio: &[Option<PathBuf>],
    ) -> Vec<SceneClip> {
        let mut clips = Vec::new();

        for (idx, scene) in scenes.iter().enumerate() {
            let image = match images.get(idx).and_then(|p| p.as_ref()) {
                Some(p) if p.exists() => p.clone(),
                _ => {
                    eprintln!("Warning: image missing for scene {}, skipping", scene.scene_id);
                    continue;
                }
            };
            let audio_path = match audio.get(idx).and_then(|p| p.as_ref()) {
                Some(p) if p.exists() => p.clone(),
                _ => {
                    eprintln!("Warning: audio missing for scene {}, skipping", scene.scene_id);
                    continue;
                }
            };

            let duration = match audio::duration_seconds(&audio_path) {
                Ok(d) if d > 0.0 => d,
                Ok(_) => {
                    eprintln!("Warning: empty audio for scene {}, skipping", scene.scene_id);
                    continue;
                }
                Err(e) => {
                    eprintln!(
                        "Warning: cannot measure audio for scene {}: {:#}, skipping",
                        scene.scene_id, e
                    );
                    continue;
                }
            };

            clips.push(SceneClip {
                scene_id: scene.scene_id,
                image,
                audio: audio_path,
                duration,
            });
        }

        clips
    }

    fn encode(&self, clips: &[SceneClip], segments: &[PathBuf], concat_list: &Path) -> Result<PathBuf> {
        let mut listing = String::new();

        for (clip, segment) in clips.iter().zip(segments) {
            self.encode_segment(clip, segment)?;
            let absolute = segment
                .canonicalize()
                .with_context(|| format!("Failed to resolve segment path: {}", segment.display()))?;
            listing.push_str(&format!("file '{}'\n", absolute.display()));
            eprintln!(
                "Added scene {} to video (duration: {:.2}s)",
                clip.scene_id, clip.duration
            );
        }

        fs::write(concat_list, listing).context("Failed to write concat list")?;

        let output = self.videos_dir.join(&self.filename);
        self.concat_segments(concat_list, &output)?;
        Ok(output)
    }

    /// One still-image segment held for exactly the narration length.
    /// The scale/pad filter normalizes any minor dimension variance
    /// between images instead of requiring identical canvases.
    fn encode_segment(&self, clip: &SceneClip, segment: &Path) -> Result<()> {
        let filter = format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2",
            w = self.width,
            h = self.height
        );

        let output = Command::new("ffmpeg")
            .args([
                "-y",
                "-loop",
                "1",
                "-i",
                &clip.image.display().to_string(),
                "-i",
                &clip.audio.display().to_string(),
                "-vf",
                &filter,
                "-t",
                &clip.duration.to_string(),
                "-r",
                &self.fps.to_string(),
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
                "-shortest",
                &segment.display().to_string(),
            ])
            .output()
            .context("Failed to execute ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "FFmpeg segment encoding failed for scene {}: {}",
                clip.scene_id,
                stderr.trim()
            );
        }
        Ok(())
    }

    /// Concatenate all segments in scene order into the final output,
    /// overwriting any prior result at the same path
    fn concat_segments(&self, concat_list: &Path, output_path: &Path) -> Result<()> {
        let output = Command::new("ffmpeg")
            .args([
                "-y",
                "-f",
                "concat",
                "-safe",
                "0",
                "-i",
                &concat_list.display().to_string(),
                "-c",
                "copy",
                &output_path.display().to_string(),
            ])
            .output()
            .context("Failed to execute ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("FFmpeg concat failed: {}", stderr.trim());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_test_wav(path: &Path, seconds: f64) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..(seconds * 22050.0) as usize {
            writer.write_sample(((i % 100) as i16) * 20).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn fixture(temp: &TempDir, n: usize, seconds: f64) -> (Vec<Scene>, Vec<Option<PathBuf>>, Vec<Option<PathBuf>>) {
        let mut scenes = Vec::new();
        let mut images = Vec::new();
        let mut audio = Vec::new();
        for i in 0..n {
            let image = temp.path().join(format!("scene_{i}.png"));
            std::fs::write(&image, b"png bytes").unwrap();
            let wav = temp.path().join(format!("scene_{i}.wav"));
            write_test_wav(&wav, seconds);

            scenes.push(Scene::new(i, format!("Scene {i}")));
            images.push(Some(image));
            audio.push(Some(wav));
        }
        (scenes, images, audio)
    }

    #[test]
    fn test_collect_clips_pairs_all_scenes() {
        let temp = TempDir::new().unwrap();
        let (scenes, images, audio) = fixture(&temp, 3, 0.25);

        let clips = ClipAssembler::collect_clips(&scenes, &images, &audio);
        assert_eq!(clips.len(), 3);

        let ids: Vec<usize> = clips.iter().map(|c| c.scene_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_collect_clips_duration_comes_from_audio() {
        let temp = TempDir::new().unwrap();
        let (scenes, images, audio) = fixture(&temp, 2, 0.5);

        let clips = ClipAssembler::collect_clips(&scenes, &images, &audio);
        let total: f64 = clips.iter().map(|c| c.duration).sum();
        assert!((total - 1.0).abs() < 0.02, "got {total}");
    }

    #[test]
    fn test_collect_clips_skips_absent_audio_slot() {
        let temp = TempDir::new().unwrap();
        let (scenes, images, mut audio) = fixture(&temp, 3, 0.25);
        audio[1] = None;

        let clips = ClipAssembler::collect_clips(&scenes, &images, &audio);
        let ids: Vec<usize> = clips.iter().map(|c| c.scene_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_collect_clips_skips_missing_file_on_disk() {
        let temp = TempDir::new().unwrap();
        let (scenes, mut images, audio) = fixture(&temp, 2, 0.25);
        images[0] = Some(temp.path().join("deleted.png"));

        let clips = ClipAssembler::collect_clips(&scenes, &images, &audio);
        let ids: Vec<usize> = clips.iter().map(|c| c.scene_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_collect_clips_empty_when_nothing_survives() {
        let scenes = vec![Scene::new(0, "a"), Scene::new(1, "b")];
        let clips = ClipAssembler::collect_clips(&scenes, &[None, None], &[None, None]);
        assert!(clips.is_empty());
    }

    #[test]
    fn test_assemble_fails_with_zero_surviving_pairs() {
        let temp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.root = temp.path().to_path_buf();
        std::fs::create_dir_all(config.videos_dir()).unwrap();

        let assembler = ClipAssembler::new(&config);
        let scenes = vec![Scene::new(0, "a")];
        let result = assembler.assemble(&scenes, &[None], &[None]);
        assert!(result.is_none());
    }
}
