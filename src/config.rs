use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub video: VideoConfig,
    pub speech: SpeechConfig,
    pub canvas: CanvasConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root for all generated assets; images/audio/videos live beneath it.
    /// Concurrent requests sharing a root will clobber each other's final
    /// video, so multi-tenant deployments should point each request at its
    /// own root (e.g. CLIPIFY_STORAGE__ROOT).
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoConfig {
    pub fps: u32,
    pub filename: String,
    /// Base URL the final video is advertised under in the terminal frame
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Text-to-speech command, expected to accept espeak-ng style arguments
    pub command: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Explicit TTF to use for caption text; when unset, common system
    /// fonts are tried and a built-in block painter is the last resort
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                root: PathBuf::from("static"),
            },
            video: VideoConfig {
                fps: 24,
                filename: "final_video.mp4".to_string(),
                base_url: "http://localhost:8000".to_string(),
            },
            speech: SpeechConfig {
                command: "espeak-ng".to_string(),
            },
            canvas: CanvasConfig {
                width: 1080,
                height: 1920,
                font_path: None,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("storage.root", "static")?
            .set_default("video.fps", 24)?
            .set_default("video.filename", "final_video.mp4")?
            .set_default("video.base_url", "http://localhost:8000")?
            .set_default("speech.command", "espeak-ng")?
            .set_default("canvas.width", 1080)?
            .set_default("canvas.height", 1920)?
            // Load from file if exists
            .add_source(config::File::with_name("clipify").required(false))
            // Allow env var overrides (e.g. CLIPIFY_VIDEO__BASE_URL=https://...)
            .add_source(config::Environment::with_prefix("CLIPIFY").separator("__"));

        builder.build()?.try_deserialize()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.storage.root.join("images")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.storage.root.join("audio")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.storage.root.join("videos")
    }

    pub fn video_path(&self) -> PathBuf {
        self.videos_dir().join(&self.video.filename)
    }

    pub fn video_url(&self) -> String {
        format!(
            "{}/{}",
            self.video.base_url.trim_end_matches('/'),
            self.video_path().display()
        )
    }
}
