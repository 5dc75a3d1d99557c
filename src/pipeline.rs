use crate::assembler::ClipAssembler;
use crate::canvas::SceneComposer;
use crate::captions;
use crate::config::AppConfig;
use crate::model::VideoBrief;
use crate::narration::{EspeakEngine, NarrationSynthesizer, SpeechEngine};
use crate::planner::ScenePlanner;
use crate::progress::{ProgressEvent, ProgressSink, TerminalFrame};
use crate::script::ScriptWriter;
use anyhow::Result;
use std::fs;
use std::sync::Arc;

/// Five-stage orchestrator: script -> scenes -> images -> audio -> video,
/// with caption extraction after a successful video. Emits one progress
/// event per stage before doing that stage's work, and exactly one
/// terminal frame, always last.
pub struct Pipeline {
    config: AppConfig,
    engine: Arc<dyn SpeechEngine>,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        let engine = Arc::new(EspeakEngine::new(config.speech.command.clone()));
        Self { config, engine }
    }

    /// Swap the speech backend; used for embedding and tests
    pub fn with_engine(config: AppConfig, engine: Arc<dyn SpeechEngine>) -> Self {
        Self { config, engine }
    }

    /// Run the full pipeline. Any error anywhere is converted into a
    /// failure terminal frame; `Err` here means only that the sink
    /// itself could not accept frames.
    pub fn run(&self, brief: &VideoBrief, sink: &mut dyn ProgressSink) -> Result<()> {
        let frame = match self.execute(brief, sink) {
            Ok(frame) => frame,
            Err(e) => TerminalFrame::failure(format!("{:#}", e)),
        };
        sink.finished(&frame)
    }

    fn execute(&self, brief: &VideoBrief, sink: &mut dyn ProgressSink) -> Result<TerminalFrame> {
        // Step 1: Generate script
        sink.progress(&ProgressEvent::new(1, "Writing your script..."))?;
        let script = ScriptWriter::compose(brief);

        // Step 2: Create scenes
        sink.progress(&ProgressEvent::new(2, "Planning scenes..."))?;
        let scenes = ScenePlanner::plan(&script, brief.duration)?;

        // Step 3: Generate images
        sink.progress(&ProgressEvent::new(
            3,
            format!("Creating {} visuals...", scenes.len()),
        ))?;
        self.prepare_storage()?;
        let composer = SceneComposer::new(&self.config);
        let images = composer.render_all(&scenes);

        // Step 4: Generate narration
        sink.progress(&ProgressEvent::new(4, "Recording narration..."))?;
        let synthesizer =
            NarrationSynthesizer::new(self.config.audio_dir(), Arc::clone(&self.engine));
        let audio = synthesizer.synthesize_all(&scenes, &brief.voice, &brief.language);

        // Step 5: Build video
        sink.progress(&ProgressEvent::new(5, "Assembling your video..."))?;
        let assembler = ClipAssembler::new(&self.config);
        let video = assembler.assemble(&scenes, &images, &audio);

        Ok(match video {
            Some(_) => {
                // Caption extraction runs after the video; not a counted step
                let captions = captions::build(&scenes);
                TerminalFrame::success(script, scenes, self.config.video_url(), captions)
            }
            None => TerminalFrame::failure("Failed to generate video"),
        })
    }

    fn prepare_storage(&self) -> Result<()> {
        fs::create_dir_all(self.config.images_dir())?;
        fs::create_dir_all(self.config.audio_dir())?;
        fs::create_dir_all(self.config.videos_dir())?;
        Ok(())
    }
}
