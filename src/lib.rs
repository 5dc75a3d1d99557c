pub mod assembler;
pub mod audio;
pub mod canvas;
pub mod captions;
pub mod config;
pub mod model;
pub mod narration;
pub mod pipeline;
pub mod planner;
pub mod progress;
pub mod script;

pub use assembler::ClipAssembler;
pub use canvas::SceneComposer;
pub use config::AppConfig;
pub use model::{Caption, Scene, VideoBrief};
pub use narration::{EspeakEngine, NarrationSynthesizer, SpeechEngine};
pub use pipeline::Pipeline;
pub use planner::ScenePlanner;
pub use progress::{MemorySink, NdjsonSink, ProgressEvent, ProgressSink, TerminalFrame};
pub use script::ScriptWriter;
