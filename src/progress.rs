use crate::model::{Caption, Scene};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Number of counted pipeline steps (captions run after step 5 without
/// being counted)
pub const TOTAL_STEPS: u32 = 5;

/// A single step-status message emitted during pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub step: u32,
    pub total: u32,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(step: u32, message: impl Into<String>) -> Self {
        Self {
            step,
            total: TOTAL_STEPS,
            message: message.into(),
        }
    }
}

/// Terminal frame of the event stream; emitted exactly once, always last
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TerminalFrame {
    Success {
        done: bool,
        success: bool,
        script: String,
        scenes: Vec<Scene>,
        video_url: String,
        captions: Vec<Caption>,
    },
    Failure {
        done: bool,
        success: bool,
        error: String,
    },
}

impl TerminalFrame {
    pub fn success(
        script: String,
        scenes: Vec<Scene>,
        video_url: String,
        captions: Vec<Caption>,
    ) -> Self {
        Self::Success {
            done: true,
            success: true,
            script,
            scenes,
            video_url,
            captions,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            done: true,
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Consumer of pipeline events. The pipeline hands every event over
/// before starting the corresponding stage's work, so implementations
/// must not buffer past the call.
pub trait ProgressSink {
    fn progress(&mut self, event: &ProgressEvent) -> Result<()>;
    fn finished(&mut self, frame: &TerminalFrame) -> Result<()>;
}

/// Writes newline-delimited JSON frames, flushing after every event
pub struct NdjsonSink<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_frame<T: Serialize>(&mut self, frame: &T) -> Result<()> {
        let line = serde_json::to_string(frame).context("Failed to serialize event frame")?;
        writeln!(self.writer, "{}", line).context("Failed to write event frame")?;
        self.writer.flush().context("Failed to flush event frame")
    }
}

impl<W: Write> ProgressSink for NdjsonSink<W> {
    fn progress(&mut self, event: &ProgressEvent) -> Result<()> {
        self.write_frame(event)
    }

    fn finished(&mut self, frame: &TerminalFrame) -> Result<()> {
        self.write_frame(frame)
    }
}

/// Collects frames in memory; useful for embedding and for tests
#[derive(Default)]
pub struct MemorySink {
    pub events: Vec<ProgressEvent>,
    pub terminal: Option<TerminalFrame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for MemorySink {
    fn progress(&mut self, event: &ProgressEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn finished(&mut self, frame: &TerminalFrame) -> Result<()> {
        self.terminal = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_json_shape() {
        let event = ProgressEvent::new(3, "Creating 4 visuals...");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"step":3,"total":5,"message":"Creating 4 visuals..."}"#
        );
    }

    #[test]
    fn test_failure_frame_json_shape() {
        let frame = TerminalFrame::failure("Failed to generate video");
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(
            json,
            r#"{"done":true,"success":false,"error":"Failed to generate video"}"#
        );
    }

    #[test]
    fn test_success_frame_json_shape() {
        let frame = TerminalFrame::success(
            "Welcome to Coffee.".to_string(),
            vec![Scene::new(0, "Welcome to Coffee")],
            "http://localhost:8000/static/videos/final_video.mp4".to_string(),
            vec![Caption {
                scene_id: 0,
                text: "Welcome to Coffee".to_string(),
            }],
        );
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains(r#""done":true"#));
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""video_url""#));
        assert!(json.contains(r#""captions""#));
    }

    #[test]
    fn test_ndjson_sink_writes_one_line_per_frame() {
        let mut buffer = Vec::new();
        {
            let mut sink = NdjsonSink::new(&mut buffer);
            sink.progress(&ProgressEvent::new(1, "Writing your script..."))
                .unwrap();
            sink.finished(&TerminalFrame::failure("boom")).unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Writing your script..."));
        assert!(lines[1].contains("boom"));
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.progress(&ProgressEvent::new(1, "a")).unwrap();
        sink.progress(&ProgressEvent::new(2, "b")).unwrap();
        sink.finished(&TerminalFrame::failure("x")).unwrap();

        assert_eq!(sink.events.len(), 2);
        assert_eq!(sink.events[0].step, 1);
        assert_eq!(sink.events[1].step, 2);
        assert!(!sink.terminal.unwrap().is_success());
    }
}
