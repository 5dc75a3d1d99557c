use crate::canvas::{text, theme, Draw, Frame, TextPainter, Theme};
use crate::config::AppConfig;
use crate::model::Scene;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::path::PathBuf;

const BADGE_X: i32 = 80;
const BADGE_Y: i32 = 120;
const BADGE_WIDTH: u32 = 140;
const BADGE_HEIGHT: u32 = 80;

const CAPTION_LINE_HEIGHT: i32 = 70;
const CAPTION_FONT_PX: f32 = 52.0;
const BADGE_FONT_PX: f32 = 72.0;
const FOOTER_FONT_PX: f32 = 36.0;

const FALLBACK_GRAY: [u8; 4] = [100, 100, 100, 255];

/// Renders one still image per scene: gradient background, decorative
/// shapes, particles, scene badge, wrapped caption and footer.
pub struct SceneComposer {
    width: u32,
    height: u32,
    images_dir: PathBuf,
    painter: TextPainter,
}

impl SceneComposer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            images_dir: config.images_dir(),
            painter: TextPainter::load(config.canvas.font_path.as_deref()),
        }
    }

    /// Image location is a pure function of the scene id
    pub fn image_path(&self, scene_id: usize) -> PathBuf {
        self.images_dir.join(format!("scene_{}.png", scene_id))
    }

    /// Render every scene, in parallel, preserving scene order in the
    /// returned collection. A scene that cannot be rendered gets a
    /// neutral fallback image; `None` only when even that fails.
    pub fn render_all(&self, scenes: &[Scene]) -> Vec<Option<PathBuf>> {
        scenes
            .par_iter()
            .map(|scene| match self.render(scene) {
                Ok(path) => Some(path),
                Err(e) => {
                    eprintln!("Error rendering scene {}: {:#}", scene.scene_id, e);
                    self.render_fallback(scene)
                        .map_err(|e| {
                            eprintln!(
                                "Error writing fallback for scene {}: {:#}",
                                scene.scene_id, e
                            )
                        })
                        .ok()
                }
            })
            .collect()
    }

    /// Compose and persist a single scene image
    pub fn render(&self, scene: &Scene) -> Result<PathBuf> {
        let frame = self.compose(scene);
        let path = self.image_path(scene.scene_id);
        frame.save_png(&path)?;
        Ok(path)
    }

    /// Compose the full canvas for a scene. Pure with respect to the
    /// filesystem; decoration placement is seeded by the scene id so
    /// repeated renders of the same scene are identical.
    pub fn compose(&self, scene: &Scene) -> Frame {
        let theme = theme::for_scene(scene.scene_id);
        let mut rng = StdRng::seed_from_u64(scene.scene_id as u64);
        let mut frame = Frame::new(self.width, self.height);

        Draw::vertical_gradient(&mut frame, theme.bg_top, theme.bg_bottom);
        self.decorations(&mut frame, theme, &mut rng);
        self.particles(&mut frame, &mut rng);
        self.badge(&mut frame, scene.scene_id, theme);
        self.caption(&mut frame, &scene.text);
        self.footer(&mut frame);

        frame
    }

    fn decorations(&self, frame: &mut Frame, theme: &Theme, rng: &mut StdRng) {
        let [r, g, b] = theme.accent;
        let accent = [r, g, b, 40];

        // Large anchor circles in opposite corners
        Draw::fill_circle(frame, self.width as i32 - 100, 100, 300, accent);
        Draw::fill_circle(frame, 50, self.height as i32 - 150, 350, accent);

        // Smaller scattered accent circles
        for _ in 0..5 {
            let x = rng.gen_range(0..self.width) as i32;
            let y = rng.gen_range(0..self.height) as i32;
            let radius = rng.gen_range(25..75);
            let alpha = rng.gen_range(20..50);
            Draw::fill_circle(frame, x, y, radius, [r, g, b, alpha]);
        }

        // Faint diagonal lines
        for i in 0..3 {
            let y = 400 + i * 500;
            Draw::stroke_line(frame, 0, y, self.width as i32, y + 100, 2, [255, 255, 255, 15]);
        }
    }

    fn particles(&self, frame: &mut Frame, rng: &mut StdRng) {
        for _ in 0..30 {
            let x = rng.gen_range(0..self.width) as i32;
            let y = rng.gen_range(0..self.height) as i32;
            let radius = rng.gen_range(1..4);
            let alpha = rng.gen_range(100..200);
            Draw::fill_circle(frame, x, y, radius, [255, 255, 255, alpha]);
        }
    }

    /// Zero-padded scene number shown in the badge
    fn badge_label(scene_id: usize) -> String {
        format!("{:02}", scene_id)
    }

    fn badge(&self, frame: &mut Frame, scene_id: usize, theme: &Theme) {
        let [r, g, b] = theme.accent;
        Draw::fill_rounded_rect(
            frame,
            BADGE_X,
            BADGE_Y,
            BADGE_WIDTH,
            BADGE_HEIGHT,
            20,
            [r, g, b, 255],
        );

        let label = Self::badge_label(scene_id);
        let text_width = self.painter.measure(&label, BADGE_FONT_PX) as i32;
        let text_x = BADGE_X + (BADGE_WIDTH as i32 - text_width) / 2;
        let text_y = BADGE_Y + (BADGE_HEIGHT as i32 - BADGE_FONT_PX as i32) / 2;
        self.painter.draw(
            frame,
            &label,
            text_x,
            text_y,
            BADGE_FONT_PX,
            [255, 255, 255, 255],
        );
    }

    fn caption(&self, frame: &mut Frame, scene_text: &str) {
        let truncated = text::truncate(scene_text, text::CAPTION_MAX_CHARS);
        let lines = text::wrap(&truncated, text::WRAP_COLUMNS);
        if lines.is_empty() {
            return;
        }

        // Panel height scales with the wrapped line count
        let panel_height = lines.len() as i32 * CAPTION_LINE_HEIGHT + 100;
        let panel_y = self.height as i32 / 2 - panel_height / 2;
        Draw::fill_rounded_rect(
            frame,
            60,
            panel_y,
            self.width - 120,
            panel_height as u32,
            30,
            [20, 20, 30, 180],
        );

        let mut y = panel_y + 50;
        for line in &lines {
            // Shadow pass, then the legible white text on top
            self.painter
                .draw(frame, line, 104, y + 3, CAPTION_FONT_PX, [0, 0, 0, 150]);
            self.painter
                .draw(frame, line, 100, y, CAPTION_FONT_PX, [255, 255, 255, 255]);
            y += CAPTION_LINE_HEIGHT;
        }
    }

    fn footer(&self, frame: &mut Frame) {
        self.painter.draw(
            frame,
            "Clipify",
            self.width as i32 / 2 - 80,
            self.height as i32 - 120,
            FOOTER_FONT_PX,
            [255, 255, 255, 180],
        );
    }

    /// Neutral gray stand-in so the pipeline still has a visual for this
    /// scene
    fn render_fallback(&self, scene: &Scene) -> Result<PathBuf> {
        let mut frame = Frame::new(self.width, self.height);
        frame.clear(FALLBACK_GRAY);
        let path = self.image_path(scene.scene_id);
        frame.save_png(&path)?;
        Ok(path)
    }
}
