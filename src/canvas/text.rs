use crate::canvas::{Draw, Frame};
use fontdue::{Font, FontSettings};
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

/// Caption source text is capped at this many grapheme clusters
pub const CAPTION_MAX_CHARS: usize = 200;

/// Word-wrap column width for the caption block
pub const WRAP_COLUMNS: usize = 28;

/// Fonts tried when no explicit path is configured
const SYSTEM_FONTS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Truncate to at most `max` grapheme clusters
pub fn truncate(text: &str, max: usize) -> String {
    text.graphemes(true).take(max).collect()
}

/// Greedy word wrap at `columns` characters per line. Words longer than
/// a full line are split at the column boundary.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.graphemes(true).count();

        if word_len > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunk = String::new();
            for g in word.graphemes(true) {
                if chunk.graphemes(true).count() == columns {
                    lines.push(std::mem::take(&mut chunk));
                }
                chunk.push_str(g);
            }
            current = chunk;
            continue;
        }

        let current_len = current.graphemes(true).count();
        if current.is_empty() {
            current.push_str(word);
        } else if current_len + 1 + word_len <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rasterizes caption text onto a frame. Prefers a real TTF; when none
/// can be loaded it degrades to solid per-character blocks so a missing
/// font never fails a scene.
pub struct TextPainter {
    font: Option<Font>,
}

impl TextPainter {
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        candidates.extend(SYSTEM_FONTS.iter().map(PathBuf::from));

        for candidate in &candidates {
            if let Ok(bytes) = std::fs::read(candidate) {
                if let Ok(font) = Font::from_bytes(bytes, FontSettings::default()) {
                    return Self { font: Some(font) };
                }
            }
        }

        eprintln!("Warning: no usable font found, falling back to block glyphs");
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Pixel width the text occupies at the given size
    pub fn measure(&self, text: &str, px: f32) -> u32 {
        match &self.font {
            Some(font) => text
                .chars()
                .map(|c| font.metrics(c, px).advance_width)
                .sum::<f32>()
                .ceil() as u32,
            None => (text.chars().count() as f32 * px * 0.6).ceil() as u32,
        }
    }

    /// Draw one line of text with its top-left corner at (x, y)
    pub fn draw(&self, frame: &mut Frame, text: &str, x: i32, y: i32, px: f32, color: [u8; 4]) {
        match &self.font {
            Some(font) => Self::draw_glyphs(font, frame, text, x, y, px, color),
            None => Self::draw_blocks(frame, text, x, y, px, color),
        }
    }

    fn draw_glyphs(
        font: &Font,
        frame: &mut Frame,
        text: &str,
        x: i32,
        y: i32,
        px: f32,
        color: [u8; 4],
    ) {
        let ascent = font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8);
        let baseline = y + ascent.round() as i32;
        let mut pen_x = x as f32;

        for c in text.chars() {
            let (metrics, bitmap) = font.rasterize(c, px);

            let glyph_x = (pen_x + metrics.xmin as f32).round() as i32;
            let glyph_y = baseline - metrics.height as i32 - metrics.ymin;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (coverage as u32 * color[3] as u32 / 255) as u8;
                    frame.blend_pixel_signed(
                        glyph_x + col as i32,
                        glyph_y + row as i32,
                        [color[0], color[1], color[2], alpha],
                    );
                }
            }

            pen_x += metrics.advance_width;
        }
    }

    /// Built-in fallback: one filled block per visible character
    fn draw_blocks(frame: &mut Frame, text: &str, x: i32, y: i32, px: f32, color: [u8; 4]) {
        let advance = (px * 0.6) as i32;
        let block_w = (px * 0.5) as u32;
        let block_h = (px * 0.62) as u32;
        let top = y + (px * 0.2) as i32;

        let mut pen_x = x;
        for c in text.chars() {
            if !c.is_whitespace() {
                Draw::fill_rect(frame, pen_x, top, block_w, block_h, color);
            }
            pen_x += advance;
        }
    }
}
