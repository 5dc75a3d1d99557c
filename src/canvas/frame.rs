use anyhow::{Context, Result};
use std::path::Path;

/// RGBA pixel buffer a scene is composed into
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA, 4 bytes per pixel
}

impl Frame {
    /// Create a new frame with given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height * 4) as usize;
        Self {
            width,
            height,
            pixels: vec![0; size],
        }
    }

    /// Clear the frame with a color
    pub fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    /// Set pixel at position
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            self.pixels[idx..idx + 4].copy_from_slice(&color);
        }
    }

    /// Get pixel at position
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            let mut pixel = [0u8; 4];
            pixel.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(pixel)
        } else {
            None
        }
    }

    /// Alpha blend a color onto the frame at position
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(bg) = self.get_pixel(x, y) {
            let alpha = color[3] as f32 / 255.0;
            let inv_alpha = 1.0 - alpha;

            let blended = [
                (color[0] as f32 * alpha + bg[0] as f32 * inv_alpha) as u8,
                (color[1] as f32 * alpha + bg[1] as f32 * inv_alpha) as u8,
                (color[2] as f32 * alpha + bg[2] as f32 * inv_alpha) as u8,
                255, // Output alpha is always opaque
            ];

            self.set_pixel(x, y, blended);
        }
    }

    /// Signed-coordinate blend; pixels outside the frame are dropped
    pub fn blend_pixel_signed(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x >= 0 && y >= 0 {
            self.blend_pixel(x as u32, y as u32, color);
        }
    }

    /// Get frame dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get raw pixel data
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Persist as PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .context("Frame buffer size does not match dimensions")?;
        img.save(path)
            .with_context(|| format!("Failed to save image: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(1080, 1920);
        assert_eq!(frame.dimensions(), (1080, 1920));
        assert_eq!(frame.pixels.len(), 1080 * 1920 * 4);
    }

    #[test]
    fn test_clear() {
        let mut frame = Frame::new(100, 100);
        frame.clear([255, 0, 0, 255]); // Red

        assert_eq!(frame.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(frame.get_pixel(50, 50), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut frame = Frame::new(100, 100);
        frame.set_pixel(10, 20, [100, 150, 200, 255]);

        assert_eq!(frame.get_pixel(10, 20), Some([100, 150, 200, 255]));
        assert_eq!(frame.get_pixel(100, 100), None); // Out of bounds
    }

    #[test]
    fn test_alpha_blending() {
        let mut frame = Frame::new(100, 100);
        frame.clear([255, 255, 255, 255]); // White background

        // Blend 50% transparent red
        frame.blend_pixel(50, 50, [255, 0, 0, 128]);

        let pixel = frame.get_pixel(50, 50).unwrap();
        // Should be approximately pink (255, 127, 127, 255)
        assert!(pixel[0] == 255);
        assert!(pixel[1] > 120 && pixel[1] < 135);
        assert!(pixel[2] > 120 && pixel[2] < 135);
    }

    #[test]
    fn test_signed_blend_clips_negative_coordinates() {
        let mut frame = Frame::new(10, 10);
        frame.clear([0, 0, 0, 255]);
        frame.blend_pixel_signed(-1, 5, [255, 255, 255, 255]);
        frame.blend_pixel_signed(5, -1, [255, 255, 255, 255]);
        assert_eq!(frame.get_pixel(0, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_save_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("frame.png");

        let mut frame = Frame::new(16, 16);
        frame.clear([10, 20, 30, 255]);
        frame.save_png(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (16, 16));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
