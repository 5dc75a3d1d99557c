use crate::canvas::Frame;

/// Raster primitives used by the scene composer
pub struct Draw;

impl Draw {
    /// Vertical linear gradient across the full frame height
    pub fn vertical_gradient(frame: &mut Frame, top: [u8; 3], bottom: [u8; 3]) {
        let (width, height) = frame.dimensions();

        for y in 0..height {
            let ratio = y as f32 / height as f32;
            let color = [
                (top[0] as f32 * (1.0 - ratio) + bottom[0] as f32 * ratio) as u8,
                (top[1] as f32 * (1.0 - ratio) + bottom[1] as f32 * ratio) as u8,
                (top[2] as f32 * (1.0 - ratio) + bottom[2] as f32 * ratio) as u8,
                255,
            ];
            for x in 0..width {
                frame.set_pixel(x, y, color);
            }
        }
    }

    /// Fill rectangle, alpha-blended and clipped to the frame
    pub fn fill_rect(frame: &mut Frame, x: i32, y: i32, width: u32, height: u32, color: [u8; 4]) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                frame.blend_pixel_signed(x + dx, y + dy, color);
            }
        }
    }

    /// Fill circle, alpha-blended and clipped to the frame
    pub fn fill_circle(frame: &mut Frame, cx: i32, cy: i32, radius: i32, color: [u8; 4]) {
        let r_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r_sq {
                    frame.blend_pixel_signed(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Straight line between two points with a vertical stroke width
    pub fn stroke_line(
        frame: &mut Frame,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        width: u32,
        color: [u8; 4],
    ) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = x0 + ((x1 - x0) as f32 * t) as i32;
            let y = y0 + ((y1 - y0) as f32 * t) as i32;
            for off in 0..width as i32 {
                frame.blend_pixel_signed(x, y + off, color);
            }
        }
    }

    /// Rounded rectangle, alpha-blended
    pub fn fill_rounded_rect(
        frame: &mut Frame,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: i32,
        color: [u8; 4],
    ) {
        let w = width as i32;
        let h = height as i32;
        let r_sq = radius * radius;

        for dy in 0..h {
            for dx in 0..w {
                // Distance check only applies inside the corner squares
                let corner_dx = if dx < radius {
                    radius - dx
                } else if dx >= w - radius {
                    dx - (w - 1 - radius)
                } else {
                    0
                };
                let corner_dy = if dy < radius {
                    radius - dy
                } else if dy >= h - radius {
                    dy - (h - 1 - radius)
                } else {
                    0
                };

                if corner_dx * corner_dx + corner_dy * corner_dy <= r_sq {
                    frame.blend_pixel_signed(x + dx, y + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let mut frame = Frame::new(10, 100);
        Draw::vertical_gradient(&mut frame, [0, 0, 0], [200, 100, 0]);

        // Top row is exactly the start color
        assert_eq!(frame.get_pixel(5, 0), Some([0, 0, 0, 255]));

        // Bottom row is within one lerp step of the end color
        let bottom = frame.get_pixel(5, 99).unwrap();
        assert!(bottom[0] >= 198);
        assert!(bottom[1] >= 99);
    }

    #[test]
    fn test_gradient_is_monotonic() {
        let mut frame = Frame::new(4, 50);
        Draw::vertical_gradient(&mut frame, [0, 0, 0], [255, 255, 255]);

        let mut prev = 0;
        for y in 0..50 {
            let value = frame.get_pixel(0, y).unwrap()[0];
            assert!(value >= prev);
            prev = value;
        }
    }

    #[test]
    fn test_fill_rect() {
        let mut frame = Frame::new(100, 100);
        frame.clear([0, 0, 0, 255]);

        Draw::fill_rect(&mut frame, 10, 10, 20, 20, [255, 0, 0, 255]);

        assert_eq!(frame.get_pixel(15, 15), Some([255, 0, 0, 255]));
        assert_eq!(frame.get_pixel(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_circle_clips_at_edges() {
        let mut frame = Frame::new(50, 50);
        frame.clear([0, 0, 0, 255]);

        // Center outside the frame; only the overlapping arc lands
        Draw::fill_circle(&mut frame, -10, 25, 20, [255, 255, 255, 255]);

        assert_eq!(frame.get_pixel(5, 25), Some([255, 255, 255, 255]));
        assert_eq!(frame.get_pixel(30, 25), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_rounded_rect_skips_corner_pixels() {
        let mut frame = Frame::new(100, 100);
        frame.clear([0, 0, 0, 255]);

        Draw::fill_rounded_rect(&mut frame, 0, 0, 60, 60, 20, [255, 255, 255, 255]);

        // Very corner stays background, center of edges is filled
        assert_eq!(frame.get_pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(frame.get_pixel(30, 0), Some([255, 255, 255, 255]));
        assert_eq!(frame.get_pixel(30, 30), Some([255, 255, 255, 255]));
    }
}
