//! Drawing surface used by the renderer and the tools.

use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

use crate::glyphs::{GLYPH_SIZE, glyph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn pack(self) -> u32 {
        // 0RGB, the layout softbuffer presents
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Text sizes: the glyph cell is scaled by 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Small,
    Large,
}

impl Font {
    #[inline]
    fn scale(self) -> i32 {
        match self {
            Font::Small => 1,
            Font::Large => 2,
        }
    }

    #[inline]
    pub fn line_height(self) -> i32 {
        GLYPH_SIZE * self.scale()
    }
}

pub trait Canvas {
    fn size(&self) -> (i32, i32);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);

    /// Draw `text` with its top-left at (x, y), returning the size it took.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font, color: Color) -> (i32, i32);

    fn text_size(&self, text: &str, font: Font) -> (i32, i32) {
        let n = text.chars().count() as i32;
        (n * font.line_height(), font.line_height())
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x1, y1) = (x + w - 1, y + h - 1);
        self.draw_line(x, y, x1, y, color);
        self.draw_line(x, y1, x1, y1, color);
        self.draw_line(x, y, x, y1, color);
        self.draw_line(x1, y, x1, y1, color);
    }
}

/// CPU canvas backed by packed 0RGB pixels.
pub struct FrameBuffer {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let packed = color.pack();
        self.pixels
            .par_chunks_mut(self.width.max(1))
            .for_each(|row| row.fill(packed));
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = blend(self.pixels[idx], color);
    }
}

#[inline]
fn blend(dst: u32, src: Color) -> u32 {
    match src.a {
        255 => src.pack(),
        0 => dst,
        a => {
            let a = a as u32;
            let inv = 255 - a;
            let mix = |s: u8, shift: u32| ((s as u32 * a + ((dst >> shift) & 0xFF) * inv) / 255) << shift;
            mix(src.r, 16) | mix(src.g, 8) | mix(src.b, 0)
        }
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py, color);
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        // Bresenham, all octants
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font, color: Color) -> (i32, i32) {
        let scale = font.scale();
        let mut pen_x = x;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (bits >> col) & 1 == 1 {
                        self.fill_rect(
                            pen_x + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            pen_x += GLYPH_SIZE * scale;
        }
        (pen_x - x, font.line_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.fill_rect(-2, 2, 10, 10, Color::WHITE);
        assert_eq!(fb.pixel(0, 1), 0);
        assert_eq!(fb.pixel(3, 3), 0x00FF_FFFF);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_line(6, 1, 1, 5, Color::rgb(255, 0, 0));
        assert_eq!(fb.pixel(6, 1), 0x00FF_0000);
        assert_eq!(fb.pixel(1, 5), 0x00FF_0000);
    }

    #[test]
    fn translucent_colors_blend() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(Color::BLACK);
        fb.fill_rect(0, 0, 1, 1, Color::rgba(0, 255, 0, 51));
        assert_eq!(fb.pixel(0, 0), 51 << 8);
    }

    #[test]
    fn text_size_matches_drawn_size() {
        let mut fb = FrameBuffer::new(64, 16);
        let size = fb.draw_text(0, 0, "Hi", Font::Large, Color::WHITE);
        assert_eq!(size, (32, 16));
        assert_eq!(size, fb.text_size("Hi", Font::Large));
        assert!(fb.pixels.iter().any(|&p| p != 0));
    }
}
