//! Braille Unicode canvas for high-resolution terminal graphics.
//!
//! Each character cell is a 2x4 pixel grid (8 dots, U+2800..U+28FF) carrying
//! one foreground color. Choropleth fills land first, border strokes after;
//! within a cell the last writer's color wins.

use ratatui::style::Color;

pub struct BrailleCanvas {
    width: usize,  // characters
    height: usize, // characters
    bits: Vec<u8>,
    colors: Vec<Option<Color>>,
}

impl BrailleCanvas {
    /// Canvas with the given character dimensions; effective pixel
    /// resolution is `width*2 x height*4`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![0u8; width * height],
            colors: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Set one pixel. Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => 0,
        };

        let idx = cy * self.width + cx;
        self.bits[idx] |= bit;
        self.colors[idx] = Some(color);
    }

    /// Signed-coordinate variant; negative coordinates are off-canvas.
    pub fn set_pixel_signed(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Character and color at a cell, `None` while the cell is empty.
    pub fn cell(&self, cx: usize, cy: usize) -> Option<(char, Color)> {
        if cx >= self.width || cy >= self.height {
            return None;
        }
        let idx = cy * self.width + cx;
        let bits = self.bits[idx];
        if bits == 0 {
            return None;
        }
        let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
        Some((ch, self.colors[idx].unwrap_or(Color::Reset)))
    }

    #[cfg(test)]
    fn glyphs(&self) -> String {
        (0..self.height)
            .map(|cy| {
                (0..self.width)
                    .map(|cx| self.cell(cx, cy).map(|(ch, _)| ch).unwrap_or('\u{2800}'))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, Color::White);
        assert_eq!(canvas.glyphs(), "⠁"); // U+2801
    }

    #[test]
    fn all_dots() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y, Color::White);
            }
        }
        assert_eq!(canvas.glyphs(), "⣿"); // U+28FF
    }

    #[test]
    fn diagonal() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pixel(0, 0, Color::White);
        canvas.set_pixel(1, 1, Color::White);
        canvas.set_pixel(2, 2, Color::White);
        canvas.set_pixel(3, 3, Color::White);
        // First char: (0,0) and (1,1) = 0x01 | 0x10 = 0x11
        // Second char: (0,2) and (1,3) = 0x04 | 0x80 = 0x84
        assert_eq!(canvas.glyphs(), "⠑⢄");
    }

    #[test]
    fn last_writer_wins_cell_color() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, Color::Red);
        canvas.set_pixel(1, 0, Color::Blue);
        let (_, color) = canvas.cell(0, 0).unwrap();
        assert_eq!(color, Color::Blue);
    }

    #[test]
    fn empty_cell_is_none() {
        let canvas = BrailleCanvas::new(2, 2);
        assert!(canvas.cell(0, 0).is_none());
        assert!(canvas.cell(5, 5).is_none());
    }
}
