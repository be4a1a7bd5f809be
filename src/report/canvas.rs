//! Drawing surface used by the page composer
//!
//! Coordinates are page points with the origin at the bottom left, y growing
//! upwards, as in PDF. Backends convert to their own coordinate system.

use serde::Serialize;

/// A4 page width in points
pub const A4_WIDTH: f64 = 595.2755905511812;

/// A4 page height in points
pub const A4_HEIGHT: f64 = 841.8897637795277;

/// Standard fonts used on the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl Font {
    pub fn family(&self) -> &'static str {
        match self {
            Font::Helvetica | Font::HelveticaBold | Font::HelveticaOblique => {
                "Helvetica, Arial, sans-serif"
            }
            Font::Courier => "Courier, 'Courier New', monospace",
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Font::HelveticaBold)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, Font::HelveticaOblique)
    }

    /// Advance width of a string in points
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = match self {
            Font::Courier => text.chars().map(|_| 600).sum(),
            // Bold and oblique faces share the regular advance widths closely
            // enough for aligning a handful of labels
            _ => text.chars().map(helvetica_width).sum(),
        };
        f64::from(units) * size / 1000.0
    }
}

/// Helvetica advance widths in 1/1000 em for printable ASCII
fn helvetica_width(c: char) -> u32 {
    const WIDTHS: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
        278, 278, 584, 584, 584, 556, 1015, // :..@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
        278, 278, 278, 469, 556, 333, // [..`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
        334, 260, 334, 584, // {..~
    ];
    let code = c as u32;
    if (32..127).contains(&code) {
        u32::from(WIDTHS[(code - 32) as usize])
    } else {
        556
    }
}

/// RGB colour with components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form
    pub fn hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Point of an image that its coordinates refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    BottomLeft,
    Center,
}

/// Vector drawing surface
pub trait Canvas {
    /// Switch the font for following text
    fn set_font(&mut self, font: Font, size: f64);

    /// Advance width of `text` in the given font
    fn text_width(&self, text: &str, font: Font, size: f64) -> f64 {
        font.text_width(text, size)
    }

    /// Text starting at `x`
    fn draw_string(&mut self, x: f64, y: f64, text: &str);

    /// Text ending at `x`
    fn draw_right_string(&mut self, x: f64, y: f64, text: &str);

    fn set_line_width(&mut self, width: f64);

    fn set_stroke_color(&mut self, color: Color);

    /// Colour used for text
    fn set_fill_color(&mut self, color: Color);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Raster image scaled to `width` × `height`, positioned by `anchor`
    fn draw_image(&mut self, href: &str, x: f64, y: f64, width: f64, height: f64, anchor: Anchor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(Font::Courier.text_width("Empty Weight", 12.0), 86.4);
        assert_eq!(Font::Courier.text_width("106.805 cm", 12.0), 72.0);
        assert_eq!(Font::Courier.text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_helvetica_widths() {
        // R 722, e 556, d 556, space 278, l 222, i 222, n 556, e 556
        assert_eq!(Font::Helvetica.text_width("Red line", 1000.0), 3668.0);
        assert_eq!(Font::Helvetica.text_width("é", 1000.0), 556.0);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::BLACK.hex(), "#000000");
        assert_eq!(Color::RED.hex(), "#ff0000");
        assert_eq!(Color::rgb(0.5, 2.0, -1.0).hex(), "#80ff00");
    }
}
