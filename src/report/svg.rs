//! SVG backend for [`Canvas`]

use std::fmt::Write;

use crate::report::canvas::{Anchor, Canvas, Color, Font};

/// Collects drawing operations into an SVG document
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
    font: Font,
    font_size: f64,
    line_width: f64,
    stroke: Color,
    fill: Color,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            font: Font::Helvetica,
            font_size: 12.0,
            line_width: 1.0,
            stroke: Color::BLACK,
            fill: Color::BLACK,
        }
    }

    /// Page y (bottom up) to SVG y (top down)
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    fn text(&mut self, x: f64, y: f64, text: &str, anchor: &str) {
        let mut style = format!(
            r#"font-family="{}" font-size="{:.2}" fill="{}""#,
            self.font.family(),
            self.font_size,
            self.fill.hex()
        );
        if self.font.is_bold() {
            style.push_str(r#" font-weight="bold""#);
        }
        if self.font.is_italic() {
            style.push_str(r#" font-style="italic""#);
        }
        let y = self.flip(y);
        let _ = writeln!(
            self.body,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="{}" xml:space="preserve" {}>{}</text>"#,
            x,
            y,
            anchor,
            style,
            escape_xml(text)
        );
    }

    /// Complete SVG document
    pub fn finish(self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{:.2}pt" height="{:.2}pt" viewBox="0 0 {:.2} {:.2}">"#,
            self.width, self.height, self.width, self.height
        );
        let _ = writeln!(
            svg,
            r##"  <rect width="100%" height="100%" fill="#ffffff"/>"##
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn set_font(&mut self, font: Font, size: f64) {
        self.font = font;
        self.font_size = size;
    }

    fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        self.text(x, y, text, "start");
    }

    fn draw_right_string(&mut self, x: f64, y: f64, text: &str) {
        self.text(x, y, text, "end");
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (y1, y2) = (self.flip(y1), self.flip(y2));
        let _ = writeln!(
            self.body,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
            x1,
            y1,
            x2,
            y2,
            self.stroke.hex(),
            self.line_width
        );
    }

    fn draw_image(&mut self, href: &str, x: f64, y: f64, width: f64, height: f64, anchor: Anchor) {
        // SVG places images by their top left corner
        let (left, top) = match anchor {
            Anchor::BottomLeft => (x, y + height),
            Anchor::Center => (x - width / 2.0, y + height / 2.0),
        };
        let top = self.flip(top);
        let _ = writeln!(
            self.body,
            r#"  <image href="{}" xlink:href="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="none"/>"#,
            escape_xml(href),
            escape_xml(href),
            left,
            top,
            width,
            height
        );
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
