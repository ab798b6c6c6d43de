//! Layout context – the single mutable state threaded through every drawing
//! call: the surface, the vertical cursor, and the read-only labels that the
//! running header and footer stamp onto pages.

use crate::fonts::{self, Font};
use crate::style::{self, Color};
use crate::surface::{Element, Stroke, Surface, A4_HEIGHT_MM, A4_WIDTH_MM};

// ---------------------------------------------------------------------------
// Page geometry (millimetres)
// ---------------------------------------------------------------------------

pub const PAGE_WIDTH: f32 = A4_WIDTH_MM;
pub const PAGE_HEIGHT: f32 = A4_HEIGHT_MM;
pub const MARGIN_X: f32 = 14.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;
/// Top of the running header text.
pub const HEADER_TEXT_Y: f32 = 8.0;
pub const HEADER_RULE_Y: f32 = 14.0;
/// Where content starts below the running header.
pub const HEADER_BOTTOM: f32 = 20.0;
/// Lowest y content may reach before a page break.
pub const CONTENT_BOTTOM: f32 = 280.0;
/// Top of the footer text.
pub const FOOTER_Y: f32 = 287.0;

// ---------------------------------------------------------------------------
// Text styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    /// Points.
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Font, size: f32, color: &str) -> Self {
        Self {
            font,
            size,
            color: style::scheme(color),
        }
    }

    pub fn body() -> Self {
        Self::new(Font::Regular, 10.0, style::TEXT)
    }

    pub fn small() -> Self {
        Self::new(Font::Regular, 8.5, style::TEXT)
    }

    pub fn muted() -> Self {
        Self::new(Font::Regular, 9.0, style::MUTED)
    }

    pub fn label() -> Self {
        Self::new(Font::Bold, 9.0, style::TEXT)
    }

    pub fn heading() -> Self {
        Self::new(Font::Bold, 16.0, style::ACCENT)
    }

    pub fn subheading() -> Self {
        Self::new(Font::Bold, 11.5, style::ACCENT)
    }

    pub fn placeholder() -> Self {
        Self::new(Font::Italic, 9.5, style::MUTED)
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn line_height(&self) -> f32 {
        fonts::line_height(self.size)
    }

    /// Wrap `text` to `width` mm in this style.
    pub fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        fonts::wrap_text(text, self.size, self.font, width)
    }

    /// Height of `text` wrapped to `width` mm.
    pub fn height_of(&self, text: &str, width: f32) -> f32 {
        fonts::text_block_height(fonts::line_count(text, self.size, self.font, width), self.size)
    }

    pub fn width_of(&self, text: &str) -> f32 {
        fonts::measure_text_width(text, self.size, self.font)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Mutable layout state for one document. Never shared between documents.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    pub surface: Surface,
    /// Current vertical write position on the selected page.
    pub cursor_y: f32,
    brand_name: String,
    workshop_name: String,
    date_label: String,
}

impl LayoutContext {
    pub fn new(title: &str, workshop_name: &str, brand_name: &str, date_label: &str) -> Self {
        Self {
            surface: Surface::new(title, PAGE_WIDTH, PAGE_HEIGHT),
            cursor_y: HEADER_BOTTOM,
            brand_name: brand_name.to_string(),
            workshop_name: workshop_name.to_string(),
            date_label: date_label.to_string(),
        }
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    pub fn workshop_name(&self) -> &str {
        &self.workshop_name
    }

    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    /// 1-based number of the page being drawn on.
    pub fn page_number(&self) -> usize {
        self.surface.page_number()
    }

    /// Vertical space left above the content bottom.
    pub fn remaining(&self) -> f32 {
        CONTENT_BOTTOM - self.cursor_y
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    // -- drawing ------------------------------------------------------------

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Option<Color>, stroke: Option<Stroke>) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.surface.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Color) {
        self.rect(x, y, width, height, Some(fill), None);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.surface.push(Element::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: Stroke { width, color },
        });
    }

    /// One unwrapped line of text whose top sits at `y`.
    pub fn text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        self.surface.push(Element::Text {
            x,
            y,
            text: text.to_string(),
            font: style.font,
            size: style.size,
            color: style.color,
        });
    }

    /// Pre-wrapped lines aligned inside `[x, x + width]`. Returns the block height.
    pub fn text_lines(&mut self, x: f32, y: f32, width: f32, lines: &[String], style: &TextStyle, align: Align) -> f32 {
        let lh = style.line_height();
        for (i, line) in lines.iter().enumerate() {
            let line_x = match align {
                Align::Left => x,
                Align::Center => x + (width - style.width_of(line)) / 2.0,
                Align::Right => x + width - style.width_of(line),
            };
            self.text(line_x, y + i as f32 * lh, line, style);
        }
        lines.len() as f32 * lh
    }

    /// Wrap `text` to `width` and draw it. Returns the block height.
    pub fn wrapped(&mut self, x: f32, y: f32, width: f32, text: &str, style: &TextStyle, align: Align) -> f32 {
        let lines = style.wrap(text, width);
        self.text_lines(x, y, width, &lines, style, align)
    }

    pub fn image(&mut self, x: f32, y: f32, width: f32, height: f32, src: &str) {
        self.surface.push(Element::Image {
            x,
            y,
            width,
            height,
            src: src.to_string(),
        });
    }
}
