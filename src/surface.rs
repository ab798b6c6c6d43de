//! Drawing surface – the intermediate representation between section layout
//! and PDF rendering. Every drawing call lands on the *selected* page of an
//! arena of pages, so a page reserved early (the table of contents) can be
//! revisited after later pages exist.
//!
//! All coordinates are millimetres from the top-left corner of the page.

use serde::{Deserialize, Serialize};

use crate::fonts::Font;
use crate::style::Color;

/// A4: 210mm × 297mm.
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// A complete document ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Ordered list of pages; never empty.
    pub pages: Vec<Page>,
    /// Index of the page drawing calls currently land on.
    #[serde(skip)]
    current: usize,
}

/// One page of content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub elements: Vec<Element>,
}

/// A single drawn element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    /// One line of text; `y` is the top of the line box.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Color,
    },
    /// A base64 data-URI image drawn into the given box.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        src: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Surface {
    /// Create an A4 portrait surface holding one blank page.
    pub fn a4(title: &str) -> Self {
        Self::new(title, A4_WIDTH_MM, A4_HEIGHT_MM)
    }

    pub fn new(title: &str, page_width_mm: f32, page_height_mm: f32) -> Self {
        Self {
            title: title.to_string(),
            page_width_mm,
            page_height_mm,
            pages: vec![Page::default()],
            current: 0,
        }
    }

    /// Append a blank page and select it.
    pub fn add_page(&mut self) -> usize {
        let index = self.pages.len();
        self.pages.push(Page {
            index,
            elements: Vec::new(),
        });
        self.current = index;
        index
    }

    /// Select an existing page (0-based). Out-of-range indices are ignored.
    pub fn select_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        } else {
            log::warn!(
                "select_page({index}) ignored: document has {} pages",
                self.pages.len()
            );
        }
    }

    /// Select the last page.
    pub fn select_last_page(&mut self) {
        self.current = self.pages.len().saturating_sub(1);
    }

    /// 0-based index of the selected page.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 1-based number of the selected page.
    pub fn page_number(&self) -> usize {
        self.current + 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Draw onto the selected page.
    pub fn push(&mut self, element: Element) {
        // `pages` is never empty and `current` is kept in range.
        self.pages[self.current].elements.push(element);
    }

    /// 0-based index of the first page holding a text line equal to `text`.
    pub fn find_text(&self, text: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.texts().any(|t| t == text))
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut surface: Self = serde_json::from_str(json)?;
        if surface.pages.is_empty() {
            surface.pages.push(Page::default());
        }
        surface.select_last_page();
        Ok(surface)
    }
}

impl Page {
    /// All text lines drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
