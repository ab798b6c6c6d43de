//! Text measurement for the built-in PDF fonts.
//!
//! The report only uses the standard Helvetica family, so glyph advances come
//! from the Adobe font metrics rather than a parsed font file. Widths are
//! returned in millimetres for a font size given in points.

use serde::{Deserialize, Serialize};

/// Points → millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// The built-in faces the renderer can draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Font {
    pub fn is_bold(self) -> bool {
        matches!(self, Font::Bold | Font::BoldItalic)
    }
}

/// Helvetica advance widths (1/1000 em) for ASCII 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold advance widths (1/1000 em) for ASCII 0x20..=0x7E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance used for characters outside the ASCII table (accented Latin
/// letters are close to their base glyph).
const FALLBACK_ADVANCE: u16 = 556;

fn advance(ch: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        FALLBACK_ADVANCE
    }
}

/// Width of `text` in millimetres at `font_size` points.
pub fn measure_text_width(text: &str, font_size: f32, font: Font) -> f32 {
    let bold = font.is_bold();
    let units: u32 = text.chars().map(|c| advance(c, bold) as u32).sum();
    units as f32 / 1000.0 * font_size * PT_TO_MM
}

/// Distance between consecutive baselines in millimetres.
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR * PT_TO_MM
}

/// Height of `lines` lines of text in millimetres.
pub fn text_block_height(lines: usize, font_size: f32) -> f32 {
    lines as f32 * line_height(font_size)
}

/// Word-wrap text to fit within `max_width` millimetres. Returns a vec of
/// lines; words longer than a full line are broken between characters.
pub fn wrap_text(text: &str, font_size: f32, font: Font, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    // Split on existing newlines first
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in &words {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };
            if measure_text_width(&candidate, font_size, font) <= max_width {
                current_line = candidate;
                continue;
            }
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if measure_text_width(word, font_size, font) <= max_width {
                current_line = word.to_string();
            } else {
                let mut pieces = break_word(word, font_size, font, max_width);
                current_line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Number of lines `text` occupies when wrapped; empty text counts as one.
pub fn line_count(text: &str, font_size: f32, font: Font, max_width: f32) -> usize {
    wrap_text(text, font_size, font, max_width).len().max(1)
}

fn break_word(word: &str, font_size: f32, font: Font, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if measure_text_width(&current, font_size, font) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
