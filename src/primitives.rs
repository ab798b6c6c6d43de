//! Drawing primitives shared by every section: page breaks, running header
//! and footer, banners, callouts, numbered steps, paragraphs and tables.
//!
//! Each primitive that consumes vertical space checks for a page break
//! before drawing and advances the cursor afterwards.

use crate::context::{
    Align, LayoutContext, TextStyle, CONTENT_BOTTOM, CONTENT_WIDTH, FOOTER_Y, HEADER_BOTTOM,
    HEADER_RULE_Y, HEADER_TEXT_Y, MARGIN_X, PAGE_WIDTH,
};
use crate::fonts::Font;
use crate::style::{self, Color};
use crate::surface::Stroke;

pub const BANNER_HEIGHT: f32 = 9.0;
/// Space left below a banner before the content it introduces.
pub const BANNER_GAP: f32 = 4.0;
/// Vertical space a banner consumes.
pub const BANNER_BLOCK: f32 = BANNER_HEIGHT + BANNER_GAP;
pub const PARAGRAPH_GAP: f32 = 3.0;
pub const CELL_PADDING: f32 = 2.0;
/// Label column of key/value tables.
pub const KV_LABEL_WIDTH: f32 = 42.0;

pub fn rule_stroke() -> Stroke {
    Stroke {
        width: 0.2,
        color: style::scheme(style::RULE),
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Start a new page if `needed` mm do not fit above the content bottom.
///
/// A page that holds nothing below its header is never abandoned: a block
/// taller than a whole page is drawn from the top and overflows.
pub fn check_page_break(ctx: &mut LayoutContext, needed: f32) -> bool {
    if ctx.cursor_y + needed <= CONTENT_BOTTOM || ctx.cursor_y <= HEADER_BOTTOM {
        return false;
    }
    log::debug!(
        "page break on page {} (cursor {:.1} + {:.1} mm)",
        ctx.page_number(),
        ctx.cursor_y,
        needed
    );
    new_page(ctx);
    true
}

/// Append a page with the running header and select it.
pub fn new_page(ctx: &mut LayoutContext) {
    ctx.surface.add_page();
    draw_header(ctx);
}

/// Workshop name (left), date (right) and a separator rule.
pub fn draw_header(ctx: &mut LayoutContext) {
    let style = TextStyle::muted().with_font(Font::Bold);
    let name = ctx.workshop_name().to_string();
    let date = ctx.date_label().to_string();
    ctx.text(MARGIN_X, HEADER_TEXT_Y, &name, &style);
    let date_style = TextStyle::muted();
    let date_x = PAGE_WIDTH - MARGIN_X - date_style.width_of(&date);
    ctx.text(date_x, HEADER_TEXT_Y, &date, &date_style);
    let rule = rule_stroke();
    ctx.line(MARGIN_X, HEADER_RULE_Y, PAGE_WIDTH - MARGIN_X, HEADER_RULE_Y, rule.width, rule.color);
    ctx.cursor_y = HEADER_BOTTOM;
}

/// Brand (left) and "Page i / N" (right) on every page. Runs once, after all
/// content exists, so N is final.
pub fn draw_footer(ctx: &mut LayoutContext) {
    let total = ctx.surface.page_count();
    let style = TextStyle::muted();
    let brand = ctx.brand_name().to_string();
    for index in 0..total {
        ctx.surface.select_page(index);
        ctx.text(MARGIN_X, FOOTER_Y, &brand, &style);
        let label = format!("Page {} / {}", index + 1, total);
        let x = PAGE_WIDTH - MARGIN_X - style.width_of(&label);
        ctx.text(x, FOOTER_Y, &label, &style);
    }
    ctx.surface.select_last_page();
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// Full-width accent bar with a centred uppercase label.
pub fn section_banner(ctx: &mut LayoutContext, label: &str) {
    check_page_break(ctx, BANNER_BLOCK);
    let y = ctx.cursor_y;
    draw_banner_at(ctx, y, label);
    ctx.advance(BANNER_BLOCK);
}

/// Banner without a page-break check, for callers that already reserved room.
pub fn draw_banner_at(ctx: &mut LayoutContext, y: f32, label: &str) {
    let style = TextStyle::new(Font::Bold, 10.5, "#ffffff");
    ctx.fill_rect(MARGIN_X, y, CONTENT_WIDTH, BANNER_HEIGHT, style::scheme(style::ACCENT));
    let text_y = y + (BANNER_HEIGHT - style.line_height()) / 2.0;
    let line = vec![label.to_uppercase()];
    ctx.text_lines(MARGIN_X, text_y, CONTENT_WIDTH, &line, &style, Align::Center);
}

/// Short emphasis text, word-wrapped to `max_width` and centred.
pub fn centered_callout(ctx: &mut LayoutContext, text: &str, max_width: f32) {
    let style = TextStyle::subheading();
    let width = max_width.min(CONTENT_WIDTH);
    let lines = style.wrap(text, width);
    let height = lines.len() as f32 * style.line_height();
    check_page_break(ctx, height + PARAGRAPH_GAP);
    let x = MARGIN_X + (CONTENT_WIDTH - width) / 2.0;
    let y = ctx.cursor_y;
    ctx.text_lines(x, y, width, &lines, &style, Align::Center);
    ctx.advance(height + PARAGRAPH_GAP);
}

/// Numbered instructional lines with a hanging indent.
pub fn render_steps(ctx: &mut LayoutContext, steps: &[&str]) {
    const INDENT: f32 = 7.0;
    let number_style = TextStyle::label();
    let style = TextStyle::body();
    for (i, step) in steps.iter().enumerate() {
        let lines = style.wrap(step, CONTENT_WIDTH - INDENT);
        let height = lines.len() as f32 * style.line_height();
        check_page_break(ctx, height);
        let y = ctx.cursor_y;
        ctx.text(MARGIN_X, y, &format!("{}.", i + 1), &number_style);
        ctx.text_lines(MARGIN_X + INDENT, y, CONTENT_WIDTH - INDENT, &lines, &style, Align::Left);
        ctx.advance(height + 1.0);
    }
    ctx.advance(PARAGRAPH_GAP);
}

/// Explanatory copy across the full content width.
pub fn paragraph(ctx: &mut LayoutContext, text: &str) {
    let style = TextStyle::muted();
    let lines = style.wrap(text, CONTENT_WIDTH);
    let height = lines.len() as f32 * style.line_height();
    check_page_break(ctx, height);
    let y = ctx.cursor_y;
    ctx.text_lines(MARGIN_X, y, CONTENT_WIDTH, &lines, &style, Align::Left);
    ctx.advance(height + PARAGRAPH_GAP);
}

/// Italic "no data" line.
pub fn placeholder(ctx: &mut LayoutContext, text: &str) {
    let style = TextStyle::placeholder();
    let height = style.height_of(text, CONTENT_WIDTH);
    check_page_break(ctx, height);
    let y = ctx.cursor_y;
    ctx.wrapped(MARGIN_X, y, CONTENT_WIDTH, text, &style, Align::Left);
    ctx.advance(height + PARAGRAPH_GAP);
}

/// Heading for a block inside a section.
pub fn subheading(ctx: &mut LayoutContext, text: &str) {
    let style = TextStyle::subheading();
    let height = style.height_of(text, CONTENT_WIDTH);
    // Keep a subheading together with at least a couple of lines below it.
    check_page_break(ctx, height + 12.0);
    let y = ctx.cursor_y;
    ctx.wrapped(MARGIN_X, y, CONTENT_WIDTH, text, &style, Align::Left);
    ctx.advance(height + 2.0);
}

/// Large page title.
pub fn title(ctx: &mut LayoutContext, text: &str) {
    let style = TextStyle::heading();
    let height = style.height_of(text, CONTENT_WIDTH);
    check_page_break(ctx, height);
    let y = ctx.cursor_y;
    ctx.wrapped(MARGIN_X, y, CONTENT_WIDTH, text, &style, Align::Left);
    ctx.advance(height + 4.0);
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// One row of a two-column label/value table.
#[derive(Debug, Clone)]
pub struct KvRow {
    pub label: String,
    pub value: String,
    pub fill: Color,
}

fn kv_row_height(row: &KvRow) -> f32 {
    let value_width = CONTENT_WIDTH - KV_LABEL_WIDTH - 2.0 * CELL_PADDING;
    let label_width = KV_LABEL_WIDTH - 2.0 * CELL_PADDING;
    let label_h = TextStyle::label().height_of(&row.label, label_width);
    let value_h = TextStyle::body().height_of(&row.value, value_width);
    label_h.max(value_h) + 2.0 * CELL_PADDING
}

/// Height a key/value table will occupy, excluding the trailing gap.
pub fn key_value_table_height(rows: &[KvRow]) -> f32 {
    rows.iter().map(kv_row_height).sum()
}

/// Two-column table: bold labels on a grey column, values on a per-row fill.
pub fn key_value_table(ctx: &mut LayoutContext, rows: &[KvRow]) {
    let label_fill = style::scheme(style::LABEL_FILL);
    let stroke = rule_stroke();
    for row in rows {
        let height = kv_row_height(row);
        check_page_break(ctx, height);
        let y = ctx.cursor_y;
        let value_x = MARGIN_X + KV_LABEL_WIDTH;
        let value_w = CONTENT_WIDTH - KV_LABEL_WIDTH;
        ctx.rect(MARGIN_X, y, KV_LABEL_WIDTH, height, Some(label_fill), Some(stroke));
        ctx.rect(value_x, y, value_w, height, Some(row.fill), Some(stroke));
        ctx.wrapped(
            MARGIN_X + CELL_PADDING,
            y + CELL_PADDING,
            KV_LABEL_WIDTH - 2.0 * CELL_PADDING,
            &row.label,
            &TextStyle::label(),
            Align::Left,
        );
        ctx.wrapped(
            value_x + CELL_PADDING,
            y + CELL_PADDING,
            value_w - 2.0 * CELL_PADDING,
            &row.value,
            &TextStyle::body(),
            Align::Left,
        );
        ctx.advance(height);
    }
    ctx.advance(PARAGRAPH_GAP + 1.0);
}

/// A table cell: text plus an optional background.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub text: String,
    pub fill: Option<Color>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fill: None,
        }
    }

    pub fn filled(text: impl Into<String>, fill: Color) -> Self {
        Self {
            text: text.into(),
            fill: Some(fill),
        }
    }
}

/// Column widths as fractions of the content width.
fn column_widths(fractions: &[f32]) -> Vec<f32> {
    let total: f32 = fractions.iter().sum();
    if total <= 0.0 {
        let n = fractions.len().max(1) as f32;
        return vec![CONTENT_WIDTH / n; fractions.len()];
    }
    fractions.iter().map(|f| CONTENT_WIDTH * f / total).collect()
}

fn row_height(cells: &[Cell], widths: &[f32], style: &TextStyle) -> f32 {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| style.height_of(&cell.text, w - 2.0 * CELL_PADDING))
        .fold(style.line_height(), f32::max)
        + 2.0 * CELL_PADDING
}

fn draw_row(ctx: &mut LayoutContext, cells: &[Cell], widths: &[f32], height: f32, style: &TextStyle, default_fill: Option<Color>) {
    let y = ctx.cursor_y;
    let mut x = MARGIN_X;
    for (cell, w) in cells.iter().zip(widths) {
        ctx.rect(x, y, *w, height, cell.fill.or(default_fill), Some(rule_stroke()));
        ctx.wrapped(x + CELL_PADDING, y + CELL_PADDING, w - 2.0 * CELL_PADDING, &cell.text, style, Align::Left);
        x += w;
    }
    ctx.advance(height);
}

/// Header row plus body rows; the header repeats after a page break.
pub fn table(ctx: &mut LayoutContext, headers: &[&str], fractions: &[f32], rows: &[Vec<Cell>]) {
    let widths = column_widths(fractions);
    let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::new(*h)).collect();
    let header_style = TextStyle::new(Font::Bold, 9.0, "#ffffff");
    let body_style = TextStyle::small();
    let header_h = row_height(&header_cells, &widths, &header_style);
    let accent = style::scheme(style::ACCENT);

    let first_h = rows.first().map(|r| row_height(r, &widths, &body_style)).unwrap_or(0.0);
    check_page_break(ctx, header_h + first_h);
    draw_row(ctx, &header_cells, &widths, header_h, &header_style, Some(accent));

    for row in rows {
        let height = row_height(row, &widths, &body_style);
        if check_page_break(ctx, height) {
            draw_row(ctx, &header_cells, &widths, header_h, &header_style, Some(accent));
        }
        draw_row(ctx, row, &widths, height, &body_style, None);
    }
    ctx.advance(PARAGRAPH_GAP + 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Element;

    fn ctx() -> LayoutContext {
        LayoutContext::new("Report", "Checkout revamp", "Acme", "2026-01-01")
    }

    #[test]
    fn page_break_only_when_needed() {
        let mut c = ctx();
        c.cursor_y = 100.0;
        assert!(!check_page_break(&mut c, 50.0));
        assert_eq!(c.page_number(), 1);

        c.cursor_y = 270.0;
        assert!(check_page_break(&mut c, 20.0));
        assert_eq!(c.page_number(), 2);
        assert_eq!(c.cursor_y, HEADER_BOTTOM);
        assert_eq!(c.surface.find_text("Checkout revamp"), Some(1));
    }

    #[test]
    fn fresh_page_is_never_abandoned() {
        let mut c = ctx();
        assert!(!check_page_break(&mut c, 500.0));
        assert_eq!(c.page_number(), 1);
    }

    #[test]
    fn footer_stamps_every_page() {
        let mut c = ctx();
        new_page(&mut c);
        new_page(&mut c);
        c.surface.select_page(0);
        draw_footer(&mut c);
        for (i, page) in c.surface.pages.iter().enumerate() {
            let label = format!("Page {} / 3", i + 1);
            assert!(page.texts().any(|t| t == label), "missing {label}");
            assert!(page.texts().any(|t| t == "Acme"));
        }
        assert_eq!(c.page_number(), 3);
    }

    #[test]
    fn banner_is_uppercase_and_advances() {
        let mut c = ctx();
        let before = c.cursor_y;
        section_banner(&mut c, "Wave 1");
        assert_eq!(c.cursor_y, before + BANNER_BLOCK);
        assert!(c.surface.find_text("WAVE 1").is_some());
    }

    #[test]
    fn steps_are_numbered() {
        let mut c = ctx();
        render_steps(&mut c, &["First", "Second"]);
        let texts: Vec<_> = c.surface.pages[0].texts().collect();
        assert_eq!(texts, vec!["1.", "First", "2.", "Second"]);
    }

    #[test]
    fn key_value_rows_use_their_fill() {
        let mut c = ctx();
        let fill = Color::rgb8(1, 2, 3);
        key_value_table(
            &mut c,
            &[KvRow {
                label: "For".into(),
                value: "shoppers".into(),
                fill,
            }],
        );
        let filled = c.surface.pages[0]
            .elements
            .iter()
            .any(|e| matches!(e, Element::Rect { fill: Some(f), .. } if *f == fill));
        assert!(filled);
    }

    #[test]
    fn table_repeats_header_after_break() {
        let mut c = ctx();
        let rows: Vec<Vec<Cell>> = (0..80).map(|i| vec![Cell::new(format!("row {i}")), Cell::new("x")]).collect();
        table(&mut c, &["Name", "Value"], &[2.0, 1.0], &rows);
        assert!(c.page_number() > 1);
        for page in &c.surface.pages {
            assert!(page.texts().any(|t| t == "Name"));
        }
    }
}
