//! MVP canvas: seven blocks over three rows (2+3+2 / full width / 2+3+2
//! units of a seven-unit grid). A canvas is measured as a whole and never
//! split across pages.

use serde_json::Value;

use super::{draw_note, note_height};
use crate::content::{self, CanvasInstance, MvpCanvas, Note};
use crate::context::{Align, LayoutContext, TextStyle, CONTENT_BOTTOM, CONTENT_WIDTH, HEADER_BOTTOM, MARGIN_X};
use crate::fonts::Font;
use crate::grid::{self, GridOptions};
use crate::primitives::{self, rule_stroke, PARAGRAPH_GAP};
use crate::style;

const UNITS: f32 = 7.0;
const BLOCK_GAP: f32 = 2.0;
const ROW_GAP: f32 = 2.0;
const BLOCK_PADDING: f32 = 2.5;
const MIN_BLOCK_HEIGHT: f32 = 22.0;
const TITLE_GAP: f32 = 2.0;

/// First and last page (1-based) a canvas was drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub first: usize,
    pub last: usize,
}

struct Block<'a> {
    label: &'static str,
    span: u8,
    notes: Vec<&'a Note>,
}

fn block<'a>(label: &'static str, span: u8, notes: &'a [Note]) -> Block<'a> {
    Block {
        label,
        span,
        notes: content::filled(notes),
    }
}

fn layout(canvas: &CanvasInstance) -> [Vec<Block<'_>>; 3] {
    [
        vec![
            block("Segmented personas", 2, &canvas.personas),
            block("MVP proposal", 3, &canvas.proposal),
            block("Journeys", 2, &canvas.journeys),
        ],
        vec![block("Features", 7, &canvas.features)],
        vec![
            block("Expected outcomes", 2, &canvas.outcomes),
            block("Metrics to validate", 3, &canvas.metrics),
            block("Cost & schedule", 2, &canvas.cost_schedule),
        ],
    ]
}

fn unit_width() -> f32 {
    (CONTENT_WIDTH - BLOCK_GAP * (UNITS - 1.0)) / UNITS
}

fn block_width(span: u8) -> f32 {
    let span = f32::from(span);
    unit_width() * span + BLOCK_GAP * (span - 1.0)
}

fn label_style() -> TextStyle {
    TextStyle::new(Font::Bold, 8.5, style::ACCENT)
}

fn notes_options(span: u8) -> GridOptions {
    GridOptions {
        columns: if span >= 7 { 4 } else { 1 },
        gap: 1.5,
        min_row_height: 0.0,
        padding: 0.0,
    }
}

fn block_height(block: &Block) -> f32 {
    let inner = block_width(block.span) - 2.0 * BLOCK_PADDING;
    let label_h = label_style().height_of(block.label, inner);
    let notes_h = grid::measure(&block.notes, inner, &notes_options(block.span), |n, w| note_height(n, w));
    (2.0 * BLOCK_PADDING + label_h + 1.5 + notes_h).max(MIN_BLOCK_HEIGHT)
}

fn row_height(row: &[Block]) -> f32 {
    row.iter().map(block_height).fold(0.0, f32::max)
}

fn title_height(title: &str) -> f32 {
    TextStyle::subheading().height_of(title, CONTENT_WIDTH) + TITLE_GAP
}

/// Height of a whole canvas, title included.
pub(crate) fn canvas_height(title: &str, canvas: &CanvasInstance) -> f32 {
    let rows = layout(canvas);
    let blocks: f32 = rows.iter().map(|r| row_height(r)).sum();
    title_height(title) + blocks + ROW_GAP * (rows.len() - 1) as f32
}

fn draw_block(ctx: &mut LayoutContext, x: f32, y: f32, height: f32, block: &Block) {
    let width = block_width(block.span);
    ctx.rect(x, y, width, height, Some(style::Color::WHITE), Some(rule_stroke()));
    let inner = width - 2.0 * BLOCK_PADDING;
    let label_h = ctx.wrapped(x + BLOCK_PADDING, y + BLOCK_PADDING, inner, block.label, &label_style(), Align::Left);
    let notes_y = y + BLOCK_PADDING + label_h + 1.5;
    if block.notes.is_empty() {
        let muted = TextStyle::small()
            .with_font(Font::Italic)
            .with_color(style::scheme(style::MUTED));
        ctx.text(x + BLOCK_PADDING, notes_y, "Not defined.", &muted);
        return;
    }
    grid::render_at(
        ctx,
        x + BLOCK_PADDING,
        notes_y,
        inner,
        &block.notes,
        &notes_options(block.span),
        |n, w| note_height(n, w),
        |ctx, n, cell| draw_note(ctx, n, cell),
    );
}

/// Draw one canvas at the cursor, moving it whole to a new page if needed.
pub(crate) fn draw_canvas(ctx: &mut LayoutContext, title: &str, canvas: &CanvasInstance) -> PageSpan {
    let height = canvas_height(title, canvas);
    if height > CONTENT_BOTTOM - HEADER_BOTTOM {
        log::warn!("MVP canvas {title:?} is taller than a page ({height:.1} mm) and will overflow");
    }
    primitives::check_page_break(ctx, height);
    let first = ctx.page_number();

    let y = ctx.cursor_y;
    ctx.wrapped(MARGIN_X, y, CONTENT_WIDTH, title, &TextStyle::subheading(), Align::Left);
    let mut row_y = y + title_height(title);
    for row in layout(canvas).iter() {
        let h = row_height(row);
        let mut x = MARGIN_X;
        for block in row {
            draw_block(ctx, x, row_y, h, block);
            x += block_width(block.span) + BLOCK_GAP;
        }
        row_y += h + ROW_GAP;
    }
    ctx.advance(height + PARAGRAPH_GAP + 2.0);

    PageSpan {
        first,
        last: ctx.page_number(),
    }
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let mvp: MvpCanvas = content::parse(content);
    primitives::paragraph(
        ctx,
        "The MVP canvas consolidates the simplest version of the product that can be delivered \
         to validate the business hypotheses.",
    );
    if mvp.canvases.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    for (i, canvas) in mvp.canvases.iter().enumerate() {
        let title = if canvas.name.is_empty() {
            format!("MVP {}", i + 1)
        } else {
            canvas.name.clone()
        };
        draw_canvas(ctx, &title, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> LayoutContext {
        LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01")
    }

    fn canvas(notes: usize) -> CanvasInstance {
        let list: Vec<String> = (0..notes).map(|i| format!("Item {i}")).collect();
        content::parse(&json!({
            "personas": list, "proposal": list, "journeys": list,
            "features": list, "outcomes": list, "metrics": list, "costSchedule": list
        }))
    }

    #[test]
    fn blocks_span_the_content_width() {
        let row: f32 = [2u8, 3, 2].iter().map(|s| block_width(*s)).sum::<f32>() + 2.0 * BLOCK_GAP;
        assert!((row - CONTENT_WIDTH).abs() < 1e-3);
        assert!((block_width(7) - CONTENT_WIDTH).abs() < 1e-3);
    }

    #[test]
    fn second_canvas_moves_whole_to_a_new_page() {
        let page = CONTENT_BOTTOM - HEADER_BOTTOM;
        let mut notes = 1;
        while canvas_height("MVP", &canvas(notes)) <= page / 2.0 + 10.0 {
            notes += 1;
        }
        let big = canvas(notes);
        assert!(canvas_height("MVP", &big) < page);

        let mut c = ctx();
        let first = draw_canvas(&mut c, "MVP 1", &big);
        let second = draw_canvas(&mut c, "MVP 2", &big);
        assert_eq!(first, PageSpan { first: 1, last: 1 });
        assert_eq!(second, PageSpan { first: 2, last: 2 });
        assert_eq!(c.surface.find_text("MVP 2"), Some(1));
    }

    #[test]
    fn empty_blocks_are_labelled() {
        let mut c = ctx();
        render(&mut c, &json!({ "canvases": [{ "name": "Pilot", "features": ["Login"] }] }));
        assert!(c.surface.find_text("Pilot").is_some());
        assert!(c.surface.find_text("Login").is_some());
        assert!(c.surface.find_text("Not defined.").is_some());
    }
}
