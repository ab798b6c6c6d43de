//! Product Is / Is Not / Does / Does Not: four quadrants per group.
//!
//! The two quadrants of a row share one height (the taller of the pair), the
//! bottom pair starts a fixed gap below the top pair, and a group is never
//! split across pages when it fits on one.

use serde_json::Value;

use super::{draw_note, note_height, NOTE_PADDING};
use crate::content::{self, IsIsNotGroup, Note, ProductIsIsNot};
use crate::context::{Align, LayoutContext, TextStyle, CONTENT_WIDTH, MARGIN_X};
use crate::fonts::Font;
use crate::grid::{self, GridOptions};
use crate::primitives::{self, rule_stroke, PARAGRAPH_GAP};
use crate::style;

pub const QUADRANT_GAP: f32 = 4.0;
const COLUMN_GAP: f32 = 4.0;
const QUADRANT_PADDING: f32 = 3.0;
const QUADRANT_HEADER: f32 = 8.0;

/// Vertical placement of one drawn group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantLayout {
    pub top_y: f32,
    pub bottom_y: f32,
    pub top_height: f32,
    pub bottom_height: f32,
}

struct Quadrant<'a> {
    label: &'static str,
    /// Header strip colour.
    color: &'static str,
    notes: Vec<&'a Note>,
}

fn quadrant_width() -> f32 {
    (CONTENT_WIDTH - COLUMN_GAP) / 2.0
}

fn notes_options() -> GridOptions {
    GridOptions {
        gap: 2.5,
        min_row_height: 8.0,
        padding: 0.0,
        ..GridOptions::columns(2)
    }
}

fn inner_width() -> f32 {
    quadrant_width() - 2.0 * QUADRANT_PADDING
}

fn quadrant_height(q: &Quadrant) -> f32 {
    let notes = grid::measure(&q.notes, inner_width(), &notes_options(), |n, w| note_height(n, w));
    QUADRANT_HEADER + notes + 2.0 * QUADRANT_PADDING
}

fn draw_quadrant(ctx: &mut LayoutContext, x: f32, y: f32, height: f32, q: &Quadrant) {
    let width = quadrant_width();
    ctx.rect(x, y, width, height, Some(style::Color::WHITE), Some(rule_stroke()));
    ctx.fill_rect(x, y, width, QUADRANT_HEADER, style::scheme(q.color));
    let header = TextStyle::new(Font::Bold, 9.5, "#ffffff");
    let text_y = y + (QUADRANT_HEADER - header.line_height()) / 2.0;
    ctx.text_lines(x, text_y, width, &[q.label.to_string()], &header, Align::Center);

    let inner_x = x + QUADRANT_PADDING;
    let inner_y = y + QUADRANT_HEADER + QUADRANT_PADDING;
    if q.notes.is_empty() {
        ctx.text(inner_x, inner_y, "Nothing listed.", &TextStyle::placeholder());
        return;
    }
    grid::render_at(
        ctx,
        inner_x,
        inner_y,
        inner_width(),
        &q.notes,
        &notes_options(),
        |n, w| note_height(n, w),
        |ctx, n, cell| draw_note(ctx, n, cell),
    );
}

fn quadrants(group: &IsIsNotGroup) -> [Quadrant<'_>; 4] {
    [
        Quadrant {
            label: "IS",
            color: "#16a34a",
            notes: content::filled(&group.is),
        },
        Quadrant {
            label: "IS NOT",
            color: "#dc2626",
            notes: content::filled(&group.is_not),
        },
        Quadrant {
            label: "DOES",
            color: "#2563eb",
            notes: content::filled(&group.does),
        },
        Quadrant {
            label: "DOES NOT",
            color: "#ea580c",
            notes: content::filled(&group.does_not),
        },
    ]
}

/// Draw one group at the cursor and advance past it.
pub(crate) fn draw_group(ctx: &mut LayoutContext, group: &IsIsNotGroup) -> QuadrantLayout {
    let [is, is_not, does, does_not] = quadrants(group);
    let top_height = quadrant_height(&is).max(quadrant_height(&is_not));
    let bottom_height = quadrant_height(&does).max(quadrant_height(&does_not));
    let title_h = if group.title.is_empty() {
        0.0
    } else {
        TextStyle::subheading().height_of(&group.title, CONTENT_WIDTH) + 2.0
    };
    let total = title_h + top_height + QUADRANT_GAP + bottom_height;
    primitives::check_page_break(ctx, total);
    if !group.title.is_empty() {
        primitives::subheading(ctx, &group.title);
    }

    let right_x = MARGIN_X + quadrant_width() + COLUMN_GAP;
    let top_y = ctx.cursor_y;
    draw_quadrant(ctx, MARGIN_X, top_y, top_height, &is);
    draw_quadrant(ctx, right_x, top_y, top_height, &is_not);
    let bottom_y = top_y + top_height + QUADRANT_GAP;
    draw_quadrant(ctx, MARGIN_X, bottom_y, bottom_height, &does);
    draw_quadrant(ctx, right_x, bottom_y, bottom_height, &does_not);
    ctx.advance(top_height + QUADRANT_GAP + bottom_height + PARAGRAPH_GAP + 2.0);

    QuadrantLayout {
        top_y,
        bottom_y,
        top_height,
        bottom_height,
    }
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let c: ProductIsIsNot = content::parse(content);
    primitives::paragraph(
        ctx,
        "Describing what the product is and is not, does and does not do, draws the boundaries \
         of the product before any feature is discussed.",
    );
    let groups = c.all_groups();
    if groups.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    for group in &groups {
        draw_group(ctx, group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HEADER_BOTTOM;
    use serde_json::json;

    fn ctx() -> LayoutContext {
        LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01")
    }

    fn group(json: Value) -> IsIsNotGroup {
        content::parse(&json)
    }

    #[test]
    fn bottom_row_starts_below_the_taller_top_quadrant() {
        let g = group(json!({
            "is": ["fast", "cheap", "simple", "mobile first", "self-service"],
            "isNot": ["a marketplace"],
            "does": ["notify"],
            "doesNot": []
        }));
        let mut c = ctx();
        let layout = draw_group(&mut c, &g);
        let [is, is_not, ..] = quadrants(&g);
        let expected = quadrant_height(&is).max(quadrant_height(&is_not));
        assert!(quadrant_height(&is) > quadrant_height(&is_not));
        assert_eq!(layout.top_height, expected);
        assert!((layout.bottom_y - (layout.top_y + expected + QUADRANT_GAP)).abs() < 1e-4);
    }

    #[test]
    fn group_moves_whole_to_next_page() {
        let notes: Vec<String> = (0..12).map(|i| format!("Statement number {i}")).collect();
        let g = group(json!({ "is": notes, "isNot": notes, "does": notes, "doesNot": notes }));
        let mut c = ctx();
        c.cursor_y = 200.0;
        let layout = draw_group(&mut c, &g);
        assert_eq!(c.page_number(), 2);
        assert_eq!(layout.top_y, HEADER_BOTTOM);
    }

    #[test]
    fn empty_quadrants_say_so() {
        let mut c = ctx();
        render(&mut c, &json!({ "is": ["fast"] }));
        assert!(c.surface.find_text("Nothing listed.").is_some());
        assert!(c.surface.find_text("IS NOT").is_some());
    }
}
