//! Sequencer: waves of tag pills and reviewed feature cards.
//!
//! Each wave is a banner followed by a three-column grid. The banner and the
//! first row of cards are page-break-checked together so a banner never ends
//! a page alone.

use serde_json::Value;

use crate::content::{self, Confidence, Note, ReviewCard, Sequencer, SequencerCard};
use crate::context::{Align, LayoutContext, TextStyle, CONTENT_WIDTH};
use crate::fonts::Font;
use crate::grid::{self, GridCell, GridOptions};
use crate::primitives::{self, BANNER_BLOCK};
use crate::style;
use crate::surface::Stroke;

const CARD_PADDING: f32 = 2.5;
const SUB_PADDING: f32 = 1.5;
const SUB_GAP: f32 = 2.0;
const TAG_FILL: &str = "#4f46e5";

const RULES: [&str; 6] = [
    "A wave holds at most three features.",
    "A wave cannot hold more than one low-confidence (red) feature.",
    "A wave cannot hold three features that are all medium or low confidence.",
    "The total effort of a wave cannot exceed five.",
    "The business and UX value of a wave must add up to at least four each.",
    "A feature that depends on another must go in a later wave.",
];

pub(crate) fn grid_options() -> GridOptions {
    GridOptions {
        columns: 3,
        gap: 3.0,
        min_row_height: 8.0,
        padding: 4.0,
    }
}

fn tag_style() -> TextStyle {
    TextStyle::new(Font::Bold, 9.0, "#ffffff")
}

fn title_style() -> TextStyle {
    TextStyle::label()
}

fn sub_style() -> TextStyle {
    TextStyle::new(Font::Regular, 8.0, style::TEXT)
}

/// Tag pill height: the wrapped label plus padding.
pub(crate) fn tag_height(note: &Note, width: f32) -> f32 {
    tag_style().height_of(&note.text, width - 2.0 * CARD_PADDING) + 2.0 * CARD_PADDING
}

fn value_text(card: &ReviewCard) -> String {
    let summary = card.value_summary();
    if summary.is_empty() {
        "Not rated".to_string()
    } else {
        summary
    }
}

fn sub_box_height(text: &str, width: f32) -> f32 {
    sub_style().height_of(text, width - 2.0 * SUB_PADDING) + 2.0 * SUB_PADDING
}

/// Feature card height: title, value box and confidence box.
pub(crate) fn feature_height(card: &ReviewCard, width: f32) -> f32 {
    let inner = width - 2.0 * CARD_PADDING;
    let confidence = Confidence::parse(&card.confidence);
    2.0 * CARD_PADDING
        + title_style().height_of(&card.text, inner)
        + SUB_GAP
        + sub_box_height(&value_text(card), inner)
        + SUB_GAP
        + sub_box_height(confidence.label(), inner)
}

pub(crate) fn card_height(card: &SequencerCard, width: f32) -> f32 {
    match card {
        SequencerCard::Tag(note) => tag_height(note, width),
        SequencerCard::Feature(feature) => feature_height(feature, width),
    }
}

fn draw_tag(ctx: &mut LayoutContext, note: &Note, cell: GridCell) {
    let height = tag_height(note, cell.width);
    let fill = style::resolve(note.color.as_deref(), TAG_FILL);
    ctx.fill_rect(cell.x, cell.y, cell.width, height, fill);
    ctx.wrapped(
        cell.x + CARD_PADDING,
        cell.y + CARD_PADDING,
        cell.width - 2.0 * CARD_PADDING,
        &note.text,
        &tag_style(),
        Align::Center,
    );
}

fn draw_sub_box(ctx: &mut LayoutContext, x: f32, y: f32, width: f32, text: &str, fill: &str, border: &str) -> f32 {
    let height = sub_box_height(text, width);
    let stroke = Stroke {
        width: 0.3,
        color: style::scheme(border),
    };
    ctx.rect(x, y, width, height, Some(style::scheme(fill)), Some(stroke));
    ctx.wrapped(x + SUB_PADDING, y + SUB_PADDING, width - 2.0 * SUB_PADDING, text, &sub_style(), Align::Left);
    height
}

fn draw_feature(ctx: &mut LayoutContext, card: &ReviewCard, cell: GridCell) {
    let confidence = Confidence::parse(&card.confidence);
    let (bg, border) = confidence.colors();
    let stroke = Stroke {
        width: 0.4,
        color: style::scheme(border),
    };
    ctx.rect(cell.x, cell.y, cell.width, cell.height, Some(style::scheme(bg)), Some(stroke));

    let x = cell.x + CARD_PADDING;
    let inner = cell.width - 2.0 * CARD_PADDING;
    let mut y = cell.y + CARD_PADDING;
    y += ctx.wrapped(x, y, inner, &card.text, &title_style(), Align::Left) + SUB_GAP;
    y += draw_sub_box(ctx, x, y, inner, &value_text(card), "#ffffff", style::RULE) + SUB_GAP;
    draw_sub_box(ctx, x, y, inner, confidence.label(), "#ffffff", border);
}

fn draw_card(ctx: &mut LayoutContext, card: &SequencerCard, cell: GridCell) {
    match card {
        SequencerCard::Tag(note) => draw_tag(ctx, note, cell),
        SequencerCard::Feature(feature) => draw_feature(ctx, feature, cell),
    }
}

fn wave_label(index: usize, name: &str) -> String {
    if name.is_empty() {
        format!("Wave {}", index + 1)
    } else {
        name.to_string()
    }
}

fn draw_wave(ctx: &mut LayoutContext, label: &str, items: &[SequencerCard]) {
    if items.is_empty() {
        let empty_h = TextStyle::placeholder().height_of("No cards in this wave.", CONTENT_WIDTH);
        primitives::check_page_break(ctx, BANNER_BLOCK + empty_h);
        primitives::section_banner(ctx, label);
        primitives::placeholder(ctx, "No cards in this wave.");
        return;
    }
    let options = grid_options();
    let plan = grid::plan(items, CONTENT_WIDTH, &options, card_height);
    let first_row = plan.rows.first().map(|r| r.height).unwrap_or(0.0);
    primitives::check_page_break(ctx, BANNER_BLOCK + first_row);
    let y = ctx.cursor_y;
    primitives::draw_banner_at(ctx, y, label);
    ctx.advance(BANNER_BLOCK);
    grid::draw_and_advance(ctx, items, &options, card_height, draw_card);
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let sequencer: Sequencer = content::parse(content);
    primitives::paragraph(
        ctx,
        "The sequencer organises the reviewed features into delivery waves. The first waves \
         make up the MVP. The team followed these rules:",
    );
    primitives::render_steps(ctx, &RULES);
    if sequencer.waves.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    for (i, wave) in sequencer.waves.iter().enumerate() {
        draw_wave(ctx, &wave_label(i, &wave.name), &wave.items());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HEADER_BOTTOM;
    use crate::surface::Element;
    use serde_json::json;

    fn ctx() -> LayoutContext {
        LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01")
    }

    #[test]
    fn tag_only_rows_are_sized_by_tags() {
        let s: Sequencer = content::parse(&json!({ "waves": [{
            "tags": ["Mobile", "A much longer tag label that wraps over a few lines", "Web", "API", "Ops"]
        }]}));
        let items = s.waves[0].items();
        let options = grid_options();
        let plan = grid::plan(&items, CONTENT_WIDTH, &options, card_height);
        let lens: Vec<_> = plan.rows.iter().map(|r| r.len).collect();
        assert_eq!(lens, vec![3, 2]);

        let tags: Vec<Note> = items
            .iter()
            .filter_map(|c| match c {
                SequencerCard::Tag(n) => Some(n.clone()),
                SequencerCard::Feature(_) => None,
            })
            .collect();
        let expected_row = |range: std::ops::Range<usize>| {
            tags[range]
                .iter()
                .map(|n| tag_height(n, plan.cell_width))
                .fold(options.min_row_height, f32::max)
        };
        assert_eq!(plan.rows[0].height, expected_row(0..3));
        assert_eq!(plan.rows[1].height, expected_row(3..5));
        assert!(plan.rows[0].height > plan.rows[1].height);
    }

    #[test]
    fn feature_cards_are_taller_than_tags() {
        let tag = SequencerCard::Tag(Note::new("Mobile"));
        let feature = SequencerCard::Feature(ReviewCard {
            text: "Mobile".into(),
            confidence: "high".into(),
            ..Default::default()
        });
        assert!(card_height(&feature, 50.0) > card_height(&tag, 50.0));
    }

    #[test]
    fn banner_moves_with_its_first_row() {
        let mut c = ctx();
        c.cursor_y = 262.0;
        let items = vec![SequencerCard::Feature(ReviewCard {
            text: "Checkout".into(),
            effort: "EE".into(),
            ..Default::default()
        })];
        draw_wave(&mut c, "Wave 1", &items);
        assert_eq!(c.page_number(), 2);
        assert_eq!(c.surface.find_text("WAVE 1"), Some(1));
        assert_eq!(c.surface.find_text("Checkout"), Some(1));
        assert!(c.cursor_y > HEADER_BOTTOM + BANNER_BLOCK);
    }

    #[test]
    fn feature_cards_take_their_confidence_colours() {
        for (level, bg, border) in [
            ("high", "#dcfce7", "#16a34a"),
            ("medium", "#fef9c3", "#ca8a04"),
            ("low", "#fee2e2", "#dc2626"),
            ("", "#f3f4f6", "#9ca3af"),
        ] {
            let mut c = ctx();
            let items = vec![SequencerCard::Feature(ReviewCard {
                text: "Checkout".into(),
                confidence: level.into(),
                ..Default::default()
            })];
            let cell_width = grid::plan(&items, CONTENT_WIDTH, &grid_options(), card_height).cell_width;
            draw_wave(&mut c, "Wave 1", &items);
            let card = c.surface.pages[0]
                .elements
                .iter()
                .find_map(|e| match e {
                    Element::Rect { width, fill, stroke, .. } if *width == cell_width => Some((*fill, *stroke)),
                    _ => None,
                })
                .expect("card rect");
            assert_eq!(card.0, Some(style::scheme(bg)), "fill for {level:?}");
            assert_eq!(card.1.map(|s| s.color), Some(style::scheme(border)), "border for {level:?}");
        }
    }

    #[test]
    fn waves_render_in_order_with_confidence_labels() {
        let mut c = ctx();
        render(
            &mut c,
            &json!({ "waves": [
                { "cards": [{ "type": "tag", "text": "Goal" }, { "text": "Login", "confidence": "1" }] },
                { "name": "Later" }
            ]}),
        );
        assert!(c.surface.find_text("WAVE 1").is_some());
        assert!(c.surface.find_text("LATER").is_some());
        assert!(c.surface.find_text("Low confidence").is_some());
        assert!(c.surface.find_text("No cards in this wave.").is_some());
    }
}
