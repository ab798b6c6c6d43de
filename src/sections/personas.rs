//! Personas: two cards per row, each with a photo box and three short
//! profile sections.

use serde_json::Value;

use crate::content::{self, Persona, Personas};
use crate::context::{Align, LayoutContext, TextStyle};
use crate::fonts::Font;
use crate::grid::{self, GridCell, GridOptions};
use crate::photo;
use crate::primitives::{self, rule_stroke};
use crate::style;

const CARD_PADDING: f32 = 3.0;
const PHOTO_SIZE: f32 = 30.0;
const BLOCK_GAP: f32 = 2.5;
const EMPTY_FIELD: &str = "Not described.";

fn name_style() -> TextStyle {
    TextStyle::new(Font::Bold, 11.0, style::ACCENT)
}

fn field_text(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_FIELD
    } else {
        value
    }
}

fn fields(persona: &Persona) -> [(&'static str, &str); 3] {
    [
        ("Profile", field_text(&persona.profile)),
        ("Behavior", field_text(&persona.behavior)),
        ("Needs", field_text(&persona.needs)),
    ]
}

fn display_name(persona: &Persona, index: usize) -> String {
    if persona.name.is_empty() {
        format!("Persona {}", index + 1)
    } else {
        persona.name.clone()
    }
}

/// Card height: name, photo box and the three wrapped sections.
fn card_height(persona: &Persona, name: &str, width: f32) -> f32 {
    let inner = width - 2.0 * CARD_PADDING;
    let label = TextStyle::label();
    let body = TextStyle::small();
    let sections: f32 = fields(persona)
        .iter()
        .map(|(_, text)| label.line_height() + body.height_of(text, inner) + BLOCK_GAP)
        .sum();
    2.0 * CARD_PADDING + name_style().height_of(name, inner) + BLOCK_GAP + PHOTO_SIZE + BLOCK_GAP + sections
}

fn draw_photo(ctx: &mut LayoutContext, x: f32, y: f32, src: &str) {
    ctx.rect(x, y, PHOTO_SIZE, PHOTO_SIZE, Some(style::scheme(style::VALUE_FILL)), Some(rule_stroke()));
    if src.is_empty() {
        return;
    }
    match photo::pixel_size(src) {
        Ok((w, h)) => {
            let fit = photo::fit_within(w, h, PHOTO_SIZE, PHOTO_SIZE);
            ctx.image(x + fit.dx, y + fit.dy, fit.width, fit.height, src);
        }
        Err(e) => log::warn!("persona photo skipped: {e}"),
    }
}

fn draw_card(ctx: &mut LayoutContext, persona: &Persona, name: &str, cell: GridCell) {
    ctx.rect(cell.x, cell.y, cell.width, cell.height, Some(style::Color::WHITE), Some(rule_stroke()));
    let x = cell.x + CARD_PADDING;
    let inner = cell.width - 2.0 * CARD_PADDING;
    let mut y = cell.y + CARD_PADDING;
    y += ctx.wrapped(x, y, inner, name, &name_style(), Align::Left) + BLOCK_GAP;
    draw_photo(ctx, x, y, &persona.photo);
    y += PHOTO_SIZE + BLOCK_GAP;
    for (label, text) in fields(persona) {
        ctx.text(x, y, label, &TextStyle::label());
        y += TextStyle::label().line_height();
        let body = if text == EMPTY_FIELD {
            TextStyle::small()
                .with_font(Font::Italic)
                .with_color(style::scheme(style::MUTED))
        } else {
            TextStyle::small()
        };
        y += ctx.wrapped(x, y, inner, text, &body, Align::Left) + BLOCK_GAP;
    }
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let personas: Personas = content::parse(content);
    primitives::paragraph(
        ctx,
        "Personas describe the users of the product: who they are, how they behave and what \
         they need from it.",
    );
    if personas.personas.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    let cards: Vec<(String, &Persona)> = personas
        .personas
        .iter()
        .enumerate()
        .map(|(i, p)| (display_name(p, i), p))
        .collect();
    let options = GridOptions {
        gap: 5.0,
        ..GridOptions::columns(2)
    };
    grid::draw_and_advance(
        ctx,
        &cards,
        &options,
        |(name, p), w| card_height(p, name, w),
        |ctx, (name, p), cell| draw_card(ctx, p, name, cell),
    );
}
