//! Features & Journeys: journey steps with the features that support them.

use serde_json::Value;

use super::note_grid;
use crate::content::{self, FeatureJourney, FeatureJourneys};
use crate::context::{Align, LayoutContext, TextStyle, CONTENT_WIDTH, MARGIN_X};
use crate::primitives;

fn draw_step_label(ctx: &mut LayoutContext, number: usize, text: &str) {
    let style = TextStyle::label();
    let label = format!("Step {number}: {text}");
    let height = style.height_of(&label, CONTENT_WIDTH);
    // Keep the label with the first row of its feature cards.
    primitives::check_page_break(ctx, height + 14.0);
    let y = ctx.cursor_y;
    ctx.wrapped(MARGIN_X, y, CONTENT_WIDTH, &label, &style, Align::Left);
    ctx.advance(height + 1.5);
}

fn draw_journey(ctx: &mut LayoutContext, index: usize, journey: &FeatureJourney) {
    let name = if journey.name.is_empty() {
        format!("Journey {}", index + 1)
    } else {
        journey.name.clone()
    };
    primitives::section_banner(ctx, &name);
    if journey.steps.is_empty() {
        primitives::placeholder(ctx, "No steps recorded for this journey.");
        return;
    }
    for (i, step) in journey.steps.iter().enumerate() {
        draw_step_label(ctx, i + 1, &step.text);
        note_grid(ctx, &content::filled(&step.features), 4, "No features mapped to this step.");
    }
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let c: FeatureJourneys = content::parse(content);
    primitives::paragraph(
        ctx,
        "Features were placed on the steps of each journey they support. Steps without features \
         point to gaps in the backlog.",
    );
    if c.journeys.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    for (i, journey) in c.journeys.iter().enumerate() {
        draw_journey(ctx, i, journey);
    }
}
