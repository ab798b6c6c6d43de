//! Sections that are plain boards of sticky notes.

use serde_json::Value;

use super::{note_grid, NO_DATA};
use crate::content::{self, FeatureList, ProductGoals, Showcase};
use crate::context::LayoutContext;
use crate::primitives;

pub(super) fn render_goals(ctx: &mut LayoutContext, content: &Value) {
    let goals: ProductGoals = content::parse(content);
    primitives::paragraph(
        ctx,
        "Each participant wrote what the product must achieve. Similar goals were grouped and \
         the clusters below summarise the business objectives of the product.",
    );
    note_grid(ctx, &content::filled(&goals.goals), 3, NO_DATA);
}

pub(super) fn render_brainstorming(ctx: &mut LayoutContext, content: &Value) {
    let list: FeatureList = content::parse(content);
    primitives::paragraph(
        ctx,
        "Features were brainstormed against the goals, personas and journeys. Every card is a \
         user action or interaction with the product.",
    );
    note_grid(ctx, &content::filled(&list.features), 3, NO_DATA);
}

pub(super) fn render_showcase(ctx: &mut LayoutContext, content: &Value) {
    let showcase: Showcase = content::parse(content);
    primitives::paragraph(
        ctx,
        "The showcase presents the results of the inception to stakeholders who did not take \
         part in every activity.",
    );
    let blocks = [
        ("Highlights", content::filled(&showcase.highlights), 2),
        ("Attendees", content::filled(&showcase.attendees), 4),
        ("Feedback", content::filled(&showcase.feedback), 2),
    ];
    if blocks.iter().all(|(_, notes, _)| notes.is_empty()) {
        primitives::placeholder(ctx, NO_DATA);
        return;
    }
    for (title, notes, columns) in &blocks {
        primitives::subheading(ctx, title);
        note_grid(ctx, notes, *columns, "Nothing recorded.");
    }
}
