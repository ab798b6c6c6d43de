//! Kickoff: objectives and the full/partial participant boards.

use serde_json::Value;

use super::note_grid;
use crate::content::{self, Kickoff};
use crate::context::LayoutContext;
use crate::primitives;

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let kickoff: Kickoff = content::parse(content);
    primitives::paragraph(
        ctx,
        "The kickoff aligns everyone on why the inception is happening, what it should produce, \
         and who takes part in each activity.",
    );
    primitives::render_steps(
        ctx,
        &[
            "Present the agenda and the working agreements.",
            "Clarify the problem and the outcome expected from the workshop.",
            "Register who joins the whole workshop and who joins only part of it.",
        ],
    );

    let objectives = content::filled(&kickoff.objectives);
    if !objectives.is_empty() {
        primitives::subheading(ctx, "Objectives");
        note_grid(ctx, &objectives, 2, super::NO_DATA);
    }

    primitives::subheading(ctx, "Full-workshop participants");
    note_grid(
        ctx,
        &content::filled(&kickoff.full_workshop_participants),
        4,
        "No participants recorded.",
    );
    primitives::subheading(ctx, "Partial-workshop participants");
    note_grid(
        ctx,
        &content::filled(&kickoff.partial_workshop_participants),
        4,
        "No participants recorded.",
    );
}
