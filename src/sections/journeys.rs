//! User Journeys: persona, goal and the ordered steps of each journey.

use serde_json::Value;

use super::row_fill;
use crate::content::{self, Journey, UserJourneys};
use crate::context::{LayoutContext, CONTENT_BOTTOM, HEADER_BOTTOM};
use crate::primitives::{self, KvRow};
use crate::style;

fn rows(journey: &Journey) -> Vec<KvRow> {
    let mut rows = vec![
        KvRow {
            label: "Persona".into(),
            value: journey.persona.clone(),
            fill: row_fill(&journey.colors, "persona", &journey.color),
        },
        KvRow {
            label: "Goal".into(),
            value: journey.goal.clone(),
            fill: row_fill(&journey.colors, "goal", &journey.color),
        },
    ];
    for (i, step) in content::filled(&journey.steps).into_iter().enumerate() {
        let key = format!("step{}", i + 1);
        let base = style::resolve_color(Some(&journey.color), style::VALUE_FILL);
        let base = style::resolve_color(journey.colors.get(&key).map(String::as_str), &base);
        rows.push(KvRow {
            label: format!("Step {}", i + 1),
            value: step.text.clone(),
            fill: style::resolve(step.color.as_deref(), &base),
        });
    }
    rows
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let journeys: UserJourneys = content::parse(content);
    primitives::paragraph(
        ctx,
        "Each journey describes, step by step, how a persona moves towards a goal. The steps \
         later anchor the features that support them.",
    );
    let journeys: Vec<&Journey> = journeys
        .journeys
        .iter()
        .filter(|j| !j.name.is_empty() || !j.persona.is_empty() || !content::filled(&j.steps).is_empty())
        .collect();
    if journeys.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    for (i, journey) in journeys.into_iter().enumerate() {
        let rows = rows(journey);
        let table_h = primitives::key_value_table_height(&rows);
        // Keep short journeys whole; long ones flow row by row.
        if table_h < CONTENT_BOTTOM - HEADER_BOTTOM {
            primitives::check_page_break(ctx, table_h + 20.0);
        }
        let heading = if journey.name.is_empty() {
            format!("Journey {}", i + 1)
        } else {
            journey.name.clone()
        };
        primitives::subheading(ctx, &heading);
        primitives::key_value_table(ctx, &rows);
    }
}
