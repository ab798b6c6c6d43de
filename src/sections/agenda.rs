//! Agenda: the fixed five-day Lean Inception schedule.

use serde_json::Value;

use crate::context::LayoutContext;
use crate::primitives::{self, Cell};
use crate::style;

const DAYS: [&str; 5] = ["Day 1", "Day 2", "Day 3", "Day 4", "Day 5"];

/// `(period, [activities per day])`.
const SCHEDULE: [(&str, [&str; 5]); 3] = [
    (
        "Morning",
        [
            "Kickoff; Product vision",
            "Personas",
            "User journeys",
            "Technical, business & UX review",
            "MVP canvas",
        ],
    ),
    ("Lunch", ["Lunch", "Lunch", "Lunch", "Lunch", "Lunch"]),
    (
        "Afternoon",
        [
            "Product is / is not; Product goals",
            "Feature brainstorming",
            "Features & journeys",
            "Sequencer",
            "Feature canvas; Showcase",
        ],
    ),
];

pub(super) fn render(ctx: &mut LayoutContext, _content: &Value) {
    primitives::paragraph(
        ctx,
        "The Lean Inception runs over five days. Each day combines activities that build on the \
         results of the previous ones, from the product vision to the MVP canvas.",
    );
    let label_fill = style::scheme(style::LABEL_FILL);
    let lunch_fill = style::scheme(style::VALUE_FILL);
    let rows: Vec<Vec<Cell>> = SCHEDULE
        .iter()
        .map(|(period, activities)| {
            let mut row = vec![Cell::filled(*period, label_fill)];
            row.extend(activities.iter().map(|a| {
                if *period == "Lunch" {
                    Cell::filled(*a, lunch_fill)
                } else {
                    Cell::new(*a)
                }
            }));
            row
        })
        .collect();
    let mut headers = vec![""];
    headers.extend(DAYS);
    primitives::table(ctx, &headers, &[1.2, 2.0, 2.0, 2.0, 2.0, 2.0], &rows);
}
