//! Feature Canvas: one detail table per feature.

use serde_json::Value;

use crate::content::{self, FeatureCanvas, FeatureCanvasRecord};
use crate::context::{LayoutContext, CONTENT_BOTTOM, HEADER_BOTTOM};
use crate::primitives::{self, KvRow};
use crate::style;

fn rows(record: &FeatureCanvasRecord) -> Vec<KvRow> {
    let acceptance = content::filled(&record.acceptance)
        .iter()
        .map(|n| format!("- {}", n.text))
        .collect::<Vec<_>>()
        .join("\n");
    let fill = style::scheme(style::VALUE_FILL);
    [
        ("Description", record.description.clone()),
        ("Persona", record.persona.clone()),
        ("Value", record.value.clone()),
        ("Risks", record.risks.clone()),
        ("Requirements", record.requirements.clone()),
        ("Acceptance criteria", acceptance),
    ]
    .into_iter()
    .map(|(label, value)| KvRow {
        label: label.to_string(),
        value,
        fill,
    })
    .collect()
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let canvas: FeatureCanvas = content::parse(content);
    primitives::paragraph(
        ctx,
        "The feature canvas details the first features of the MVP so the team can start \
         building them right after the workshop.",
    );
    if canvas.features.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    for (i, record) in canvas.features.iter().enumerate() {
        let rows = rows(record);
        let height = primitives::key_value_table_height(&rows);
        if height < CONTENT_BOTTOM - HEADER_BOTTOM {
            primitives::check_page_break(ctx, height + 20.0);
        }
        let name = if record.name.is_empty() {
            format!("Feature {}", i + 1)
        } else {
            record.name.clone()
        };
        primitives::subheading(ctx, &name);
        primitives::key_value_table(ctx, &rows);
    }
}
