//! Product Vision: the one-sentence vision statement as a key/value table.

use serde_json::Value;

use super::row_fill;
use crate::content::{self, ProductVision, VisionRecord};
use crate::context::{LayoutContext, TextStyle, CONTENT_WIDTH};
use crate::primitives::{self, KvRow};

const CALLOUT_WIDTH: f32 = 120.0;

/// `(label, colour-override key)` for each line of the vision statement.
const FIELDS: [(&str, &str); 7] = [
    ("For", "forWhom"),
    ("Who", "who"),
    ("The", "productName"),
    ("Is a", "isA"),
    ("That", "that"),
    ("Unlike", "unlike"),
    ("Our product", "ourProduct"),
];

fn values(record: &VisionRecord) -> [&str; 7] {
    [
        &record.for_whom,
        &record.who,
        &record.product_name,
        &record.is_a,
        &record.that,
        &record.unlike,
        &record.our_product,
    ]
}

fn rows(record: &VisionRecord) -> Vec<KvRow> {
    FIELDS
        .iter()
        .zip(values(record))
        .map(|((label, key), value)| KvRow {
            label: (*label).to_string(),
            value: value.to_string(),
            fill: row_fill(&record.colors, key, &record.color),
        })
        .collect()
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let vision: ProductVision = content::parse(content);
    primitives::paragraph(
        ctx,
        "The product vision states, in one sentence, who the product is for, what need it \
         addresses and what sets it apart from the alternatives.",
    );
    let records: Vec<&VisionRecord> = vision
        .visions
        .iter()
        .filter(|r| values(r).iter().any(|v| !v.is_empty()))
        .collect();
    if records.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    let many = records.len() > 1;
    for (i, record) in records.into_iter().enumerate() {
        let rows = rows(record);
        let heading = if many { Some(format!("Vision {}", i + 1)) } else { None };
        let heading_h = heading
            .as_deref()
            .map(|h| TextStyle::subheading().height_of(h, CONTENT_WIDTH) + 2.0)
            .unwrap_or(0.0);
        let callout_h = if record.product_name.is_empty() {
            0.0
        } else {
            TextStyle::subheading().height_of(&record.product_name, CALLOUT_WIDTH) + primitives::PARAGRAPH_GAP
        };
        primitives::check_page_break(ctx, heading_h + callout_h + primitives::key_value_table_height(&rows));
        if let Some(heading) = heading {
            primitives::subheading(ctx, &heading);
        }
        if !record.product_name.is_empty() {
            primitives::centered_callout(ctx, &record.product_name, CALLOUT_WIDTH);
        }
        primitives::key_value_table(ctx, &rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use serde_json::json;

    #[test]
    fn fills_follow_override_then_record_colour() {
        let v: ProductVision = content::parse(&json!({ "visions": [{
            "forWhom": "Online shoppers",
            "color": "blue-100",
            "colors": { "that": "green-200" }
        }]}));
        let rows = rows(&v.visions[0]);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].fill, style::scheme("#dbeafe"));
        assert_eq!(rows[4].fill, style::scheme("#bbf7d0"));
    }

    #[test]
    fn rows_default_to_value_fill() {
        let rows = rows(&VisionRecord::default());
        assert!(rows.iter().all(|r| r.fill == style::scheme(style::VALUE_FILL)));
    }

    #[test]
    fn product_name_is_called_out() {
        let mut c = LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01");
        render(&mut c, &json!({ "visions": [{ "productName": "QuickPay", "isA": "checkout" }] }));
        let hits = c.surface.pages[0].texts().filter(|t| *t == "QuickPay").count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn blank_records_show_placeholder() {
        let mut c = LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01");
        render(&mut c, &json!({ "visions": [{}] }));
        assert!(c.surface.find_text(super::super::NO_DATA).is_some());
    }
}
