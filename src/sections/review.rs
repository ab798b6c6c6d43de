//! Technical, Business & UX Review: one table row per reviewed feature.

use serde_json::Value;

use crate::content::{self, Confidence, FeatureReview, ReviewCard};
use crate::context::LayoutContext;
use crate::primitives::{self, Cell};
use crate::style;

const HEADERS: [&str; 5] = ["Feature", "Effort", "Business value", "UX value", "Confidence"];

fn row(card: &ReviewCard) -> Vec<Cell> {
    let confidence = Confidence::parse(&card.confidence);
    let (bg, _) = confidence.colors();
    vec![
        Cell::new(card.text.as_str()),
        Cell::new(card.effort.as_str()),
        Cell::new(card.business_value.as_str()),
        Cell::new(card.ux_value.as_str()),
        Cell::filled(confidence.label(), style::scheme(bg)),
    ]
}

pub(super) fn render(ctx: &mut LayoutContext, content: &Value) {
    let review: FeatureReview = content::parse(content);
    primitives::paragraph(
        ctx,
        "Each feature was rated for effort, business value and UX value, and the team recorded \
         how confident it is in its understanding of the feature.",
    );
    let cards: Vec<&ReviewCard> = review.features.iter().filter(|c| !c.text.is_empty()).collect();
    if cards.is_empty() {
        primitives::placeholder(ctx, super::NO_DATA);
        return;
    }
    let rows: Vec<Vec<Cell>> = cards.iter().map(|c| row(c)).collect();
    primitives::table(ctx, &HEADERS, &[3.0, 1.2, 1.5, 1.2, 1.8], &rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confidence_cell_is_coloured() {
        let card = ReviewCard {
            text: "Checkout".into(),
            confidence: "verde".into(),
            ..Default::default()
        };
        let cells = row(&card);
        assert_eq!(cells[4].text, "High confidence");
        assert_eq!(cells[4].fill, Some(style::scheme("#dcfce7")));
        assert!(cells[0].fill.is_none());
    }

    #[test]
    fn unrated_features_still_render() {
        let mut c = LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01");
        render(&mut c, &json!({ "features": [{ "title": "Search" }] }));
        assert!(c.surface.find_text("Search").is_some());
        assert!(c.surface.find_text("Confidence not set").is_some());
    }
}
