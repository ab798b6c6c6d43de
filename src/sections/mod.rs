//! Section renderers – one per workshop template kind.
//!
//! Template names arrive as free text (English or Portuguese, any casing);
//! [`TemplateKind::from_name`] folds them onto a closed set of kinds so that
//! dispatch in [`render`] is an exhaustive match. Names that match nothing
//! become [`TemplateKind::Unknown`] and render a visible notice.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::content::Note;
use crate::context::{Align, LayoutContext, TextStyle, CONTENT_WIDTH, MARGIN_X};
use crate::fonts::Font;
use crate::grid::{self, GridCell, GridOptions};
use crate::primitives::{self, rule_stroke};
use crate::style::{self, Color};

mod agenda;
mod boards;
mod feature_canvas;
mod feature_journeys;
mod is_is_not;
mod journeys;
mod kickoff;
mod mvp_canvas;
mod personas;
mod review;
mod sequencer;
mod vision;

/// Placeholder drawn when a template holds no data.
pub const NO_DATA: &str = "No data was recorded for this step.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    Agenda,
    Kickoff,
    ProductVision,
    ProductIsIsNot,
    ProductGoals,
    Personas,
    FeatureBrainstorming,
    FeatureReview,
    UserJourneys,
    FeatureJourneys,
    Sequencer,
    MvpCanvas,
    FeatureCanvas,
    Showcase,
    Unknown(String),
}

impl TemplateKind {
    /// Every known kind, in workshop order.
    pub const KNOWN: [TemplateKind; 14] = [
        TemplateKind::Agenda,
        TemplateKind::Kickoff,
        TemplateKind::ProductVision,
        TemplateKind::ProductIsIsNot,
        TemplateKind::ProductGoals,
        TemplateKind::Personas,
        TemplateKind::FeatureBrainstorming,
        TemplateKind::FeatureReview,
        TemplateKind::UserJourneys,
        TemplateKind::FeatureJourneys,
        TemplateKind::Sequencer,
        TemplateKind::MvpCanvas,
        TemplateKind::FeatureCanvas,
        TemplateKind::Showcase,
    ];

    /// Resolve a template name through the alias table.
    pub fn from_name(name: &str) -> Self {
        match normalize_name(name).as_str() {
            "agenda" | "workshop agenda" | "lean inception agenda" | "agenda da lean inception"
            | "agenda do workshop" => TemplateKind::Agenda,
            "kickoff" | "kick off" | "abertura" | "kickoff da inception" => TemplateKind::Kickoff,
            "product vision" | "vision" | "visao do produto" | "visao" | "visao de produto" => {
                TemplateKind::ProductVision
            }
            "product is is not" | "product is is not does does not" | "is is not"
            | "is is not does does not" | "e nao e faz nao faz" | "produto e nao e faz nao faz"
            | "o produto e nao e faz nao faz" | "e nao e" => TemplateKind::ProductIsIsNot,
            "product goals" | "goals" | "objetivos do produto" | "objetivos" => {
                TemplateKind::ProductGoals
            }
            "personas" | "persona" => TemplateKind::Personas,
            "feature brainstorming" | "features brainstorming" | "brainstorming"
            | "brainstorming de funcionalidades" | "descobrindo funcionalidades" => {
                TemplateKind::FeatureBrainstorming
            }
            "technical business ux review" | "technical business and ux review" | "feature review"
            | "review" | "revisao tecnica de negocio e ux" | "revisao tecnica negocio e ux" => {
                TemplateKind::FeatureReview
            }
            "user journeys" | "user journey" | "journeys" | "jornadas" | "jornadas do usuario"
            | "jornada do usuario" => TemplateKind::UserJourneys,
            "features journeys" | "features and journeys" | "feature journeys" | "journey features"
            | "funcionalidades e jornadas" | "mapeamento de funcionalidades nas jornadas" => {
                TemplateKind::FeatureJourneys
            }
            "sequencer" | "feature sequencer" | "sequenciador" | "sequenciador de funcionalidades" => {
                TemplateKind::Sequencer
            }
            "mvp canvas" | "canvas mvp" | "canvas do mvp" | "mvp" => TemplateKind::MvpCanvas,
            "feature canvas" | "canvas de funcionalidade" | "canvas da funcionalidade" => {
                TemplateKind::FeatureCanvas
            }
            "showcase" | "final showcase" | "apresentacao final" => TemplateKind::Showcase,
            _ => TemplateKind::Unknown(name.trim().to_string()),
        }
    }

    /// Canonical name used in titles and the table of contents.
    pub fn display_name(&self) -> &str {
        match self {
            TemplateKind::Agenda => "Agenda",
            TemplateKind::Kickoff => "Kickoff",
            TemplateKind::ProductVision => "Product Vision",
            TemplateKind::ProductIsIsNot => "Product Is / Is Not",
            TemplateKind::ProductGoals => "Product Goals",
            TemplateKind::Personas => "Personas",
            TemplateKind::FeatureBrainstorming => "Feature Brainstorming",
            TemplateKind::FeatureReview => "Technical, Business & UX Review",
            TemplateKind::UserJourneys => "User Journeys",
            TemplateKind::FeatureJourneys => "Features & Journeys",
            TemplateKind::Sequencer => "Sequencer",
            TemplateKind::MvpCanvas => "MVP Canvas",
            TemplateKind::FeatureCanvas => "Feature Canvas",
            TemplateKind::Showcase => "Showcase",
            TemplateKind::Unknown(name) => name,
        }
    }
}

/// Lowercase, fold Portuguese accents, and collapse punctuation to spaces.
fn normalize_name(name: &str) -> String {
    let folded: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c if c.is_alphanumeric() => c,
            _ => ' ',
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Draw one template's section body at the cursor.
pub fn render(kind: &TemplateKind, ctx: &mut LayoutContext, content: &Value) {
    log::debug!("rendering {} on page {}", kind.display_name(), ctx.page_number());
    match kind {
        TemplateKind::Agenda => agenda::render(ctx, content),
        TemplateKind::Kickoff => kickoff::render(ctx, content),
        TemplateKind::ProductVision => vision::render(ctx, content),
        TemplateKind::ProductIsIsNot => is_is_not::render(ctx, content),
        TemplateKind::ProductGoals => boards::render_goals(ctx, content),
        TemplateKind::Personas => personas::render(ctx, content),
        TemplateKind::FeatureBrainstorming => boards::render_brainstorming(ctx, content),
        TemplateKind::FeatureReview => review::render(ctx, content),
        TemplateKind::UserJourneys => journeys::render(ctx, content),
        TemplateKind::FeatureJourneys => feature_journeys::render(ctx, content),
        TemplateKind::Sequencer => sequencer::render(ctx, content),
        TemplateKind::MvpCanvas => mvp_canvas::render(ctx, content),
        TemplateKind::FeatureCanvas => feature_canvas::render(ctx, content),
        TemplateKind::Showcase => boards::render_showcase(ctx, content),
        TemplateKind::Unknown(name) => render_unknown(ctx, name),
    }
}

fn render_unknown(ctx: &mut LayoutContext, name: &str) {
    log::warn!("no renderer for template {name:?}");
    let style = TextStyle::new(Font::Bold, 10.0, "#b91c1c");
    let text = format!("Renderer not implemented for template \"{name}\".");
    let height = style.height_of(&text, CONTENT_WIDTH);
    primitives::check_page_break(ctx, height);
    let y = ctx.cursor_y;
    ctx.wrapped(MARGIN_X, y, CONTENT_WIDTH, &text, &style, Align::Left);
    ctx.advance(height + primitives::PARAGRAPH_GAP);
    primitives::paragraph(ctx, "The data for this step is kept in the workshop but cannot be laid out in this report.");
}

// ---------------------------------------------------------------------------
// Sticky-note cards shared by several sections
// ---------------------------------------------------------------------------

pub(crate) const NOTE_PADDING: f32 = 2.5;

fn note_style() -> TextStyle {
    TextStyle::small()
}

/// Height of a note card drawn `width` mm wide.
pub(crate) fn note_height(note: &Note, width: f32) -> f32 {
    note_style().height_of(&note.text, width - 2.0 * NOTE_PADDING) + 2.0 * NOTE_PADDING
}

/// A filled, bordered card with wrapped text.
pub(crate) fn draw_note(ctx: &mut LayoutContext, note: &Note, cell: GridCell) {
    let fill = style::resolve(note.color.as_deref(), style::NOTE_FILL);
    ctx.rect(cell.x, cell.y, cell.width, cell.height, Some(fill), Some(rule_stroke()));
    ctx.wrapped(
        cell.x + NOTE_PADDING,
        cell.y + NOTE_PADDING,
        cell.width - 2.0 * NOTE_PADDING,
        &note.text,
        &note_style(),
        Align::Left,
    );
}

/// Note cards in a grid at the cursor, or a placeholder when there are none.
pub(crate) fn note_grid(ctx: &mut LayoutContext, notes: &[&Note], columns: usize, empty: &str) {
    if notes.is_empty() {
        primitives::placeholder(ctx, empty);
        return;
    }
    let options = GridOptions {
        min_row_height: 10.0,
        ..GridOptions::columns(columns)
    };
    grid::draw_and_advance(ctx, notes, &options, |n, w| note_height(n, w), |ctx, n, cell| {
        draw_note(ctx, n, cell)
    });
}

/// Value-cell fill: per-row override, then record colour, then the default.
pub(crate) fn row_fill(overrides: &BTreeMap<String, String>, key: &str, record_color: &str) -> Color {
    let base = style::resolve_color(Some(record_color), style::VALUE_FILL);
    style::resolve(overrides.get(key).map(String::as_str), &base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CONTENT_BOTTOM;
    use serde_json::json;

    fn ctx() -> LayoutContext {
        LayoutContext::new("Report", "Workshop", "Brand", "2026-01-01")
    }

    #[test]
    fn aliases_resolve_to_kinds() {
        assert_eq!(TemplateKind::from_name("Kickoff"), TemplateKind::Kickoff);
        assert_eq!(TemplateKind::from_name("  kick-off "), TemplateKind::Kickoff);
        assert_eq!(TemplateKind::from_name("Visão do Produto"), TemplateKind::ProductVision);
        assert_eq!(TemplateKind::from_name("É - Não É - Faz - Não Faz"), TemplateKind::ProductIsIsNot);
        assert_eq!(TemplateKind::from_name("Canvas MVP"), TemplateKind::MvpCanvas);
        assert_eq!(TemplateKind::from_name("Features & Journeys"), TemplateKind::FeatureJourneys);
        assert_eq!(
            TemplateKind::from_name("Revisão Técnica, de Negócio e UX"),
            TemplateKind::FeatureReview
        );
        assert_eq!(
            TemplateKind::from_name(" Retrospective "),
            TemplateKind::Unknown("Retrospective".into())
        );
    }

    #[test]
    fn display_names_round_trip_through_aliases() {
        for kind in TemplateKind::KNOWN {
            assert_eq!(TemplateKind::from_name(kind.display_name()), kind);
        }
    }

    #[test]
    fn every_renderer_survives_empty_content() {
        for kind in TemplateKind::KNOWN {
            let mut c = ctx();
            let before = c.cursor_y;
            render(&kind, &mut c, &json!({}));
            let moved = c.cursor_y - before;
            assert_eq!(c.page_number(), 1, "{kind:?} broke a page on empty content");
            assert!(moved > 0.0, "{kind:?} drew nothing");
            assert!(moved < CONTENT_BOTTOM, "{kind:?} moved {moved} mm");
        }
    }

    #[test]
    fn every_renderer_survives_mistyped_content() {
        for kind in TemplateKind::KNOWN {
            let mut c = ctx();
            render(&kind, &mut c, &json!([1, "two", null]));
            render(&kind, &mut c, &json!({ "personas": 3, "waves": "x", "canvases": [null] }));
            assert!(c.cursor_y > 0.0);
        }
    }

    #[test]
    fn unknown_templates_draw_a_notice() {
        let mut c = ctx();
        render(&TemplateKind::Unknown("Retro".into()), &mut c, &json!({}));
        assert!(c
            .surface
            .find_text("Renderer not implemented for template \"Retro\".")
            .is_some());
    }

    #[test]
    fn row_fill_prefers_override_then_record_colour() {
        let mut overrides = BTreeMap::new();
        overrides.insert("that".to_string(), "green-100".to_string());
        assert_eq!(row_fill(&overrides, "that", "blue-100"), style::resolve(Some("#dcfce7"), "#000"));
        assert_eq!(row_fill(&overrides, "unlike", "blue-100"), style::resolve(Some("#dbeafe"), "#000"));
        assert_eq!(row_fill(&overrides, "unlike", ""), style::scheme(style::VALUE_FILL));
        overrides.insert("who".to_string(), "nonsense".to_string());
        assert_eq!(row_fill(&overrides, "who", "blue-100"), style::resolve(Some("#dbeafe"), "#000"));
    }
}
