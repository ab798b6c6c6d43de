//! Pipeline – ties together the cover, the table of contents, the section
//! renderers and the footer pass into a single function call.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};

use crate::context::{Align, LayoutContext, TextStyle, CONTENT_WIDTH, MARGIN_X, PAGE_WIDTH};
use crate::error::ReportError;
use crate::fonts::Font;
use crate::model::{Report, ReportOptions, TemplateEntry};
use crate::primitives::{self, KvRow};
use crate::render::render_pdf;
use crate::sections::{self, TemplateKind};
use crate::style;
use crate::surface::Surface;
use crate::toc::{TableOfContents, TocEntry};

const DEFAULT_TITLE: &str = "Lean Inception Report";
const COVER_BAND_HEIGHT: f32 = 78.0;

/// A laid-out report, ready to be serialised.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    surface: Surface,
    toc: Vec<TocEntry>,
}

impl GeneratedReport {
    pub fn page_count(&self) -> usize {
        self.surface.page_count()
    }

    /// Entries in section order, with final page numbers.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// The page arena, for inspection or a JSON dump.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Serialise to PDF bytes.
    pub fn save(&self) -> Result<Vec<u8>, ReportError> {
        render_pdf(&self.surface)
    }

    /// Serialise to PDF and write it to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<usize, ReportError> {
        let bytes = self.save()?;
        fs::write(path.as_ref(), &bytes)?;
        log::info!("wrote {} ({} bytes)", path.as_ref().display(), bytes.len());
        Ok(bytes.len())
    }
}

/// Header date: `metadata.generatedAt` when present, otherwise today.
fn date_label(report: &Report) -> String {
    match report.metadata.generated_at.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                dt.format("%Y-%m-%d").to_string()
            } else if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                d.format("%Y-%m-%d").to_string()
            } else {
                raw.to_string()
            }
        }
        _ => Local::now().format("%Y-%m-%d").to_string(),
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// Page 1: accent band with brand and title, then the workshop summary.
fn draw_cover(ctx: &mut LayoutContext, report: &Report, title: &str) {
    ctx.fill_rect(0.0, 0.0, PAGE_WIDTH, COVER_BAND_HEIGHT, style::scheme(style::ACCENT));
    let brand = ctx.brand_name().to_string();
    ctx.text(MARGIN_X, 18.0, &brand, &TextStyle::new(Font::Bold, 12.0, "#ffffff"));
    ctx.text(MARGIN_X, 26.0, DEFAULT_TITLE, &TextStyle::new(Font::Regular, 10.5, "#dbeafe"));
    ctx.wrapped(
        MARGIN_X,
        38.0,
        CONTENT_WIDTH,
        title,
        &TextStyle::new(Font::Bold, 24.0, "#ffffff"),
        Align::Left,
    );

    ctx.cursor_y = COVER_BAND_HEIGHT + 12.0;
    let workshop = ctx.workshop_name().to_string();
    primitives::title(ctx, &workshop);
    let date = ctx.date_label().to_string();
    primitives::paragraph(ctx, &format!("Generated on {date}"));

    let meta = &report.metadata;
    let mut rows = Vec::new();
    let fill = style::scheme(style::VALUE_FILL);
    let mut push = |label: &str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            rows.push(KvRow {
                label: label.to_string(),
                value,
                fill,
            });
        }
    };
    push("Status", meta.status.clone());
    push("Participants", meta.participants.as_ref().map(|p| p.display()));
    push("Steps", meta.steps_summary.clone());
    push("Sections", Some(report.templates.len().to_string()));
    ctx.advance(4.0);
    primitives::key_value_table(ctx, &rows);
}

/// Lay out a whole report. Content problems never fail generation.
pub fn generate(report: &Report, options: &ReportOptions) -> GeneratedReport {
    let title = or_default(&report.title, DEFAULT_TITLE);
    let workshop = or_default(&report.workshop_name, title);
    let mut ctx = LayoutContext::new(title, workshop, &options.brand_name, &date_label(report));

    draw_cover(&mut ctx, report, title);
    let mut toc = TableOfContents::reserve(&mut ctx);

    let mut ordered: Vec<&TemplateEntry> = report.templates.iter().collect();
    ordered.sort_by_key(|t| t.step_number);

    for entry in ordered {
        let kind = TemplateKind::from_name(&entry.name);
        primitives::new_page(&mut ctx);
        toc.record(entry.step_number, kind.display_name(), ctx.page_number());
        primitives::title(&mut ctx, &format!("{}. {}", entry.step_number, kind.display_name()));
        sections::render(&kind, &mut ctx, &entry.content);
    }

    let toc = toc.back_fill(&mut ctx);
    primitives::draw_footer(&mut ctx);
    log::debug!("laid out {} pages, {} sections", ctx.surface.page_count(), toc.len());

    GeneratedReport {
        surface: ctx.into_surface(),
        toc,
    }
}

/// Parse a report from JSON and lay it out.
pub fn generate_from_json(json: &str, options: &ReportOptions) -> Result<GeneratedReport, ReportError> {
    let report = Report::from_json(json)?;
    Ok(generate(&report, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metadata;
    use serde_json::json;

    fn report(templates: serde_json::Value) -> Report {
        serde_json::from_value(json!({
            "title": "Checkout revamp",
            "workshopName": "Checkout revamp inception",
            "templates": templates,
            "metadata": { "generatedAt": "2026-03-02T10:00:00Z" }
        }))
        .unwrap()
    }

    #[test]
    fn pipeline_basic() {
        let r = report(json!([{ "name": "Kickoff", "stepNumber": 1, "content": {} }]));
        let out = generate(&r, &ReportOptions::default());
        assert_eq!(out.page_count(), 3);
        let bytes = out.save().unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn templates_are_stably_sorted() {
        let r = report(json!([
            { "name": "Personas", "stepNumber": 5 },
            { "name": "Kickoff", "stepNumber": 1 },
            { "name": "Retro", "stepNumber": 5 },
            { "name": "Product Vision", "stepNumber": 2 }
        ]));
        let out = generate(&r, &ReportOptions::default());
        let names: Vec<_> = out.toc().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Kickoff", "Product Vision", "Personas", "Retro"]);
    }

    #[test]
    fn header_date_prefers_metadata() {
        let r = report(json!([]));
        assert_eq!(date_label(&r), "2026-03-02");
        let plain = Report {
            metadata: Metadata {
                generated_at: Some("March 2026".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(date_label(&plain), "March 2026");
        assert_eq!(date_label(&Report::default()).len(), 10);
    }

    #[test]
    fn empty_report_still_has_cover_and_toc() {
        let out = generate(&Report::default(), &ReportOptions::default());
        assert_eq!(out.page_count(), 2);
        assert!(out.toc().is_empty());
        assert_eq!(out.surface().find_text("This report has no sections."), Some(1));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = generate_from_json("{ not json", &ReportOptions::default()).unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }
}
