//! Integration tests for the inception-report pipeline.
//!
//! These tests validate:
//! - The page structure (cover, table of contents, one section per template)
//! - Table-of-contents entries point at the pages their sections start on
//! - Blocks that must stay whole are never split across pages
//! - PDF output exists, has a valid format, and layout is deterministic

use inception_report::surface::{Element, Surface};
use inception_report::{generate, generate_from_json, Report, ReportOptions, TemplateKind, TocEntry};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

// =====================================================================
// Helpers
// =====================================================================

const WORKSHOP: &str = include_str!("../demos/workshop.json");

fn options() -> ReportOptions {
    let _ = env_logger::builder().is_test(true).try_init();
    ReportOptions {
        brand_name: "Acme Labs".to_string(),
    }
}

fn report(templates: Value) -> Report {
    serde_json::from_value(json!({
        "title": "Checkout revamp",
        "workshopName": "Checkout revamp inception",
        "templates": templates,
        "metadata": { "generatedAt": "2026-03-06" }
    }))
    .unwrap()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert_eq!(&bytes[0..5], b"%PDF-", "Missing PDF header");
}

fn fingerprint(surface: &Surface) -> String {
    let digest = Sha256::digest(surface.to_json().as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// `(page index, top y)` of every text element equal to `text`.
fn text_positions(surface: &Surface, text: &str) -> Vec<(usize, f32)> {
    surface
        .pages
        .iter()
        .enumerate()
        .flat_map(|(i, page)| {
            page.elements.iter().filter_map(move |e| match e {
                Element::Text { y, text: t, .. } if t == text => Some((i, *y)),
                _ => None,
            })
        })
        .collect()
}

// =====================================================================
// Page structure
// =====================================================================

#[test]
fn single_kickoff_produces_cover_toc_and_section() {
    let r = report(json!([{
        "name": "Kickoff",
        "stepNumber": 1,
        "content": {
            "fullWorkshopParticipants": [{ "text": "Alice" }],
            "partialWorkshopParticipants": []
        }
    }]));
    let out = generate(&r, &options());
    assert!(out.page_count() >= 3);
    assert_eq!(
        out.toc(),
        &[TocEntry {
            step_number: 1,
            name: "Kickoff".to_string(),
            page: 3,
        }]
    );
    assert_eq!(out.surface().find_text("Alice"), Some(2));
}

#[test]
fn every_page_has_a_footer() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    let total = out.page_count();
    for (i, page) in out.surface().pages.iter().enumerate() {
        let label = format!("Page {} / {}", i + 1, total);
        assert!(page.texts().any(|t| t == label), "page {} lacks its footer", i + 1);
        assert!(page.texts().any(|t| t == "Acme Labs"));
    }
}

#[test]
fn content_pages_carry_the_running_header() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    let pages = &out.surface().pages;
    assert!(!pages[0].texts().any(|t| t == "2026-03-06"), "cover has no running header");
    for page in &pages[1..] {
        assert!(page.texts().any(|t| t == "Checkout Revamp Inception"));
        assert!(page.texts().any(|t| t == "2026-03-06"));
    }
}

// =====================================================================
// Table of contents
// =====================================================================

#[test]
fn toc_entries_match_section_title_pages() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    let report = Report::from_json(WORKSHOP).unwrap();
    assert_eq!(out.toc().len(), report.templates.len());

    for entry in out.toc() {
        let title = format!("{}. {}", entry.step_number, entry.name);
        let page = out.surface().find_text(&title).map(|i| i + 1);
        assert_eq!(page, Some(entry.page), "{title}");
    }
    let steps: Vec<_> = out.toc().iter().map(|e| e.step_number).collect();
    let mut sorted = steps.clone();
    sorted.sort();
    assert_eq!(steps, sorted);
}

#[test]
fn toc_names_are_canonical() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    for entry in out.toc() {
        assert_ne!(
            TemplateKind::from_name(&entry.name),
            TemplateKind::Unknown(entry.name.clone()),
            "{} is not a known template",
            entry.name
        );
    }
    let names: Vec<_> = out.toc().iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"Product Vision"));
    assert!(names.contains(&"Sequencer"));
    assert!(names.contains(&"MVP Canvas"));
}

#[test]
fn toc_is_drawn_on_page_two() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    let toc_page = &out.surface().pages[1];
    assert!(toc_page.texts().any(|t| t == "Table of Contents"));
    for entry in out.toc() {
        assert!(toc_page.texts().any(|t| t == entry.name), "{} missing from TOC", entry.name);
    }
}

#[test]
fn unknown_templates_render_a_notice() {
    let r = report(json!([
        { "name": "Kickoff", "stepNumber": 1 },
        { "name": "Retrospective", "stepNumber": 2, "content": { "x": 1 } }
    ]));
    let out = generate(&r, &options());
    assert_eq!(out.toc().len(), 2);
    assert_eq!(out.toc()[1].name, "Retrospective");
    let notice = "Renderer not implemented for template \"Retrospective\".";
    assert_eq!(out.surface().find_text(notice), Some(out.toc()[1].page - 1));
}

// =====================================================================
// Blocks kept whole
// =====================================================================

fn canvas_notes(prefix: &str) -> Value {
    let list: Vec<String> = (0..8).map(|i| format!("{prefix}{i}")).collect();
    json!({
        "personas": list, "proposal": list, "journeys": list,
        "features": list, "outcomes": list, "metrics": list, "costSchedule": list
    })
}

#[test]
fn large_mvp_canvases_each_fit_one_page() {
    let mut first = canvas_notes("A");
    first["name"] = json!("First MVP");
    let mut second = canvas_notes("B");
    second["name"] = json!("Second MVP");
    let r = report(json!([{
        "name": "MVP Canvas",
        "stepNumber": 11,
        "content": { "canvases": [first, second] }
    }]));
    let out = generate(&r, &options());
    let surface = out.surface();

    let pages_of = |prefix: &str| {
        let mut pages: Vec<usize> = (0..8)
            .flat_map(|i| text_positions(surface, &format!("{prefix}{i}")))
            .map(|(page, _)| page)
            .collect();
        pages.dedup();
        pages
    };
    let a = pages_of("A");
    let b = pages_of("B");
    assert_eq!(a.len(), 1, "first canvas split over pages {a:?}");
    assert_eq!(b.len(), 1, "second canvas split over pages {b:?}");
    assert_eq!(b[0], a[0] + 1);
    assert_eq!(surface.find_text("Second MVP"), Some(b[0]));
}

#[test]
fn sequencer_tags_wrap_three_per_row() {
    let r = report(json!([{
        "name": "Sequencer",
        "stepNumber": 10,
        "content": { "waves": [{ "tags": ["T1", "T2", "T3", "T4", "T5"] }] }
    }]));
    let out = generate(&r, &options());
    let y = |t: &str| text_positions(out.surface(), t)[0].1;
    assert_eq!(y("T1"), y("T2"));
    assert_eq!(y("T2"), y("T3"));
    assert_eq!(y("T4"), y("T5"));
    assert!(y("T4") > y("T1"));
}

// =====================================================================
// Robustness
// =====================================================================

#[test]
fn every_known_template_survives_empty_content() {
    let templates: Vec<Value> = TemplateKind::KNOWN
        .iter()
        .enumerate()
        .map(|(i, kind)| json!({ "name": kind.display_name(), "stepNumber": i, "content": null }))
        .collect();
    let out = generate(&report(Value::Array(templates)), &options());
    assert_eq!(out.toc().len(), 14);
    assert_eq!(out.page_count(), 16);
    assert_valid_pdf(&out.save().unwrap());
}

#[test]
fn malformed_content_degrades_to_placeholders() {
    let r = report(json!([
        { "name": "Personas", "stepNumber": 1, "content": "oops" },
        { "name": "Product Vision", "stepNumber": 2, "content": { "visions": 42 } },
        { "name": "Sequencer", "stepNumber": 3, "content": { "waves": [null, 7] } }
    ]));
    let out = generate(&r, &options());
    assert_eq!(out.toc().len(), 3);
    assert!(out.surface().find_text("No data was recorded for this step.").is_some());
}

#[test]
fn invalid_json_is_rejected() {
    assert!(generate_from_json("[1, 2", &options()).is_err());
}

// =====================================================================
// Output
// =====================================================================

#[test]
fn full_workshop_renders_to_pdf() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    assert_eq!(out.toc().len(), 14);
    assert_valid_pdf(&out.save().unwrap());
}

#[test]
fn layout_is_deterministic() {
    let a = generate_from_json(WORKSHOP, &options()).unwrap();
    let b = generate_from_json(WORKSHOP, &options()).unwrap();
    assert_eq!(a.page_count(), b.page_count());
    assert_eq!(a.toc(), b.toc());
    assert_eq!(fingerprint(a.surface()), fingerprint(b.surface()));
}

#[test]
fn surface_json_roundtrip() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    let json = out.surface().to_json();
    let restored = Surface::from_json(&json).unwrap();
    assert_eq!(restored.page_count(), out.page_count());
    assert_eq!(fingerprint(&restored), fingerprint(out.surface()));
}

#[test]
fn save_to_writes_the_file() {
    let out = generate_from_json(WORKSHOP, &options()).unwrap();
    let path = std::env::temp_dir().join(format!("inception-report-{}.pdf", std::process::id()));
    let written = out.save_to(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), written);
    assert_valid_pdf(&bytes);
    let _ = std::fs::remove_file(&path);
}
