//! # inception-report – Lean Inception workshop report → PDF
//!
//! This crate turns the data collected during a Lean Inception workshop into
//! a paginated A4 report. The pipeline stages are:
//!
//! 1. **Read** – report JSON → [`model::Report`], template content read
//!    leniently into typed shapes ([`content`])
//! 2. **Cover** – title page, then one page reserved for the table of
//!    contents ([`toc`])
//! 3. **Sections** – templates sorted by step number, each drawn by the
//!    renderer for its [`sections::TemplateKind`] through the shared layout
//!    context, primitives and grid engine ([`context`], [`primitives`],
//!    [`grid`])
//! 4. **Back-fill** – the reserved page receives the real page numbers, and
//!    every page gets its footer
//! 5. **Render** – the page arena ([`surface`]) is emitted as PDF bytes via
//!    printpdf ([`render`])

pub mod content;
pub mod context;
pub mod error;
pub mod fonts;
pub mod grid;
pub mod model;
pub mod photo;
pub mod pipeline;
pub mod primitives;
pub mod render;
pub mod sections;
pub mod style;
pub mod surface;
pub mod toc;

// Re-exports for convenience
pub use error::ReportError;
pub use model::{Metadata, Participants, Report, ReportOptions, TemplateEntry};
pub use pipeline::{generate, generate_from_json, GeneratedReport};
pub use sections::TemplateKind;
pub use toc::TocEntry;
