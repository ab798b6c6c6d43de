use thiserror::Error;

/// Failures that escape report generation.
///
/// Content problems never show up here: malformed template data degrades to
/// placeholders inside the document instead.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
}
