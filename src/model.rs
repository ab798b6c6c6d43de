//! Report input – the plain data object the surrounding application hands
//! over. Every field is optional on the wire; missing values default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A workshop's accumulated template data plus metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub workshop_name: String,
    pub templates: Vec<TemplateEntry>,
    pub metadata: Metadata,
}

/// One filled-in workshop template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateEntry {
    pub name: String,
    /// Used for ordering only; duplicates and gaps are fine.
    pub step_number: i64,
    /// Free-form, shaped by the template kind; never validated.
    pub content: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub status: Option<String>,
    pub steps_summary: Option<String>,
    pub generated_at: Option<String>,
    pub participants: Option<Participants>,
}

/// Participants arrive either as a list of names or one free-text string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Participants {
    List(Vec<String>),
    Text(String),
}

impl Participants {
    /// Comma-separated display form.
    pub fn display(&self) -> String {
        match self {
            Participants::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            Participants::Text(text) => text.trim().to_string(),
        }
    }
}

/// Caller options. The brand name is printed verbatim in every footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportOptions {
    pub brand_name: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            brand_name: "Lean Inception".to_string(),
        }
    }
}

impl Report {
    /// Parse a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
