//! Typed, lenient views of each template's free-form `content`.
//!
//! Nothing here can fail: absent fields default, mistyped fields default, and
//! list elements that cannot be read are dropped with a warning.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read `content` as `T`, falling back to `T::default()`.
pub fn parse<T: DeserializeOwned + Default>(content: &Value) -> T {
    if content.is_null() {
        return T::default();
    }
    serde_json::from_value(content.clone()).unwrap_or_else(|e| {
        log::warn!(
            "unreadable {} content ({e}); rendering as empty",
            std::any::type_name::<T>().rsplit("::").next().unwrap_or("template")
        );
        T::default()
    })
}

// ---------------------------------------------------------------------------
// Lenient field deserialisers
// ---------------------------------------------------------------------------

/// Any scalar becomes its string form; objects contribute their text-like key.
fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(text_of(&Value::deserialize(d)?))
}

/// Lists keep the elements that can be read.
fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(d)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("dropping unreadable list entry: {e}");
                None
            }
        })
        .collect())
}

/// String-to-string maps; non-string values are skipped.
fn color_map<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect(),
        _ => BTreeMap::new(),
    })
}

const TEXT_KEYS: &[&str] = &["text", "title", "label", "name", "content", "description"];

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => TEXT_KEYS
            .iter()
            .find_map(|k| map.get(*k).filter(|v| !v.is_object()).map(text_of))
            .unwrap_or_default(),
        Value::Null | Value::Array(_) => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// A sticky note: a bare string, or `{ text, color }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub text: String,
    pub color: Option<String>,
}

impl Note {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: None,
        }
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        let color = value
            .get("color")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Note {
            text: text_of(&value),
            color,
        })
    }
}

/// Notes with no text are noise from the editor; drop them.
pub fn filled(notes: &[Note]) -> Vec<&Note> {
    notes.iter().filter(|n| !n.text.is_empty()).collect()
}

// ---------------------------------------------------------------------------
// Per-template shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kickoff {
    #[serde(deserialize_with = "list")]
    pub full_workshop_participants: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub partial_workshop_participants: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub objectives: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductVision {
    #[serde(alias = "items", deserialize_with = "list")]
    pub visions: Vec<VisionRecord>,
}

/// The classic "For … who … the … is a … that … unlike … our product …"
/// statement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisionRecord {
    #[serde(alias = "for", alias = "forWho", deserialize_with = "text")]
    pub for_whom: String,
    #[serde(alias = "whoNeeds", alias = "need", deserialize_with = "text")]
    pub who: String,
    #[serde(deserialize_with = "text")]
    pub product_name: String,
    #[serde(alias = "productCategory", alias = "category", deserialize_with = "text")]
    pub is_a: String,
    #[serde(alias = "keyBenefit", alias = "benefit", deserialize_with = "text")]
    pub that: String,
    #[serde(alias = "competitor", deserialize_with = "text")]
    pub unlike: String,
    #[serde(alias = "differential", alias = "differentiator", deserialize_with = "text")]
    pub our_product: String,
    #[serde(deserialize_with = "text")]
    pub color: String,
    #[serde(deserialize_with = "color_map")]
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductIsIsNot {
    #[serde(deserialize_with = "list")]
    pub groups: Vec<IsIsNotGroup>,
    #[serde(deserialize_with = "list")]
    pub is: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub is_not: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub does: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub does_not: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IsIsNotGroup {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "list")]
    pub is: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub is_not: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub does: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub does_not: Vec<Note>,
}

impl ProductIsIsNot {
    /// Explicit groups, or one implicit group built from top-level lists.
    pub fn all_groups(&self) -> Vec<IsIsNotGroup> {
        let mut groups = self.groups.clone();
        let loose = [&self.is, &self.is_not, &self.does, &self.does_not];
        if loose.iter().any(|l| !l.is_empty()) {
            groups.push(IsIsNotGroup {
                title: String::new(),
                is: self.is.clone(),
                is_not: self.is_not.clone(),
                does: self.does.clone(),
                does_not: self.does_not.clone(),
            });
        }
        groups
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductGoals {
    #[serde(alias = "objectives", deserialize_with = "list")]
    pub goals: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personas {
    #[serde(deserialize_with = "list")]
    pub personas: Vec<Persona>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Persona {
    #[serde(deserialize_with = "text")]
    pub name: String,
    /// Base64 data URI; anything else leaves the photo box empty.
    #[serde(alias = "image", alias = "photoUrl", deserialize_with = "text")]
    pub photo: String,
    #[serde(deserialize_with = "text")]
    pub profile: String,
    #[serde(alias = "behaviour", deserialize_with = "text")]
    pub behavior: String,
    #[serde(deserialize_with = "text")]
    pub needs: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureList {
    #[serde(alias = "items", deserialize_with = "list")]
    pub features: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureReview {
    #[serde(alias = "items", deserialize_with = "list")]
    pub features: Vec<ReviewCard>,
}

/// A feature after the technical, business and UX review.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewCard {
    #[serde(alias = "title", alias = "name", alias = "feature", deserialize_with = "text")]
    pub text: String,
    #[serde(deserialize_with = "text")]
    pub effort: String,
    #[serde(alias = "business", alias = "value", deserialize_with = "text")]
    pub business_value: String,
    #[serde(alias = "ux", deserialize_with = "text")]
    pub ux_value: String,
    #[serde(deserialize_with = "text")]
    pub confidence: String,
}

impl ReviewCard {
    /// Compact "E: … · $: … · UX: …" summary; empty parts are skipped.
    pub fn value_summary(&self) -> String {
        [
            ("E", &self.effort),
            ("$", &self.business_value),
            ("UX", &self.ux_value),
        ]
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("  ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserJourneys {
    #[serde(deserialize_with = "list")]
    pub journeys: Vec<Journey>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Journey {
    #[serde(alias = "title", deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub persona: String,
    #[serde(deserialize_with = "text")]
    pub goal: String,
    #[serde(deserialize_with = "list")]
    pub steps: Vec<Note>,
    #[serde(deserialize_with = "text")]
    pub color: String,
    #[serde(deserialize_with = "color_map")]
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureJourneys {
    #[serde(deserialize_with = "list")]
    pub journeys: Vec<FeatureJourney>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureJourney {
    #[serde(alias = "title", deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "list")]
    pub steps: Vec<FeatureJourneyStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureJourneyStep {
    #[serde(alias = "title", alias = "name", deserialize_with = "text")]
    pub text: String,
    #[serde(deserialize_with = "list")]
    pub features: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sequencer {
    #[serde(deserialize_with = "list")]
    pub waves: Vec<Wave>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wave {
    #[serde(alias = "title", deserialize_with = "text")]
    pub name: String,
    #[serde(alias = "items", deserialize_with = "list")]
    pub cards: Vec<SequencerCard>,
    #[serde(deserialize_with = "list")]
    pub tags: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub features: Vec<ReviewCard>,
}

impl Wave {
    /// Every card of the wave in drawing order: mixed cards first, then the
    /// separate tag and feature lists.
    pub fn items(&self) -> Vec<SequencerCard> {
        self.cards
            .iter()
            .cloned()
            .chain(self.tags.iter().cloned().map(SequencerCard::Tag))
            .chain(self.features.iter().cloned().map(SequencerCard::Feature))
            .filter(|card| !card.is_blank())
            .collect()
    }
}

/// A wave holds tag pills and reviewed feature cards side by side.
#[derive(Debug, Clone)]
pub enum SequencerCard {
    Tag(Note),
    Feature(ReviewCard),
}

impl SequencerCard {
    fn is_blank(&self) -> bool {
        match self {
            SequencerCard::Tag(note) => note.text.is_empty(),
            SequencerCard::Feature(card) => card.text.is_empty(),
        }
    }
}

impl<'de> Deserialize<'de> for SequencerCard {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        let kind = value
            .get("type")
            .or_else(|| value.get("kind"))
            .and_then(Value::as_str)
            .unwrap_or("");
        if value.is_string() || kind.eq_ignore_ascii_case("tag") {
            let note: Note = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
            return Ok(SequencerCard::Tag(note));
        }
        serde_json::from_value(value)
            .map(SequencerCard::Feature)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MvpCanvas {
    #[serde(alias = "mvps", alias = "items", deserialize_with = "list")]
    pub canvases: Vec<CanvasInstance>,
}

/// One MVP canvas: seven named blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasInstance {
    #[serde(alias = "title", deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "list")]
    pub personas: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub proposal: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub journeys: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub features: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub outcomes: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub metrics: Vec<Note>,
    #[serde(alias = "cost", alias = "costAndSchedule", deserialize_with = "list")]
    pub cost_schedule: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureCanvas {
    #[serde(alias = "items", deserialize_with = "list")]
    pub features: Vec<FeatureCanvasRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureCanvasRecord {
    #[serde(alias = "title", deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "text")]
    pub persona: String,
    #[serde(deserialize_with = "text")]
    pub value: String,
    #[serde(deserialize_with = "text")]
    pub risks: String,
    #[serde(deserialize_with = "text")]
    pub requirements: String,
    #[serde(deserialize_with = "list")]
    pub acceptance: Vec<Note>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Showcase {
    #[serde(deserialize_with = "list")]
    pub highlights: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub attendees: Vec<Note>,
    #[serde(deserialize_with = "list")]
    pub feedback: Vec<Note>,
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Team confidence in a reviewed feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
    Unknown,
}

/// Synonyms accepted by the workshop UI. This is a literal business rule
/// (numeric levels, English and Portuguese words, traffic-light colours).
const CONFIDENCE_SYNONYMS: &[(&str, Confidence)] = &[
    ("3", Confidence::High),
    ("high", Confidence::High),
    ("alta", Confidence::High),
    ("alto", Confidence::High),
    ("green", Confidence::High),
    ("verde", Confidence::High),
    ("2", Confidence::Medium),
    ("medium", Confidence::Medium),
    ("media", Confidence::Medium),
    ("média", Confidence::Medium),
    ("medio", Confidence::Medium),
    ("médio", Confidence::Medium),
    ("yellow", Confidence::Medium),
    ("amarelo", Confidence::Medium),
    ("1", Confidence::Low),
    ("low", Confidence::Low),
    ("baixa", Confidence::Low),
    ("baixo", Confidence::Low),
    ("red", Confidence::Low),
    ("vermelho", Confidence::Low),
];

impl Confidence {
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        CONFIDENCE_SYNONYMS
            .iter()
            .find(|(word, _)| *word == key)
            .map(|(_, level)| *level)
            .unwrap_or(Confidence::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "High confidence",
            Confidence::Medium => "Medium confidence",
            Confidence::Low => "Low confidence",
            Confidence::Unknown => "Confidence not set",
        }
    }

    /// `(background, border)` hex pair.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Confidence::High => ("#dcfce7", "#16a34a"),
            Confidence::Medium => ("#fef9c3", "#ca8a04"),
            Confidence::Low => ("#fee2e2", "#dc2626"),
            Confidence::Unknown => ("#f3f4f6", "#9ca3af"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notes_accept_strings_and_objects() {
        let k: Kickoff = parse(&json!({
            "fullWorkshopParticipants": ["Alice", { "text": "Bob", "color": "blue-200" }, 7, null],
        }));
        let texts: Vec<_> = k.full_workshop_participants.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["Alice", "Bob", "7", ""]);
        assert_eq!(k.full_workshop_participants[1].color.as_deref(), Some("blue-200"));
        assert_eq!(filled(&k.full_workshop_participants).len(), 3);
    }

    #[test]
    fn mistyped_fields_default() {
        let p: Personas = parse(&json!({ "personas": [{ "name": 12, "needs": ["x"] }, "junk"] }));
        assert_eq!(p.personas.len(), 1);
        assert_eq!(p.personas[0].name, "12");
        assert!(p.personas[0].needs.is_empty());

        let v: ProductVision = parse(&json!("not an object"));
        assert!(v.visions.is_empty());
        let s: Sequencer = parse(&Value::Null);
        assert!(s.waves.is_empty());
    }

    #[test]
    fn vision_aliases() {
        let v: ProductVision = parse(&json!({ "visions": [{
            "forWho": "shoppers", "keyBenefit": "fast checkout", "colors": { "that": "green-200", "n": 1 }
        }]}));
        let rec = &v.visions[0];
        assert_eq!(rec.for_whom, "shoppers");
        assert_eq!(rec.that, "fast checkout");
        assert_eq!(rec.colors.len(), 1);
    }

    #[test]
    fn wave_items_mix_cards_in_order() {
        let s: Sequencer = parse(&json!({ "waves": [{
            "cards": [{ "type": "tag", "text": "Wave goal" }, { "title": "Login", "confidence": "verde" }],
            "tags": ["extra"],
            "features": [{ "text": "Search" }, { "text": "" }]
        }]}));
        let items = s.waves[0].items();
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[0], SequencerCard::Tag(n) if n.text == "Wave goal"));
        assert!(matches!(&items[1], SequencerCard::Feature(c) if c.text == "Login"));
        assert!(matches!(&items[2], SequencerCard::Tag(n) if n.text == "extra"));
        assert!(matches!(&items[3], SequencerCard::Feature(c) if c.text == "Search"));
    }

    #[test]
    fn is_is_not_top_level_lists_form_a_group() {
        let c: ProductIsIsNot = parse(&json!({ "is": ["fast"], "doesNot": ["billing"] }));
        let groups = c.all_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].does_not[0].text, "billing");
    }

    #[test]
    fn confidence_synonyms() {
        for raw in ["3", "High", "alta", "ALTO", "green", "verde"] {
            assert_eq!(Confidence::parse(raw), Confidence::High, "{raw}");
        }
        for raw in ["2", "medium", "média", "Medio", "yellow", "amarelo"] {
            assert_eq!(Confidence::parse(raw), Confidence::Medium, "{raw}");
        }
        for raw in ["1", "low", "baixa", "baixo", " red ", "vermelho"] {
            assert_eq!(Confidence::parse(raw), Confidence::Low, "{raw}");
        }
        for raw in ["", "4", "maybe", "azul"] {
            assert_eq!(Confidence::parse(raw), Confidence::Unknown, "{raw}");
        }
    }

    #[test]
    fn review_summary_skips_blank_parts() {
        let card = ReviewCard {
            effort: "EE".into(),
            ux_value: "♥♥".into(),
            ..Default::default()
        };
        assert_eq!(card.value_summary(), "E: EE  UX: ♥♥");
    }
}
