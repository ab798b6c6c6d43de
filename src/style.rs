//! Colour resolution – maps hex strings and Tailwind-like palette tokens
//! (as stored by the workshop UI) to concrete colours.
//!
//! Resolution never fails: anything that is neither a strict hex colour nor a
//! known palette name resolves to the caller-supplied fallback.

use serde::{Deserialize, Serialize};

/// RGBA colour (0.0 – 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Self::rgb8(r, g, b))
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Self::rgb8(r, g, b))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Report colour scheme
// ---------------------------------------------------------------------------

/// Brand accent used for banners and table headers.
pub const ACCENT: &str = "#1e3a8a";
/// Body text.
pub const TEXT: &str = "#1f2937";
/// Secondary text (explanatory copy, header/footer).
pub const MUTED: &str = "#6b7280";
/// Thin rules and card borders.
pub const RULE: &str = "#d1d5db";
/// Default note fill when a note carries no colour of its own.
pub const NOTE_FILL: &str = "#fef9c3";
/// Default value-cell fill in key/value tables.
pub const VALUE_FILL: &str = "#f3f4f6";
/// Label-cell fill in key/value tables.
pub const LABEL_FILL: &str = "#e5e7eb";

/// Tailwind-like palette: `family-shade` → hex.
const PALETTE: &[(&str, &str)] = &[
    ("white", "#ffffff"), ("black", "#000000"),
    // Colours are opaque RGB; pages are white, so see-through paints as the page.
    ("transparent", "#ffffff"),
    ("gray-100", "#f3f4f6"), ("gray-200", "#e5e7eb"), ("gray-300", "#d1d5db"), ("gray-400", "#9ca3af"),
    ("gray-500", "#6b7280"), ("gray-600", "#4b5563"), ("gray-700", "#374151"),
    ("red-100", "#fee2e2"), ("red-200", "#fecaca"), ("red-300", "#fca5a5"), ("red-400", "#f87171"),
    ("red-500", "#ef4444"), ("red-600", "#dc2626"), ("red-700", "#b91c1c"),
    ("orange-100", "#ffedd5"), ("orange-200", "#fed7aa"), ("orange-300", "#fdba74"), ("orange-400", "#fb923c"),
    ("orange-500", "#f97316"), ("orange-600", "#ea580c"), ("orange-700", "#c2410c"),
    ("amber-100", "#fef3c7"), ("amber-200", "#fde68a"), ("amber-300", "#fcd34d"), ("amber-400", "#fbbf24"),
    ("amber-500", "#f59e0b"), ("amber-600", "#d97706"), ("amber-700", "#b45309"),
    ("yellow-100", "#fef9c3"), ("yellow-200", "#fef08a"), ("yellow-300", "#fde047"), ("yellow-400", "#facc15"),
    ("yellow-500", "#eab308"), ("yellow-600", "#ca8a04"), ("yellow-700", "#a16207"),
    ("lime-100", "#ecfccb"), ("lime-200", "#d9f99d"), ("lime-300", "#bef264"), ("lime-400", "#a3e635"),
    ("lime-500", "#84cc16"), ("lime-600", "#65a30d"), ("lime-700", "#4d7c0f"),
    ("green-100", "#dcfce7"), ("green-200", "#bbf7d0"), ("green-300", "#86efac"), ("green-400", "#4ade80"),
    ("green-500", "#22c55e"), ("green-600", "#16a34a"), ("green-700", "#15803d"),
    ("emerald-100", "#d1fae5"), ("emerald-200", "#a7f3d0"), ("emerald-300", "#6ee7b7"), ("emerald-400", "#34d399"),
    ("emerald-500", "#10b981"), ("emerald-600", "#059669"), ("emerald-700", "#047857"),
    ("teal-100", "#ccfbf1"), ("teal-200", "#99f6e4"), ("teal-300", "#5eead4"), ("teal-400", "#2dd4bf"),
    ("teal-500", "#14b8a6"), ("teal-600", "#0d9488"), ("teal-700", "#0f766e"),
    ("cyan-100", "#cffafe"), ("cyan-200", "#a5f3fc"), ("cyan-300", "#67e8f9"), ("cyan-400", "#22d3ee"),
    ("cyan-500", "#06b6d4"), ("cyan-600", "#0891b2"), ("cyan-700", "#0e7490"),
    ("sky-100", "#e0f2fe"), ("sky-200", "#bae6fd"), ("sky-300", "#7dd3fc"), ("sky-400", "#38bdf8"),
    ("sky-500", "#0ea5e9"), ("sky-600", "#0284c7"), ("sky-700", "#0369a1"),
    ("blue-100", "#dbeafe"), ("blue-200", "#bfdbfe"), ("blue-300", "#93c5fd"), ("blue-400", "#60a5fa"),
    ("blue-500", "#3b82f6"), ("blue-600", "#2563eb"), ("blue-700", "#1d4ed8"),
    ("indigo-100", "#e0e7ff"), ("indigo-200", "#c7d2fe"), ("indigo-300", "#a5b4fc"), ("indigo-400", "#818cf8"),
    ("indigo-500", "#6366f1"), ("indigo-600", "#4f46e5"), ("indigo-700", "#4338ca"),
    ("violet-100", "#ede9fe"), ("violet-200", "#ddd6fe"), ("violet-300", "#c4b5fd"), ("violet-400", "#a78bfa"),
    ("violet-500", "#8b5cf6"), ("violet-600", "#7c3aed"), ("violet-700", "#6d28d9"),
    ("purple-100", "#f3e8ff"), ("purple-200", "#e9d5ff"), ("purple-300", "#d8b4fe"), ("purple-400", "#c084fc"),
    ("purple-500", "#a855f7"), ("purple-600", "#9333ea"), ("purple-700", "#7e22ce"),
    ("pink-100", "#fce7f3"), ("pink-200", "#fbcfe8"), ("pink-300", "#f9a8d4"), ("pink-400", "#f472b6"),
    ("pink-500", "#ec4899"), ("pink-600", "#db2777"), ("pink-700", "#be185d"),
    ("rose-100", "#ffe4e6"), ("rose-200", "#fecdd3"), ("rose-300", "#fda4af"), ("rose-400", "#fb7185"),
    ("rose-500", "#f43f5e"), ("rose-600", "#e11d48"), ("rose-700", "#be123c"),
];

/// Utility prefixes the UI stores colour tokens with.
const UTILITY_PREFIXES: &[&str] = &["bg-", "text-", "border-"];

/// True for `#rgb` / `#rrggbb`.
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Resolve a colour token to a concrete hex string.
///
/// - empty / `None` → `fallback`
/// - strict hex (`#abc`, `#aabbcc`) → returned unchanged
/// - otherwise whitespace and a trailing `/NN` opacity suffix are removed, a
///   leading `bg-`/`text-`/`border-` prefix is dropped, and the remainder is
///   looked up in the palette; unknown names yield `fallback`.
pub fn resolve_color(input: Option<&str>, fallback: &str) -> String {
    let raw = match input {
        Some(s) if !s.trim().is_empty() => s,
        _ => return fallback.to_string(),
    };
    if is_hex_color(raw) {
        return raw.to_string();
    }

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let token = strip_opacity(&compact);
    let token = UTILITY_PREFIXES
        .iter()
        .find_map(|p| token.strip_prefix(p))
        .unwrap_or(token);
    let token = token.to_ascii_lowercase();

    PALETTE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, hex)| (*hex).to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// [`resolve_color`] followed by hex decoding.
pub fn resolve(input: Option<&str>, fallback: &str) -> Color {
    Color::from_hex(&resolve_color(input, fallback)).unwrap_or(Color::BLACK)
}

/// Parse one of the fixed scheme constants above.
pub fn scheme(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or(Color::BLACK)
}

fn strip_opacity(token: &str) -> &str {
    match token.rsplit_once('/') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_uses_fallback() {
        assert_eq!(resolve_color(None, "#123456"), "#123456");
        assert_eq!(resolve_color(Some(""), "#123456"), "#123456");
        assert_eq!(resolve_color(Some("   "), "#123456"), "#123456");
    }

    #[test]
    fn hex_passes_through_unchanged() {
        assert_eq!(resolve_color(Some("#FFAA00"), "#000"), "#FFAA00");
        assert_eq!(resolve_color(Some("#abc"), "#000"), "#abc");
    }

    #[test]
    fn transparent_paints_as_the_page() {
        assert_eq!(resolve_color(Some("transparent"), "#abcdef"), "#ffffff");
        assert_eq!(resolve_color(Some("bg-transparent"), "#abcdef"), "#ffffff");
    }

    #[test]
    fn palette_tokens_resolve() {
        assert_eq!(resolve_color(Some("blue-500"), "#000"), "#3b82f6");
        assert_eq!(resolve_color(Some("bg-green-200/50"), "#000"), "#bbf7d0");
        assert_eq!(resolve_color(Some(" bg-red-100 "), "#000"), "#fee2e2");
        assert_eq!(resolve_color(Some("white"), "#000"), "#ffffff");
    }

    #[test]
    fn unknown_tokens_fall_back_exactly() {
        for token in ["#12345", "#ggg", "blue-550", "chartreuse", "bg-", "/50", "rgb(1,2,3)", "#"] {
            assert_eq!(resolve_color(Some(token), "#abcdef"), "#abcdef", "token {token:?}");
        }
    }

    #[test]
    fn color_from_hex() {
        let c = Color::from_hex("#ff8800").unwrap();
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!(Color::from_hex("#zzz").is_none());
    }

    #[test]
    fn resolve_never_panics_on_bad_fallback() {
        assert_eq!(resolve(Some("nope"), "not-a-colour"), Color::BLACK);
    }
}
