//! Data-URI photo handling: decoding, intrinsic size, and aspect-preserving fit.

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};

/// Parse a `data:<mime>;base64,<data>` URI and return the raw decoded bytes.
///
/// Returns `Err` if `src` is not a data URI or does not use base64 encoding.
pub fn parse_data_uri(src: &str) -> Result<Vec<u8>, String> {
    if !src.starts_with("data:") {
        let preview: String = src.chars().take(80).collect();
        return Err(format!(
            "Image src must be a base64 data URI \
             (e.g. `data:image/png;base64,...`). Got: {preview:?}"
        ));
    }
    let rest = &src["data:".len()..];
    let comma_pos = rest.find(',').ok_or_else(|| {
        "Invalid data URI: missing `,` separator between header and data".to_string()
    })?;
    let header = &rest[..comma_pos];
    if !header.contains(";base64") {
        return Err("Only base64-encoded data URIs are supported. \
             The header must contain `;base64` (e.g. `data:image/png;base64,...`)."
            .to_string());
    }
    let b64_data = rest[comma_pos + 1..].trim();
    BASE64_STD
        .decode(b64_data)
        .map_err(|e| format!("Base64 decode error: {e}"))
}

/// Decode a data-URI image far enough to learn its pixel dimensions.
pub fn pixel_size(src: &str) -> Result<(u32, u32), String> {
    let bytes = parse_data_uri(src)?;
    let img = ::image::load_from_memory(&bytes).map_err(|e| format!("decode error: {e}"))?;
    match (img.width(), img.height()) {
        (0, _) | (_, 0) => Err("image has a zero dimension".to_string()),
        dims => Ok(dims),
    }
}

/// Placement of an image inside a box: offsets from the box origin and the
/// drawn size, all in the box's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub dx: f32,
    pub dy: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale `px_w × px_h` to fit inside `box_w × box_h`, preserving the aspect
/// ratio and centring the result.
pub fn fit_within(px_w: u32, px_h: u32, box_w: f32, box_h: f32) -> Fit {
    if px_w == 0 || px_h == 0 || box_w <= 0.0 || box_h <= 0.0 {
        return Fit {
            dx: 0.0,
            dy: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }
    let scale = (box_w / px_w as f32).min(box_h / px_h as f32);
    let width = px_w as f32 * scale;
    let height = px_h as f32 * scale;
    Fit {
        dx: (box_w - width) / 2.0,
        dy: (box_h - height) / 2.0,
        width,
        height,
    }
}
