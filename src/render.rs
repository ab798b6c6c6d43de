//! PDF renderer – takes a [`Surface`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API) with the built-in Helvetica faces.

use std::collections::{HashMap, HashSet};

use printpdf::*;

use crate::error::ReportError;
use crate::fonts::{Font, PT_TO_MM};
use crate::photo::parse_data_uri;
use crate::style::Color as Rgba;
use crate::surface::{Element, Stroke, Surface};

/// A printpdf XObject together with the pixel dimensions of the source image.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Millimetres → points.
fn pt(mm: f32) -> Pt {
    Pt(mm / PT_TO_MM)
}

/// Render a surface into PDF bytes.
///
/// Images whose `src` is not a base64 data URI, or whose bytes cannot be
/// decoded, are skipped (a `log::warn` is emitted).
pub fn render_pdf(surface: &Surface) -> Result<Vec<u8>, ReportError> {
    if !(surface.page_width_mm > 0.0 && surface.page_height_mm > 0.0) {
        return Err(ReportError::Pdf(format!(
            "invalid page size {}×{} mm",
            surface.page_width_mm, surface.page_height_mm
        )));
    }
    let page_w = Mm(surface.page_width_mm);
    let page_h = Mm(surface.page_height_mm);

    let mut doc = PdfDocument::new(&surface.title);
    let images = register_images(&mut doc, surface);

    let mut pages = Vec::with_capacity(surface.pages.len());
    for page in &surface.pages {
        let mut ops = Vec::new();
        for element in &page.elements {
            render_element(&mut ops, element, surface.page_height_mm, &images);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());
    log::debug!(
        "rendered {} page(s), {} image(s), {} bytes",
        surface.page_count(),
        images.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn register_images(doc: &mut PdfDocument, surface: &Surface) -> HashMap<String, ImageResource> {
    let all_srcs: HashSet<&str> = surface
        .pages
        .iter()
        .flat_map(|p| p.elements.iter())
        .filter_map(|e| match e {
            Element::Image { src, .. } => Some(src.as_str()),
            _ => None,
        })
        .collect();

    let mut image_resources = HashMap::new();
    let mut img_warnings: Vec<PdfWarnMsg> = Vec::new();

    for src in all_srcs {
        let bytes = match parse_data_uri(src) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Skipping image: {e}");
                continue;
            }
        };

        // Decode with the `image` crate to obtain pixel dimensions.
        let dyn_img = match ::image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Skipping image: decode error: {e}");
                continue;
            }
        };

        let raw = match RawImage::decode_from_bytes(&bytes, &mut img_warnings) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping image: PDF encode error: {e}");
                continue;
            }
        };
        let xobj_id = doc.add_image(&raw);

        image_resources.insert(
            src.to_string(),
            ImageResource {
                xobj_id,
                px_width: dyn_img.width(),
                px_height: dyn_img.height(),
            },
        );
    }
    image_resources
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn pdf_color(c: &Rgba) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: pt(x), y: pt(y) },
        bezier: false,
    }
}

/// Corner points of a rectangle given in PDF space (origin bottom-left, mm).
fn corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<LinePoint> {
    vec![
        point(x1, y1),
        point(x2, y1),
        point(x2, y2),
        point(x1, y2),
    ]
}

fn set_stroke(ops: &mut Vec<Op>, stroke: &Stroke) {
    ops.push(Op::SetOutlineColor {
        col: pdf_color(&stroke.color),
    });
    ops.push(Op::SetOutlineThickness {
        pt: pt(stroke.width),
    });
}

fn builtin(font: Font) -> BuiltinFont {
    match font {
        Font::Regular => BuiltinFont::Helvetica,
        Font::Bold => BuiltinFont::HelveticaBold,
        Font::Italic => BuiltinFont::HelveticaOblique,
        Font::BoldItalic => BuiltinFont::HelveticaBoldOblique,
    }
}

/// Render one element into PDF ops.
fn render_element(
    ops: &mut Vec<Op>,
    element: &Element,
    page_height: f32,
    images: &HashMap<String, ImageResource>,
) {
    // PDF coordinate system: origin at bottom-left.
    // The surface uses origin at top-left.
    match element {
        Element::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let x1 = *x;
            let y1 = page_height - y - height;
            let x2 = x + width;
            let y2 = page_height - y;

            if let Some(fill) = fill {
                ops.push(Op::SetFillColor {
                    col: pdf_color(fill),
                });
                ops.push(Op::DrawPolygon {
                    polygon: Polygon {
                        rings: vec![PolygonRing {
                            points: corners(x1, y1, x2, y2),
                        }],
                        mode: PaintMode::Fill,
                        winding_order: WindingOrder::NonZero,
                    },
                });
            }
            if let Some(stroke) = stroke {
                set_stroke(ops, stroke);
                ops.push(Op::DrawLine {
                    line: Line {
                        points: corners(x1, y1, x2, y2),
                        is_closed: true,
                    },
                });
            }
        }
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            set_stroke(ops, stroke);
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![point(*x1, page_height - y1), point(*x2, page_height - y2)],
                    is_closed: false,
                },
            });
        }
        Element::Text {
            x,
            y,
            text,
            font,
            size,
            color,
        } => {
            if text.is_empty() {
                return;
            }
            let font = builtin(*font);
            // Baseline ≈ top of line + ascender (approx 0.75 × font_size)
            let ascender = size * 0.75 * PT_TO_MM;
            let baseline = page_height - y - ascender;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: pt(*x),
                    y: pt(baseline),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(*size),
                font,
            });
            ops.push(Op::SetFillColor {
                col: pdf_color(color),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(text))],
                font,
            });
            ops.push(Op::EndTextSection);
        }
        Element::Image {
            x,
            y,
            width,
            height,
            src,
        } => {
            let Some(res) = images.get(src) else {
                return;
            };
            // translate_y = bottom edge of image in PDF coordinates.
            let img_bottom_y = page_height - y - height;

            // At dpi=72 printpdf renders 1 px = 1 pt, so
            // scale = desired_pt / px_dim.
            let scale_x = if res.px_width > 0 {
                pt(*width).0 / res.px_width as f32
            } else {
                1.0
            };
            let scale_y = if res.px_height > 0 {
                pt(*height).0 / res.px_height as f32
            } else {
                1.0
            };

            ops.push(Op::UseXobject {
                id: res.xobj_id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(pt(*x)),
                    translate_y: Some(pt(img_bottom_y)),
                    dpi: Some(72.0),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    rotate: None,
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_empty_page() {
        let surface = Surface::a4("empty");
        let bytes = render_pdf(&surface).unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        // PDF magic number
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn unresolvable_images_are_skipped() {
        let mut surface = Surface::a4("img");
        surface.push(Element::Image {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
            src: "not-a-data-uri".to_string(),
        });
        let bytes = render_pdf(&surface).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn winlatin_maps_typographic_quotes() {
        assert_eq!(to_winlatin("\u{201C}a\u{201D}").as_bytes(), &[0x93, b'a', 0x94]);
        assert_eq!(to_winlatin("é").as_bytes(), &[0xE9]);
    }
}
