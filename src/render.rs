//! PDF renderer – takes a [`DocumentLayout`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).
//!
//! Image slots (logo, QR code) that fail to decode or embed are logged and
//! skipped; a missing image never aborts the document. Only a broken final
//! serialisation fails the render.

use std::collections::HashMap;

use printpdf::*;

use crate::error::{AssetError, RenderError};
use crate::fonts::{FontManager, FontVariant};
use crate::layout::{DocumentLayout, ImageData, PlacedImage, PlacedRule, PlacedText};
use crate::qr;

/// Which fonts the text ops reference.
enum FontSet {
    /// Embedded DejaVu variants, full Unicode.
    Embedded(HashMap<FontVariant, FontId>),
    /// Builtin Helvetica, WinAnsi single-byte encoding (degraded mode).
    Builtin,
}

/// Render a frozen layout into PDF bytes.
pub fn render_pdf(layout: &DocumentLayout, fonts: &FontManager) -> Result<Vec<u8>, RenderError> {
    let page_w = Mm(layout.geometry.width_pt * 0.352778); // pt → mm
    let page_h = Mm(layout.geometry.height_pt * 0.352778);

    let mut doc = PdfDocument::new(&layout.title);
    let font_set = embed_fonts(&mut doc, fonts);

    let mut pages = Vec::new();
    for page_layout in &layout.pages {
        let mut ops = Vec::new();

        for text in &page_layout.texts {
            write_text(&mut ops, text, layout.geometry.height_pt, &font_set);
        }
        for rule in &page_layout.rules {
            draw_rule(&mut ops, rule, layout.geometry.height_pt);
        }
        for slot in &page_layout.images {
            if let Err(e) = place_image(&mut doc, &mut ops, slot, layout.geometry.height_pt) {
                log::warn!("skipping image: {e}");
            }
        }

        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    if bytes.len() < 5 || &bytes[0..5] != b"%PDF-" {
        return Err(RenderError::Serialization(
            "output does not carry a PDF header".to_string(),
        ));
    }
    Ok(bytes)
}

/// Register the loaded typeface variants with the document. Falls back to
/// builtin Helvetica when no real fonts are available or parsing fails.
fn embed_fonts(doc: &mut PdfDocument, fonts: &FontManager) -> FontSet {
    if !fonts.has_real_fonts() {
        return FontSet::Builtin;
    }

    let mut ids = HashMap::new();
    let mut warnings = Vec::new();
    for variant in [FontVariant::Regular, FontVariant::Bold, FontVariant::Oblique] {
        let bytes = match fonts.font_bytes(variant) {
            Some(b) => b,
            None => return FontSet::Builtin,
        };
        match ParsedFont::from_bytes(bytes, 0, &mut warnings) {
            Some(parsed) => {
                ids.insert(variant, doc.add_font(&parsed));
            }
            None => {
                log::warn!("font variant {variant:?} failed to parse, using builtin fonts");
                return FontSet::Builtin;
            }
        }
    }
    FontSet::Embedded(ids)
}

fn write_text(ops: &mut Vec<Op>, text: &PlacedText, page_height: f32, font_set: &FontSet) {
    if text.text.is_empty() {
        return;
    }

    // PDF origin is bottom-left, the layout's is top-left; the baseline sits
    // roughly one ascender below the line top.
    let baseline_y = page_height - text.y - text.font_size * 0.75;
    let pos = Point {
        x: Pt(text.x),
        y: Pt(baseline_y),
    };
    let variant = FontVariant::from_flags(text.bold, text.italic);

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor { pos });
    ops.push(Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            icc_profile: None,
        }),
    });
    match font_set {
        FontSet::Embedded(ids) => {
            let font = ids[&variant].clone();
            ops.push(Op::SetFontSize {
                size: Pt(text.font_size),
                font: font.clone(),
            });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(text.text.clone())],
                font,
            });
        }
        FontSet::Builtin => {
            let font = match variant {
                FontVariant::Regular => BuiltinFont::Helvetica,
                FontVariant::Bold => BuiltinFont::HelveticaBold,
                FontVariant::Oblique => BuiltinFont::HelveticaOblique,
            };
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(text.font_size),
                font,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(&text.text))],
                font,
            });
        }
    }
    ops.push(Op::EndTextSection);
}

fn draw_rule(ops: &mut Vec<Op>, rule: &PlacedRule, page_height: f32) {
    let y = page_height - rule.y;
    ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });
    ops.push(Op::SetOutlineColor {
        col: Color::Rgb(Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            icc_profile: None,
        }),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                LinePoint {
                    p: Point {
                        x: Pt(rule.x1),
                        y: Pt(y),
                    },
                    bezier: false,
                },
                LinePoint {
                    p: Point {
                        x: Pt(rule.x2),
                        y: Pt(y),
                    },
                    bezier: false,
                },
            ],
            is_closed: false,
        },
    });
}

/// Resolve an image slot to bytes, register it as an XObject, and emit the
/// placement op. Every failure path is an [`AssetError`] so the caller can
/// log and move on.
fn place_image(
    doc: &mut PdfDocument,
    ops: &mut Vec<Op>,
    slot: &PlacedImage,
    page_height: f32,
) -> Result<(), AssetError> {
    let bytes = match &slot.data {
        ImageData::Raster(b) => b.clone(),
        ImageData::Barcode(code) => qr::barcode_png(code)?,
    };

    // Decode with the `image` crate to obtain pixel dimensions.
    let dyn_img =
        ::image::load_from_memory(&bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
    let (px_width, px_height) = (dyn_img.width(), dyn_img.height());
    if px_width == 0 || px_height == 0 {
        return Err(AssetError::Decode("zero-sized image".to_string()));
    }

    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(&bytes, &mut warnings)
        .map_err(|e| AssetError::Embed(e.to_string()))?;
    let xobj_id = doc.add_image(&raw);

    let height_pt = slot
        .height_pt
        .unwrap_or(slot.width_pt * px_height as f32 / px_width as f32);

    // At dpi=72 printpdf renders 1 px = 1 pt, so scale = desired_pt / px_dim.
    ops.push(Op::UseXobject {
        id: xobj_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(slot.x)),
            translate_y: Some(Pt(page_height - slot.y - height_pt)),
            dpi: Some(72.0),
            scale_x: Some(slot.width_pt / px_width as f32),
            scale_y: Some(height_pt / px_height as f32),
            rotate: None,
        },
    });
    Ok(())
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF). Characters outside
/// the codepage (notably Cyrillic) degrade to '?'.
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for the 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}
