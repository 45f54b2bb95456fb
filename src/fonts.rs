//! Font loading and text measurement using `ttf-parser`.
//!
//! The document expects three style variants of one typeface (DejaVu Sans
//! regular/bold/oblique) in a well-known directory. When any variant is
//! missing the manager degrades to builtin-Helvetica metrics: generation
//! still works, but Cyrillic and some diacritics will not survive the
//! builtin encoding. The degraded state is queryable so the caller can warn.

use std::collections::HashMap;
use std::path::Path;

/// The three style slots the document uses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FontVariant {
    Regular,
    Bold,
    Oblique,
}

impl FontVariant {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, _) => FontVariant::Bold,
            (false, true) => FontVariant::Oblique,
            (false, false) => FontVariant::Regular,
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            FontVariant::Regular => "DejaVuSans.ttf",
            FontVariant::Bold => "DejaVuSans-Bold.ttf",
            FontVariant::Oblique => "DejaVuSans-Oblique.ttf",
        }
    }
}

/// A loaded font face with metrics.
#[derive(Clone)]
pub struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API and for
    /// embedding into the PDF).
    pub bytes: Vec<u8>,
    pub units_per_em: f32,
    pub ascender: f32,
    pub descender: f32,
}

/// Holds the loaded variants, or nothing in degraded mode.
pub struct FontManager {
    fonts: HashMap<FontVariant, FontData>,
}

impl FontManager {
    /// Degraded manager: no real fonts, heuristic metrics only.
    pub fn fallback() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    /// Load all three variants from `dir`. Returns the fallback manager when
    /// any file is absent or unparsable; the caller decides how to surface
    /// the warning.
    pub fn from_dir(dir: &Path) -> Self {
        let mut fonts = HashMap::new();
        for variant in [FontVariant::Regular, FontVariant::Bold, FontVariant::Oblique] {
            let path = dir.join(variant.file_name());
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    log::warn!("font '{}' not available: {e}", path.display());
                    return Self::fallback();
                }
            };
            match parse_font(bytes) {
                Ok(data) => {
                    fonts.insert(variant, data);
                }
                Err(e) => {
                    log::warn!("font '{}' unusable: {e}", path.display());
                    return Self::fallback();
                }
            }
        }
        Self { fonts }
    }

    /// True when the full typeface set was loaded.
    pub fn has_real_fonts(&self) -> bool {
        self.fonts.len() == 3
    }

    /// Font bytes for PDF embedding; `None` in degraded mode.
    pub fn font_bytes(&self, variant: FontVariant) -> Option<&[u8]> {
        self.fonts.get(&variant).map(|d| d.bytes.as_slice())
    }

    /// Measure the width of a string at a given size, in points.
    ///
    /// With real fonts this sums glyph advances; degraded mode uses an
    /// average-width heuristic (0.5 × size per char, bold ~10 % wider).
    pub fn measure_text_width(&self, text: &str, font_size: f32, variant: FontVariant) -> f32 {
        let Some(data) = self.fonts.get(&variant) else {
            let avg = if variant == FontVariant::Bold { 0.55 } else { 0.5 };
            return text.chars().count() as f32 * font_size * avg;
        };

        if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
            let scale = font_size / data.units_per_em;
            let mut width = 0.0f32;
            for ch in text.chars() {
                if let Some(gid) = face.glyph_index(ch) {
                    width += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
                } else {
                    width += font_size * 0.5;
                }
            }
            width
        } else {
            text.chars().count() as f32 * font_size * 0.5
        }
    }

    /// Line height in points for a font size.
    pub fn line_height_pt(&self, font_size: f32) -> f32 {
        font_size * LINE_HEIGHT_FACTOR
    }
}

const LINE_HEIGHT_FACTOR: f32 = 1.4;

fn parse_font(bytes: Vec<u8>) -> Result<FontData, String> {
    let face =
        ttf_parser::Face::parse(&bytes, 0).map_err(|e| format!("failed to parse font: {e}"))?;
    Ok(FontData {
        units_per_em: face.units_per_em() as f32,
        ascender: face.ascender() as f32,
        descender: face.descender() as f32,
        bytes,
    })
}

/// Word-wrap text to fit within `max_width` points. Returns at least one line.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    variant: FontVariant,
    max_width: f32,
    fonts: &FontManager,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();
    for word in &words {
        let candidate = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current_line, word)
        };
        let w = fonts.measure_text_width(&candidate, font_size, variant);
        if w > max_width && !current_line.is_empty() {
            lines.push(current_line);
            current_line = word.to_string();
        } else {
            current_line = candidate;
        }
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}
