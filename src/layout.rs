//! Layout engine – drives wrapping, the vertical cursor, and page overflow.
//!
//! Consumes the composer's ordered [`StyledBlock`] list and produces a
//! frozen [`DocumentLayout`]: absolute-positioned text lines, rules, and
//! image slots per page, ready for the PDF renderer. The frozen form is
//! serde-serializable so layouts can be inspected in tests without
//! rendering.

use serde::{Deserialize, Serialize};

use crate::fonts::{wrap_text, FontManager, FontVariant};
use crate::template::{Align, BlockContent, StyledBlock};

/// Page size and margins in PDF points (1 pt = 1/72 inch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageGeometry {
    /// A4 portrait with 15 mm margins.
    pub fn a4() -> Self {
        Self {
            width_pt: 595.28,
            height_pt: 841.89,
            margin_pt: 42.52,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Lowest y (top-left origin) content may reach before overflowing.
    pub fn bottom_limit(&self) -> f32 {
        self.height_pt - self.margin_pt
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Drawn QR code width (and height) on the page, ~30 mm.
pub const BARCODE_SIZE_PT: f32 = 85.0;

/// Logo slot on page one: fixed position, fixed width, height follows the
/// image's aspect ratio.
pub const LOGO_X_PT: f32 = 42.52;
pub const LOGO_Y_PT: f32 = 34.0;
pub const LOGO_WIDTH_PT: f32 = 85.0;

/// One line of text at an absolute position (top-left origin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
}

/// A horizontal line (the signature rule).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedRule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

/// What an image slot carries. Rasterisation and embedding happen in the
/// render stage so a bad image can degrade there without failing layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImageData {
    /// Raw PNG/JPEG bytes supplied by the caller (logo).
    Raster(Vec<u8>),
    /// Verification string still to be QR-encoded.
    Barcode(String),
}

/// An image slot at an absolute position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedImage {
    pub x: f32,
    pub y: f32,
    pub width_pt: f32,
    /// `None` = keep the source aspect ratio at `width_pt`.
    pub height_pt: Option<f32>,
    pub data: ImageData,
}

/// One page of placed content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    pub texts: Vec<PlacedText>,
    pub rules: Vec<PlacedRule>,
    pub images: Vec<PlacedImage>,
}

/// A complete document layout ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Lay out the block sequence into pages.
///
/// The cursor starts at the top margin, each block advances it by its gap
/// hint plus measured content height, and any line or image that would
/// cross the bottom margin opens a new page. The logo never advances the
/// cursor; it overlays the header area of page one.
pub fn layout_blocks(
    blocks: &[StyledBlock],
    logo: Option<&[u8]>,
    geometry: &PageGeometry,
    fonts: &FontManager,
    title: &str,
) -> DocumentLayout {
    let mut walker = PageWalker::new(geometry);

    for block in blocks {
        walker.advance(block.gap_before);
        match &block.content {
            BlockContent::Paragraph(text) => {
                let variant = FontVariant::from_flags(block.style.bold, block.style.italic);
                let line_height = fonts.line_height_pt(block.style.font_size);
                let lines = wrap_text(
                    text,
                    block.style.font_size,
                    variant,
                    geometry.content_width(),
                    fonts,
                );
                for line in lines {
                    walker.ensure_room(line_height);
                    let x = match block.style.align {
                        Align::Left | Align::Justify => geometry.margin_pt,
                        Align::Center => {
                            let w =
                                fonts.measure_text_width(&line, block.style.font_size, variant);
                            geometry.margin_pt
                                + ((geometry.content_width() - w) / 2.0).max(0.0)
                        }
                    };
                    walker.page.texts.push(PlacedText {
                        x,
                        y: walker.cursor,
                        text: line,
                        font_size: block.style.font_size,
                        bold: block.style.bold,
                        italic: block.style.italic,
                    });
                    walker.advance(line_height);
                }
            }
            BlockContent::Rule => {
                walker.ensure_room(1.0);
                walker.page.rules.push(PlacedRule {
                    x1: geometry.margin_pt,
                    x2: geometry.width_pt - geometry.margin_pt,
                    y: walker.cursor,
                });
            }
            BlockContent::Barcode(code) => {
                walker.ensure_room(BARCODE_SIZE_PT);
                walker.page.images.push(PlacedImage {
                    x: geometry.margin_pt,
                    y: walker.cursor,
                    width_pt: BARCODE_SIZE_PT,
                    height_pt: Some(BARCODE_SIZE_PT),
                    data: ImageData::Barcode(code.clone()),
                });
                walker.advance(BARCODE_SIZE_PT);
            }
        }
    }

    let mut pages = walker.finish();

    if let Some(bytes) = logo {
        pages[0].images.push(PlacedImage {
            x: LOGO_X_PT,
            y: LOGO_Y_PT,
            width_pt: LOGO_WIDTH_PT,
            height_pt: None,
            data: ImageData::Raster(bytes.to_vec()),
        });
    }

    DocumentLayout {
        title: title.to_string(),
        geometry: geometry.clone(),
        pages,
    }
}

/// Vertical cursor over a growing page list.
struct PageWalker<'g> {
    geometry: &'g PageGeometry,
    done: Vec<PageLayout>,
    page: PageLayout,
    cursor: f32,
}

impl<'g> PageWalker<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            done: Vec::new(),
            page: PageLayout::default(),
            cursor: geometry.margin_pt,
        }
    }

    fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Open a new page when `height` more points would cross the bottom
    /// margin. A fresh page always accepts the content, however tall.
    fn ensure_room(&mut self, height: f32) {
        let page_empty =
            self.page.texts.is_empty() && self.page.rules.is_empty() && self.page.images.is_empty();
        if self.cursor + height > self.geometry.bottom_limit() && !page_empty {
            let index = self.done.len();
            self.done.push(std::mem::take(&mut self.page));
            self.page.page_index = index + 1;
            self.cursor = self.geometry.margin_pt;
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.done.push(self.page);
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{DeclarantProfile, RenderOptions};
    use crate::strings::DocumentStrings;
    use crate::template::compose;

    fn profile() -> DeclarantProfile {
        DeclarantProfile {
            full_name: "Maria da Silva".to_string(),
            birth_date: "01/01/2000".to_string(),
            tax_id: "111.222.333-44".to_string(),
            identity_number: "12.345.678-9".to_string(),
            address: "Rua A, 1, Centro".to_string(),
            place: "Rio de Janeiro / RJ".to_string(),
            document_date: "30/08/2026".to_string(),
        }
    }

    fn layout_of(options: &RenderOptions) -> DocumentLayout {
        let blocks = compose(&profile(), &[], options, &DocumentStrings::portuguese());
        layout_blocks(
            &blocks,
            options.logo.as_deref(),
            &PageGeometry::a4(),
            &FontManager::fallback(),
            "declaração",
        )
    }

    #[test]
    fn standard_document_fits_one_page() {
        let layout = layout_of(&RenderOptions::default());
        assert_eq!(layout.pages.len(), 1);
        assert!(!layout.pages[0].texts.is_empty());
        assert_eq!(layout.pages[0].rules.len(), 1);
        assert!(layout.pages[0].images.is_empty());
    }

    #[test]
    fn lines_stay_within_margins() {
        let layout = layout_of(&RenderOptions::default());
        let geo = &layout.geometry;
        for page in &layout.pages {
            for t in &page.texts {
                assert!(t.x >= geo.margin_pt - 0.01);
                assert!(t.y >= geo.margin_pt - 0.01);
                assert!(t.y <= geo.bottom_limit() + 0.01);
            }
        }
    }

    #[test]
    fn long_address_overflows_to_second_page() {
        let mut p = profile();
        p.address = "Rua das Laranjeiras numero quinhentos ".repeat(80);
        let blocks = compose(
            &p,
            &[],
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        let layout = layout_blocks(
            &blocks,
            None,
            &PageGeometry::a4(),
            &FontManager::fallback(),
            "declaração",
        );
        assert!(
            layout.pages.len() > 1,
            "expected overflow, got {} page(s)",
            layout.pages.len()
        );
    }

    #[test]
    fn logo_is_absolute_on_page_one() {
        let options = RenderOptions {
            logo: Some(vec![0x89, 0x50, 0x4e, 0x47]),
            ..Default::default()
        };
        let layout = layout_of(&options);
        let logo = layout.pages[0]
            .images
            .iter()
            .find(|i| matches!(i.data, ImageData::Raster(_)))
            .expect("logo slot");
        assert!((logo.x - LOGO_X_PT).abs() < 0.01);
        assert!((logo.y - LOGO_Y_PT).abs() < 0.01);
        assert!(logo.height_pt.is_none());
    }

    #[test]
    fn verification_adds_exactly_one_image_slot() {
        let base = layout_of(&RenderOptions::default());
        let with_code = layout_of(&RenderOptions {
            verification_text: Some("abc".to_string()),
            ..Default::default()
        });
        let count = |l: &DocumentLayout| l.pages.iter().map(|p| p.images.len()).sum::<usize>();
        assert_eq!(count(&with_code), count(&base) + 1);
    }

    #[test]
    fn frozen_layout_json_roundtrip() {
        let layout = layout_of(&RenderOptions::default());
        let json = layout.to_json();
        let parsed: DocumentLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pages.len(), layout.pages.len());
        assert_eq!(parsed.pages[0].texts.len(), layout.pages[0].texts.len());
    }
}
