//! Pipeline – ties validation, composition, layout, and rendering into a
//! single call.

use std::path::PathBuf;

use crate::error::GenerateError;
use crate::fonts::FontManager;
use crate::layout::{layout_blocks, DocumentLayout, PageGeometry};
use crate::profile::{AuxiliaryPerson, DeclarantProfile, GeneratedDocument, RenderOptions};
use crate::render::render_pdf;
use crate::strings::DocumentStrings;
use crate::template::compose;
use crate::validate::validate;

/// Configuration for one document pipeline.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    pub geometry: PageGeometry,
    /// Directory holding the DejaVu typeface set; `None` forces the builtin
    /// fallback fonts.
    pub fonts_dir: Option<PathBuf>,
    pub strings: DocumentStrings,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Declaração de Residência".to_string(),
            geometry: PageGeometry::a4(),
            fonts_dir: Some(PathBuf::from("fonts")),
            strings: DocumentStrings::portuguese(),
        }
    }
}

impl DocumentConfig {
    fn font_manager(&self) -> FontManager {
        match &self.fonts_dir {
            Some(dir) => FontManager::from_dir(dir),
            None => FontManager::fallback(),
        }
    }
}

/// Full pipeline: validated form state → PDF document.
///
/// Validation failures never reach the rendering stage; asset problems
/// degrade inside it; only a serialisation failure surfaces as a render
/// error.
pub fn generate_document(
    profile: &DeclarantProfile,
    persons: &[AuxiliaryPerson],
    options: &RenderOptions,
    config: &DocumentConfig,
) -> Result<GeneratedDocument, GenerateError> {
    validate(profile)?;

    let fonts = config.font_manager();
    if !fonts.has_real_fonts() {
        log::warn!(
            "DejaVu typeface set not found; using builtin fonts \
             (Cyrillic and some diacritics may render incorrectly)"
        );
    }

    let blocks = compose(profile, persons, options, &config.strings);
    let layout = layout_blocks(
        &blocks,
        options.logo.as_deref(),
        &config.geometry,
        &fonts,
        &config.title,
    );
    let bytes = render_pdf(&layout, &fonts)?;
    Ok(GeneratedDocument::new(bytes))
}

/// Layout only, no PDF rendering – useful for tests and inspection.
pub fn compute_document_layout(
    profile: &DeclarantProfile,
    persons: &[AuxiliaryPerson],
    options: &RenderOptions,
    config: &DocumentConfig,
) -> DocumentLayout {
    let fonts = config.font_manager();
    let blocks = compose(profile, persons, options, &config.strings);
    layout_blocks(
        &blocks,
        options.logo.as_deref(),
        &config.geometry,
        &fonts,
        &config.title,
    )
}
