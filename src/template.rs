//! Template composer – builds the ordered block list for one declaration.
//!
//! A pure transform: validation happens upstream, so the composer accepts
//! any input (including all-blank profiles) and never fails.

use crate::profile::{AuxiliaryPerson, DeclarantProfile, RenderOptions};
use crate::strings::DocumentStrings;
use crate::text::{mask, normalize};

/// Horizontal alignment hint carried to the layout stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

/// Font styling for one block.
#[derive(Debug, Clone, Copy)]
pub struct BlockStyle {
    pub bold: bool,
    pub italic: bool,
    pub align: Align,
    pub font_size: f32,
}

impl BlockStyle {
    fn body() -> Self {
        Self {
            bold: false,
            italic: false,
            align: Align::Justify,
            font_size: BODY_SIZE,
        }
    }
}

/// Content of one block in the render sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Paragraph(String),
    /// Horizontal rule across the content width (signature line).
    Rule,
    /// QR verification code encoding the carried string.
    Barcode(String),
}

/// One paragraph/line/image unit, in presentation order.
#[derive(Debug, Clone)]
pub struct StyledBlock {
    pub content: BlockContent,
    pub style: BlockStyle,
    /// Extra vertical space before this block, in points.
    pub gap_before: f32,
}

pub const TITLE_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 12.0;
pub const LABEL_SIZE: f32 = 10.0;

// Placeholder widths per field when blank masking is on. Fixed per field so
// a masked document keeps a recognisable shape.
const W_NAME: usize = 12;
const W_BIRTH: usize = 10;
const W_TAX_ID: usize = 14;
const W_IDENTITY: usize = 10;
const W_ADDRESS: usize = 20;
const W_DOC_KIND: usize = 6;
const W_DOC_NUMBER: usize = 8;
const W_ISSUER: usize = 10;

/// Build the fixed block sequence from normalized, optionally masked fields.
pub fn compose(
    profile: &DeclarantProfile,
    persons: &[AuxiliaryPerson],
    options: &RenderOptions,
    strings: &DocumentStrings,
) -> Vec<StyledBlock> {
    let underline = options.underline_blanks;

    let name = mask(&normalize(&profile.full_name), W_NAME, underline);
    let birth = mask(&normalize(&profile.birth_date), W_BIRTH, underline);
    let tax_id = mask(&normalize(&profile.tax_id), W_TAX_ID, underline);
    let identity = mask(&normalize(&profile.identity_number), W_IDENTITY, underline);
    let address = mask(&normalize(&profile.address), W_ADDRESS, underline);
    let place = normalize(&profile.place);

    let mut blocks = Vec::new();

    // 1. Title
    blocks.push(StyledBlock {
        content: BlockContent::Paragraph(strings.title.to_string()),
        style: BlockStyle {
            bold: true,
            italic: false,
            align: Align::Center,
            font_size: TITLE_SIZE,
        },
        gap_before: 0.0,
    });

    // 2. Declarant paragraph. The name is upper-cased at interpolation time
    // even when it is a masked underscore run.
    blocks.push(StyledBlock {
        content: BlockContent::Paragraph(strings.declarant_paragraph(
            &name.to_uppercase(),
            &birth,
            &tax_id,
            &identity,
            &address,
        )),
        style: BlockStyle::body(),
        gap_before: 18.0,
    });

    // 3. Auxiliary persons, one clause each, omitted entirely when empty.
    if let Some(paragraph) = declaro_paragraph(persons, underline, strings) {
        blocks.push(StyledBlock {
            content: BlockContent::Paragraph(paragraph),
            style: BlockStyle {
                bold: true,
                ..BlockStyle::body()
            },
            gap_before: 8.5,
        });
    }

    // 4. Legal notice (Art. 299), always present.
    blocks.push(StyledBlock {
        content: BlockContent::Paragraph(strings.legal_notice.to_string()),
        style: BlockStyle::body(),
        gap_before: 8.5,
    });

    // 5. Place and date
    blocks.push(StyledBlock {
        content: BlockContent::Paragraph(format!("{}, {}", place, profile.document_date)),
        style: BlockStyle {
            align: Align::Left,
            ..BlockStyle::body()
        },
        gap_before: 17.0,
    });

    // 6. Signature: rule, then the upper-cased name centered beneath it.
    blocks.push(StyledBlock {
        content: BlockContent::Rule,
        style: BlockStyle::body(),
        gap_before: 40.0,
    });
    blocks.push(StyledBlock {
        content: BlockContent::Paragraph(name.to_uppercase()),
        style: BlockStyle {
            bold: true,
            align: Align::Center,
            ..BlockStyle::body()
        },
        gap_before: 11.0,
    });

    // 7. Verification block, only for a non-blank verification string.
    if let Some(code) = options
        .verification_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        blocks.push(StyledBlock {
            content: BlockContent::Paragraph(strings.verification_label.to_string()),
            style: BlockStyle {
                align: Align::Left,
                font_size: LABEL_SIZE,
                ..BlockStyle::body()
            },
            gap_before: 5.5,
        });
        blocks.push(StyledBlock {
            content: BlockContent::Barcode(code.to_string()),
            style: BlockStyle::body(),
            gap_before: 0.0,
        });
    }

    blocks
}

fn declaro_paragraph(
    persons: &[AuxiliaryPerson],
    underline: bool,
    strings: &DocumentStrings,
) -> Option<String> {
    if persons.is_empty() {
        return None;
    }
    let clauses: Vec<String> = persons
        .iter()
        .map(|p| {
            strings.person_clause(
                &mask(&p.name, W_NAME, underline).to_uppercase(),
                &mask(&p.birth_date, W_BIRTH, underline),
                &mask(p.kind.label(), W_DOC_KIND, underline),
                &mask(&p.number, W_DOC_NUMBER, underline),
                &mask(&p.issuer, W_ISSUER, underline),
            )
        })
        .collect();
    Some(format!("{}{}.", strings.declaro_lead_in, clauses.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DocumentKind;

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

    fn paragraphs(blocks: &[StyledBlock]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match &b.content {
                BlockContent::Paragraph(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_person_list_omits_declaro_paragraph() {
        let blocks = compose(
            &profile(),
            &[],
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        assert!(paragraphs(&blocks)
            .iter()
            .all(|t| !t.starts_with("DECLARO")));
        // title, declarant, legal, place/date, signature name
        assert_eq!(paragraphs(&blocks).len(), 5);
    }

    #[test]
    fn person_clause_matches_fixed_template() {
        let persons = vec![AuxiliaryPerson {
            name: "Ivan".to_string(),
            birth_date: "01/01/1990".to_string(),
            kind: DocumentKind::Passport,
            number: "123".to_string(),
            issuer: "X".to_string(),
        }];
        let blocks = compose(
            &profile(),
            &persons,
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        let declaro = paragraphs(&blocks)
            .into_iter()
            .find(|t| t.starts_with("DECLARO"))
            .expect("declaro paragraph");
        assert!(
            declaro.contains("IVAN, nascido(a) em 01/01/1990, passaporte nº 123 emitido por X"),
            "got: {declaro}"
        );
        assert!(declaro.ends_with('.'));
    }

    #[test]
    fn clauses_join_in_insertion_order() {
        let mk = |name: &str| AuxiliaryPerson {
            name: name.to_string(),
            birth_date: "02/02/1992".to_string(),
            kind: DocumentKind::IdentityCard,
            number: "9".to_string(),
            issuer: "SSP".to_string(),
        };
        let persons = vec![mk("Bruno"), mk("Alice")];
        let blocks = compose(
            &profile(),
            &persons,
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        let declaro = paragraphs(&blocks)
            .into_iter()
            .find(|t| t.starts_with("DECLARO"))
            .unwrap()
            .to_string();
        let bruno = declaro.find("BRUNO").unwrap();
        let alice = declaro.find("ALICE").unwrap();
        assert!(bruno < alice);
        assert!(declaro.contains("; "));
    }

    #[test]
    fn name_upper_cased_in_declarant_paragraph() {
        let blocks = compose(
            &profile(),
            &[],
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        assert!(paragraphs(&blocks)[1].contains("MARIA DA SILVA"));
    }

    #[test]
    fn blank_fields_masked_when_enabled() {
        let p = DeclarantProfile {
            document_date: "30/08/2026".to_string(),
            place: "Rio".to_string(),
            ..Default::default()
        };
        let options = RenderOptions {
            underline_blanks: true,
            ..Default::default()
        };
        let blocks = compose(&p, &[], &options, &DocumentStrings::portuguese());
        let declarant = paragraphs(&blocks)[1];
        assert!(declarant.contains(&"_".repeat(14)), "tax id not masked");
        assert!(declarant.contains(&"_".repeat(20)), "address not masked");
    }

    #[test]
    fn composer_accepts_all_blank_profile() {
        let blocks = compose(
            &DeclarantProfile::default(),
            &[],
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        assert_eq!(paragraphs(&blocks).len(), 5);
    }

    #[test]
    fn verification_block_requires_non_blank_string() {
        let base = compose(
            &profile(),
            &[],
            &RenderOptions::default(),
            &DocumentStrings::portuguese(),
        );
        let blank = compose(
            &profile(),
            &[],
            &RenderOptions {
                verification_text: Some("   ".to_string()),
                ..Default::default()
            },
            &DocumentStrings::portuguese(),
        );
        assert_eq!(base.len(), blank.len());

        let with_code = compose(
            &profile(),
            &[],
            &RenderOptions {
                verification_text: Some(" https://example.org/v/42 ".to_string()),
                ..Default::default()
            },
            &DocumentStrings::portuguese(),
        );
        assert_eq!(with_code.len(), base.len() + 2);
        assert!(matches!(
            with_code.last().unwrap().content,
            BlockContent::Barcode(ref s) if s == "https://example.org/v/42"
        ));
    }
}
