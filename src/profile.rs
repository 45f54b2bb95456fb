//! Data model for one declaration: the declarant, auxiliary persons, render
//! options, and the finished document.

use serde::{Deserialize, Serialize};

/// Identity and address fields of the person making the declaration.
///
/// All fields are free text as typed into the form; `document_date` is
/// already formatted `DD/MM/YYYY` by the caller. After [`crate::validate`]
/// passes, none of the required fields is blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarantProfile {
    pub full_name: String,
    /// `DD/MM/YYYY`
    pub birth_date: String,
    /// CPF, `DDD.DDD.DDD-DD`
    pub tax_id: String,
    /// RG number
    pub identity_number: String,
    pub address: String,
    /// City / state line, e.g. "Rio de Janeiro / RJ"
    pub place: String,
    pub document_date: String,
}

/// Closed set of documents an auxiliary person may be identified by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "passaporte")]
    Passport,
    #[serde(rename = "RG")]
    IdentityCard,
    #[serde(rename = "RNM")]
    ForeignResidentCard,
    #[serde(rename = "CPF")]
    TaxId,
    #[serde(rename = "MATRICULA")]
    Enrollment,
}

impl DocumentKind {
    /// Label as it appears in the printed document.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Passport => "passaporte",
            DocumentKind::IdentityCard => "RG",
            DocumentKind::ForeignResidentCard => "RNM",
            DocumentKind::TaxId => "CPF",
            DocumentKind::Enrollment => "MATRICULA",
        }
    }
}

/// One person listed in the "DECLARO, SOB AS PENAS DA LEI" paragraph.
///
/// Duplicates are allowed; insertion order is presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuxiliaryPerson {
    pub name: String,
    /// `DD/MM/YYYY`
    pub birth_date: String,
    pub kind: DocumentKind,
    pub number: String,
    pub issuer: String,
}

/// Per-render switches. Rebuilt from form state on every generate request.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Replace blank field values with fixed-width underscore runs.
    pub underline_blanks: bool,
    /// Raw PNG/JPEG bytes, drawn at a fixed position on page one.
    pub logo: Option<Vec<u8>>,
    /// Source string for the QR verification block; blank-after-trim is
    /// treated as absent.
    pub verification_text: Option<String>,
}

/// A finished render, held by the session until the next successful one.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub content_type: &'static str,
}

impl GeneratedDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "declaracao_residencia.pdf",
            content_type: "application/pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_kind_labels() {
        assert_eq!(DocumentKind::Passport.label(), "passaporte");
        assert_eq!(DocumentKind::Enrollment.label(), "MATRICULA");
    }

    #[test]
    fn document_kind_serde_uses_labels() {
        let json = serde_json::to_string(&DocumentKind::ForeignResidentCard).unwrap();
        assert_eq!(json, "\"RNM\"");
        let kind: DocumentKind = serde_json::from_str("\"passaporte\"").unwrap();
        assert_eq!(kind, DocumentKind::Passport);
    }
}
