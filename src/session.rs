//! Session state and command handlers.
//!
//! One [`Session`] owns the editing state for one document: the
//! auxiliary-person list and the last successfully generated PDF. Each UI
//! action maps to one explicit handler on the session; no process-wide
//! state.

use crate::error::GenerateError;
use crate::pipeline::{generate_document, DocumentConfig};
use crate::profile::{AuxiliaryPerson, DeclarantProfile, GeneratedDocument, RenderOptions};

/// In-memory state scoped to one user's editing session.
#[derive(Default)]
pub struct Session {
    persons: Vec<AuxiliaryPerson>,
    last_document: Option<GeneratedDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a person; insertion order is the order printed.
    pub fn add_person(&mut self, person: AuxiliaryPerson) {
        self.persons.push(person);
    }

    /// Remove by 1-based display position. Returns false (and changes
    /// nothing) for an out-of-range position.
    pub fn remove_person(&mut self, position: usize) -> bool {
        if position >= 1 && position <= self.persons.len() {
            self.persons.remove(position - 1);
            true
        } else {
            false
        }
    }

    pub fn clear_persons(&mut self) {
        self.persons.clear();
    }

    pub fn persons(&self) -> &[AuxiliaryPerson] {
        &self.persons
    }

    /// Display lines for the current list, numbered from 1.
    pub fn person_summaries(&self) -> Vec<String> {
        self.persons
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "{}. {} — {} — {} nº {} — {}",
                    i + 1,
                    p.name,
                    p.birth_date,
                    p.kind.label(),
                    p.number,
                    p.issuer
                )
            })
            .collect()
    }

    /// Run the full pipeline against this session's person list. On success
    /// the new document replaces the previous one; on any error the previous
    /// document stays downloadable.
    pub fn generate(
        &mut self,
        profile: &DeclarantProfile,
        options: &RenderOptions,
        config: &DocumentConfig,
    ) -> Result<&GeneratedDocument, GenerateError> {
        let doc = generate_document(profile, &self.persons, options, config)?;
        Ok(self.last_document.insert(doc))
    }

    pub fn last_document(&self) -> Option<&GeneratedDocument> {
        self.last_document.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DocumentKind;

    fn person(name: &str) -> AuxiliaryPerson {
        AuxiliaryPerson {
            name: name.to_string(),
            birth_date: "01/01/1990".to_string(),
            kind: DocumentKind::Passport,
            number: "123".to_string(),
            issuer: "X".to_string(),
        }
    }

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

    fn config() -> DocumentConfig {
        DocumentConfig {
            fonts_dir: None,
            ..Default::default()
        }
    }

    #[test]
    fn add_remove_clear() {
        let mut s = Session::new();
        s.add_person(person("Ivan"));
        s.add_person(person("Olga"));
        assert_eq!(s.persons().len(), 2);

        assert!(s.remove_person(1));
        assert_eq!(s.persons()[0].name, "Olga");

        assert!(!s.remove_person(0));
        assert!(!s.remove_person(5));
        assert_eq!(s.persons().len(), 1);

        s.clear_persons();
        assert!(s.persons().is_empty());
    }

    #[test]
    fn duplicates_allowed() {
        let mut s = Session::new();
        s.add_person(person("Ivan"));
        s.add_person(person("Ivan"));
        assert_eq!(s.persons().len(), 2);
    }

    #[test]
    fn summaries_are_one_based() {
        let mut s = Session::new();
        s.add_person(person("Ivan"));
        let lines = s.person_summaries();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "1. Ivan — 01/01/1990 — passaporte nº 123 — X");
    }

    #[test]
    fn generate_replaces_last_document() {
        let mut s = Session::new();
        s.generate(&profile(), &RenderOptions::default(), &config())
            .unwrap();
        let first_len = s.last_document().unwrap().bytes.len();

        s.add_person(person("Ivan"));
        s.generate(&profile(), &RenderOptions::default(), &config())
            .unwrap();
        let second_len = s.last_document().unwrap().bytes.len();
        assert_ne!(first_len, second_len);
    }

    #[test]
    fn failed_generate_preserves_previous_document() {
        let mut s = Session::new();
        s.generate(&profile(), &RenderOptions::default(), &config())
            .unwrap();
        assert!(s.last_document().is_some());

        let bad = DeclarantProfile::default();
        assert!(s
            .generate(&bad, &RenderOptions::default(), &config())
            .is_err());
        assert!(s.last_document().is_some(), "previous document lost");
    }
}
