//! Fixed text templates for the declaration document.
//!
//! The deployed variants differ only in wording (pure Portuguese vs. Russian
//! labels with Portuguese in parentheses), never in block structure, so each
//! variant is a [`DocumentStrings`] preset rather than a code fork.

/// Every fixed string the composer interpolates into.
#[derive(Debug, Clone)]
pub struct DocumentStrings {
    pub title: &'static str,
    /// `{0}` name, `{1}` birth date, `{2}` tax ID, `{3}` identity number,
    /// `{4}` address — applied via [`DocumentStrings::declarant_paragraph`].
    pub declarant_template: &'static str,
    pub declaro_lead_in: &'static str,
    pub legal_notice: &'static str,
    pub verification_label: &'static str,
}

impl DocumentStrings {
    /// The standard all-Portuguese document.
    pub fn portuguese() -> Self {
        Self {
            title: "DECLARAÇÃO DE RESIDÊNCIA",
            declarant_template: "Eu, {nome} nascido(a) em {nascimento}, inscrito(a) no CPF \
                 sob o nº {cpf}, portador(a) da Cédula de Identidade RG nº {rg}, residente \
                 e situado(a) na {endereco}.",
            declaro_lead_in: "DECLARO, SOB AS PENAS DA LEI que ",
            legal_notice: "É considerado crime, com pena de reclusão e multa, omitir, em \
                 documento público ou particular, declaração que dele devia constar, ou nele \
                 inserir ou fazer inserir declaração falsa ou diversa da que devia ser \
                 escrita, com o fim de prejudicar direito, criar obrigação ou alterar a \
                 verdade sobre fato juridicamente relevante (Art. 299, do Código Penal).",
            verification_label: "Verificação:",
        }
    }

    /// Russian-annotated variant: headings carry a Russian gloss, legal text
    /// stays Portuguese (the document remains a Brazilian declaration).
    pub fn russian_annotated() -> Self {
        Self {
            title: "DECLARAÇÃO DE RESIDÊNCIA (Декларация о месте жительства)",
            verification_label: "Verificação (проверка):",
            ..Self::portuguese()
        }
    }

    /// First paragraph of the document body with the declarant's fields
    /// substituted in.
    pub fn declarant_paragraph(
        &self,
        name: &str,
        birth: &str,
        tax_id: &str,
        identity: &str,
        address: &str,
    ) -> String {
        self.declarant_template
            .replace("{nome}", name)
            .replace("{nascimento}", birth)
            .replace("{cpf}", tax_id)
            .replace("{rg}", identity)
            .replace("{endereco}", address)
    }

    /// One clause of the auxiliary-persons paragraph.
    pub fn person_clause(
        &self,
        name: &str,
        birth: &str,
        kind: &str,
        number: &str,
        issuer: &str,
    ) -> String {
        format!("{name}, nascido(a) em {birth}, {kind} nº {number} emitido por {issuer}")
    }
}

impl Default for DocumentStrings {
    fn default() -> Self {
        Self::portuguese()
    }
}
