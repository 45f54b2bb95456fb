//! Required-field and format validation, run before any rendering starts.
//!
//! Every rule is evaluated (no short-circuit) so the user sees all problems
//! at once. Deliberately no calendar check on dates: `31/02/1999` passes the
//! format rule, matching the documents already in circulation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::profile::DeclarantProfile;

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date pattern"));
static RE_TAX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("tax-id pattern"));

pub const MSG_REQUIRED: &str = "Preencha todos os campos obrigatórios.";
pub const MSG_BIRTH_FORMAT: &str = "A data de nascimento deve estar no formato DD/MM/AAAA.";
pub const MSG_TAX_ID_FORMAT: &str = "O CPF deve estar no formato 000.000.000-00.";

/// Check the profile; `Err` carries every violation in rule order.
pub fn validate(profile: &DeclarantProfile) -> Result<(), ValidationError> {
    let mut messages = Vec::new();

    let required = [
        &profile.full_name,
        &profile.birth_date,
        &profile.tax_id,
        &profile.identity_number,
        &profile.address,
        &profile.place,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        messages.push(MSG_REQUIRED.to_string());
    }

    if !profile.birth_date.trim().is_empty() && !RE_DATE.is_match(profile.birth_date.trim()) {
        messages.push(MSG_BIRTH_FORMAT.to_string());
    }

    if !profile.tax_id.trim().is_empty() && !RE_TAX_ID.is_match(profile.tax_id.trim()) {
        messages.push(MSG_TAX_ID_FORMAT.to_string());
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { messages })
    }
}
