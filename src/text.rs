//! Free-text preprocessing: long-token softening and blank-field masking.

/// Tokens longer than this are hard-split so the line breaker never sees an
/// unbreakable run wider than the printable width.
pub const HARD_TOKEN_LIMIT: usize = 40;

/// Collapse whitespace and split any whitespace-delimited token longer than
/// [`HARD_TOKEN_LIMIT`] characters into limit-sized chunks joined by single
/// spaces.
///
/// Idempotent: every emitted chunk is at or under the limit, so a second
/// pass reproduces the same tokens.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .flat_map(split_long_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_long_token(token: &str) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= HARD_TOKEN_LIMIT {
        return vec![token.to_string()];
    }
    chars
        .chunks(HARD_TOKEN_LIMIT)
        .map(|c| c.iter().collect())
        .collect()
}

/// Substitute a run of `width` underscores for blank values so the printed
/// document visibly signals missing data.
///
/// When `enabled` is false the value passes through untouched — not even
/// trimmed. Existing documents depend on that asymmetry.
pub fn mask(value: &str, width: usize, enabled: bool) -> String {
    if !enabled {
        return value.to_string();
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "_".repeat(width)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("a   b\t c\n d"), "a b c d");
    }

    #[test]
    fn normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_splits_long_tokens() {
        let long = "x".repeat(95);
        let out = normalize(&long);
        for tok in out.split(' ') {
            assert!(
                tok.chars().count() <= HARD_TOKEN_LIMIT,
                "token too long: {}",
                tok.len()
            );
        }
        assert_eq!(out.replace(' ', ""), long);
    }

    #[test]
    fn normalize_counts_chars_not_bytes() {
        let long = "ç".repeat(50);
        let out = normalize(&long);
        let parts: Vec<&str> = out.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 40);
        assert_eq!(parts[1].chars().count(), 10);
    }

    #[test]
    fn normalize_is_idempotent() {
        let input = format!("short {} tail", "y".repeat(130));
        let once = normalize(&input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn mask_blank_when_enabled() {
        assert_eq!(mask("", 10, true), "__________");
        assert_eq!(mask("  ", 10, true), "__________");
    }

    #[test]
    fn mask_trims_non_blank_when_enabled() {
        assert_eq!(mask("Ana", 10, true), "Ana");
        assert_eq!(mask("  Ana ", 10, true), "Ana");
    }

    #[test]
    fn mask_disabled_passes_through_untrimmed() {
        assert_eq!(mask("", 10, false), "");
        assert_eq!(mask("  Ana ", 10, false), "  Ana ");
    }
}
